use shared::MessageCard;
use yew::prelude::*;

use crate::services::date_utils::format_unlock_date;

#[derive(Properties, PartialEq)]
pub struct MessageCardViewProps {
    pub card: MessageCard,
}

#[function_component(MessageCardView)]
pub fn message_card_view(props: &MessageCardViewProps) -> Html {
    let card = &props.card;
    let state_class = if card.is_unlocked() { "unlocked" } else { "locked" };

    let body = match card {
        MessageCard::Unlocked { content, video_url, from_family_member, .. } => html! {
            <>
                <p>{content.clone()}</p>
                if let Some(url) = video_url {
                    <div class="video-container">
                        <video controls=true>
                            <source src={url.clone()} type="video/mp4" />
                            {"Your browser does not support the video tag."}
                        </video>
                    </div>
                }
                <p class="from-family">{format!("From: {}", from_family_member)}</p>
            </>
        },
        MessageCard::Locked { age, unlock_date, .. } => html! {
            <div class="locked-message">
                <p>{format!("🔒 This message will unlock on your {}th birthday!", age)}</p>
                <p class="unlock-date">{format!("Unlocks: {}", format_unlock_date(unlock_date))}</p>
            </div>
        },
    };

    html! {
        <div class={classes!("message-card", state_class)}>
            <div class="message-header">
                <h3>{card.title().to_string()}</h3>
                <span class="age-badge">{format!("Age {}", card.age())}</span>
            </div>
            <div class="message-content">
                {body}
            </div>
        </div>
    }
}
