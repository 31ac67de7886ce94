use shared::MessageCard;
use yew::prelude::*;

use super::message_card::MessageCardView;

#[derive(Properties, PartialEq)]
pub struct MessageGridProps {
    /// Already ordered by age
    pub cards: Vec<MessageCard>,
}

#[function_component(MessageGrid)]
pub fn message_grid(props: &MessageGridProps) -> Html {
    html! {
        <div class="messages-section">
            <h2>{"📝 Your Birthday Messages"}</h2>
            if props.cards.is_empty() {
                <div class="no-messages">
                    <p>{"No birthday messages yet. Check back later!"}</p>
                    <p class="note">{"Family members are preparing special messages for you! 🎁"}</p>
                </div>
            } else {
                <div class="messages-grid">
                    {for props.cards.iter().map(|card| html! {
                        <MessageCardView key={card.id().to_string()} card={card.clone()} />
                    })}
                </div>
            }
        </div>
    }
}
