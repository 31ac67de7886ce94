use shared::Session;
use yew::prelude::*;

use super::countdown_timer::CountdownTimer;
use super::message_grid::MessageGrid;
use crate::hooks::use_birthday_data::use_birthday_data;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub session: Session,
    pub api_client: ApiClient,
    pub on_sign_out: Callback<()>,
}

/// Signed-in view. Unmounting it on sign-out also stops the countdown tick.
#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let data = use_birthday_data(&props.api_client, &props.session);

    if data.loading {
        return html! {
            <div class="app">
                <div class="loading">
                    <h2>{"🎂 Loading Nephew Diaries..."}</h2>
                    <p>{"Please wait while we prepare your birthday messages!"}</p>
                </div>
            </div>
        };
    }

    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    let age = data
        .countdown
        .as_ref()
        .map(|countdown| countdown.current_age.to_string())
        .unwrap_or_default();

    html! {
        <div class="app">
            <div class="top-nav">
                <div class="nav-left">
                    <h1>{"🎂 Nephew Diaries"}</h1>
                </div>
                <div class="nav-center">
                    <span class="current-age">{format!("Age: {}", age)}</span>
                </div>
                <div class="nav-right">
                    <span class="signed-in-as">{props.session.user.name.clone()}</span>
                    <button onclick={on_sign_out} class="signout-btn">{"Sign Out"}</button>
                </div>
            </div>

            <div class="main-content">
                if let Some(countdown) = &data.countdown {
                    <CountdownTimer countdown={countdown.clone()} />
                }
                <MessageGrid cards={data.messages.clone()} />
            </div>
        </div>
    }
}
