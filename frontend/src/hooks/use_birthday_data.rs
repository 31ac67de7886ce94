use shared::{BirthdayCountdown, MessageCard, Session};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct BirthdayDataState {
    pub messages: Vec<MessageCard>,
    pub countdown: Option<BirthdayCountdown>,
    pub loading: bool,
}

/// Messages and countdown for the signed-in session. A failed fetch is
/// logged and leaves that section at its previous value.
#[hook]
pub fn use_birthday_data(api_client: &ApiClient, session: &Session) -> BirthdayDataState {
    let messages = use_state(Vec::<MessageCard>::new);
    let countdown = use_state(|| Option::<BirthdayCountdown>::None);
    let loading = use_state(|| true);

    {
        let api_client = api_client.clone();
        let messages = messages.clone();
        let countdown = countdown.clone();
        let loading = loading.clone();

        use_effect_with(session.token.clone(), move |token| {
            let token = token.clone();
            loading.set(true);

            spawn_local(async move {
                match api_client.get_messages(Some(&token)).await {
                    Ok(response) => messages.set(response.messages),
                    Err(e) => Logger::error_with_component(
                        "use-birthday-data",
                        &format!("Error loading messages: {}", e),
                    ),
                }

                match api_client.get_countdown().await {
                    Ok(response) => countdown.set(Some(response.countdown)),
                    Err(e) => Logger::error_with_component(
                        "use-birthday-data",
                        &format!("Error loading countdown: {}", e),
                    ),
                }

                loading.set(false);
            });
            || ()
        });
    }

    BirthdayDataState {
        messages: (*messages).clone(),
        countdown: (*countdown).clone(),
        loading: *loading,
    }
}
