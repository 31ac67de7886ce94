use shared::Session;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session_storage;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub signing_in: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    /// (email, password)
    pub sign_in: Callback<(String, String)>,
    pub sign_out: Callback<()>,
}

pub struct UseSessionResult {
    pub state: SessionState,
    pub actions: UseSessionActions,
}

/// Owns the signed-in session.
///
/// The stored snapshot is restored synchronously on first render, so a
/// returning user goes straight to the dashboard. Signing out clears the
/// snapshot before telling the backend, and a failed backend call does not
/// keep the user signed in.
#[hook]
pub fn use_session(api_client: &ApiClient) -> UseSessionResult {
    let session = use_state(session_storage::load_session);
    let signing_in = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let sign_in = {
        let api_client = api_client.clone();
        let session = session.clone();
        let signing_in = signing_in.clone();
        let error = error.clone();

        use_callback((), move |(email, password): (String, String), _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let signing_in = signing_in.clone();
            let error = error.clone();

            signing_in.set(true);
            error.set(None);

            spawn_local(async move {
                match api_client.sign_in(email, password).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "use-session",
                            &format!("Signed in as {}", response.session.user.id),
                        );
                        session_storage::save_session(&response.session);
                        session.set(Some(response.session));
                    }
                    Err(message) => {
                        Logger::warn_with_component("use-session", &format!("Sign in failed: {}", message));
                        error.set(Some(message));
                    }
                }
                signing_in.set(false);
            });
        })
    };

    let sign_out = {
        let api_client = api_client.clone();
        let session = session.clone();

        use_callback((*session).clone(), move |_: (), current| {
            session_storage::clear_session();
            session.set(None);

            if let Some(current) = current.clone() {
                let api_client = api_client.clone();
                spawn_local(async move {
                    if let Err(e) = api_client.sign_out(&current.token).await {
                        Logger::warn_with_component("use-session", &format!("Backend sign out failed: {}", e));
                    }
                });
            }
        })
    };

    UseSessionResult {
        state: SessionState {
            session: (*session).clone(),
            signing_in: *signing_in,
            error: (*error).clone(),
        },
        actions: UseSessionActions { sign_in, sign_out },
    }
}
