mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::dashboard::Dashboard;
use components::sign_in_form::SignInForm;
use hooks::use_session::use_session;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let session = use_session(&api_client);

    match &session.state.session {
        Some(current) => html! {
            <Dashboard
                session={current.clone()}
                api_client={(*api_client).clone()}
                on_sign_out={session.actions.sign_out.clone()}
            />
        },
        None => html! {
            <SignInForm
                on_submit={session.actions.sign_in.clone()}
                signing_in={session.state.signing_in}
                error={session.state.error.clone()}
            />
        },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
