use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SignInFormProps {
    /// (email, password)
    pub on_submit: Callback<(String, String)>,
    pub signing_in: bool,
    pub error: Option<String>,
}

#[function_component(SignInForm)]
pub fn sign_in_form(props: &SignInFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(((*email).clone(), (*password).clone()));
        })
    };

    html! {
        <div class="app">
            <div class="header">
                <h1>{"🎂 Nephew Diaries"}</h1>
                <p>{"A Birthday Time Capsule"}</p>
                <p class="signin-note">
                    {"Sign in with your provided credentials to see your birthday messages!"}
                </p>
            </div>

            <div class="signin-container">
                <div class="matrix-border">
                    <form onsubmit={on_submit} class="login-form">
                        <h2>{"Sign In"}</h2>

                        <div class="form-group">
                            <label for="email">{"Email"}</label>
                            <input
                                type="email"
                                id="email"
                                value={(*email).clone()}
                                oninput={on_email_change}
                                required=true
                                placeholder="Enter your email"
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">{"Password"}</label>
                            <input
                                type="password"
                                id="password"
                                value={(*password).clone()}
                                oninput={on_password_change}
                                required=true
                                placeholder="Enter your password"
                            />
                        </div>

                        <button type="submit" disabled={props.signing_in} class="signin-btn">
                            {if props.signing_in { "Signing In..." } else { "Sign In" }}
                        </button>
                    </form>
                </div>

                if let Some(error) = &props.error {
                    <div class="error-message">
                        <p>{format!("❌ {}", error)}</p>
                    </div>
                }
            </div>
        </div>
    }
}
