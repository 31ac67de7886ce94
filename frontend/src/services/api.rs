use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    ApiError, CountdownResponse, MessageListResponse, SignInRequest, SignInResponse,
    SignOutResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const SESSION_HEADER: &str = "x-session-token";
pub const GENERIC_SIGN_IN_FAILURE: &str = "Sign in failed. Please try again.";

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.header(SESSION_HEADER, token),
            None => builder,
        }
    }

    /// Decode a successful body, or the `{error, code}` body of a failure
    async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if response.ok() {
            return response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e));
        }

        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(error) => Err(error.error),
            Err(_) => Err(format!("Request failed with status {}", status)),
        }
    }

    /// Sign in. Errors carry the message to show under the form; anything
    /// that is not a recognised backend error becomes the generic failure.
    pub async fn sign_in(&self, email: String, password: String) -> Result<SignInResponse, String> {
        let request = SignInRequest { email, password };

        let response = Request::post(&self.url("/api/auth/sign-in"))
            .json(&request)
            .map_err(|_| GENERIC_SIGN_IN_FAILURE.to_string())?
            .send()
            .await
            .map_err(|_| GENERIC_SIGN_IN_FAILURE.to_string())?;

        if response.ok() {
            return response
                .json::<SignInResponse>()
                .await
                .map_err(|_| GENERIC_SIGN_IN_FAILURE.to_string());
        }

        match response.json::<ApiError>().await {
            Ok(error) => Err(error.error),
            Err(_) => Err(GENERIC_SIGN_IN_FAILURE.to_string()),
        }
    }

    pub async fn sign_out(&self, token: &str) -> Result<SignOutResponse, String> {
        let response = Self::with_token(Request::post(&self.url("/api/auth/sign-out")), Some(token))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::read_response(response).await
    }

    pub async fn get_messages(&self, token: Option<&str>) -> Result<MessageListResponse, String> {
        let response = Self::with_token(Request::get(&self.url("/api/messages")), token)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch messages: {}", e))?;
        Self::read_response(response).await
    }

    pub async fn get_countdown(&self) -> Result<CountdownResponse, String> {
        let response = Request::get(&self.url("/api/countdown"))
            .send()
            .await
            .map_err(|e| format!("Failed to fetch countdown: {}", e))?;
        Self::read_response(response).await
    }
}
