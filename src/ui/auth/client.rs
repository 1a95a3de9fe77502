//! HTTP client for the authentication backend
//!
//! Calls go to same-origin `/api/*` routes, which the server forwards to the
//! backend. Requests are only issued from the browser; during server
//! rendering every call fails with [`ClientError::Unavailable`].

use crate::core::{ApiError, Department, LoginForm, RegisterForm};

pub const LOGIN_URL: &str = "/api/auth/login";
pub const REGISTER_URL: &str = "/api/auth/register";
pub const DEPARTMENTS_URL: &str = "/api/departments";

/// Client error types
///
/// The `Display` text is what ends up in the form's error slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to send request")]
    Request(String),

    #[error("Network error. Please try again.")]
    Network(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from server")]
    Decode(String),

    #[error("Not available during server rendering")]
    Unavailable,
}

impl ClientError {
    /// Build the error for a non-2xx response, preferring the backend's message
    pub fn rejected(status: u16, body: Option<ApiError>) -> Self {
        let message = body
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ClientError::Rejected { status, message }
    }
}

/// Log in with the collected credentials
#[cfg(not(feature = "ssr"))]
pub async fn login(form: &LoginForm) -> Result<(), ClientError> {
    post_json(LOGIN_URL, form).await
}

#[cfg(feature = "ssr")]
pub async fn login(_form: &LoginForm) -> Result<(), ClientError> {
    Err(ClientError::Unavailable)
}

/// Register a new account
#[cfg(not(feature = "ssr"))]
pub async fn register(form: &RegisterForm) -> Result<(), ClientError> {
    post_json(REGISTER_URL, form).await
}

#[cfg(feature = "ssr")]
pub async fn register(_form: &RegisterForm) -> Result<(), ClientError> {
    Err(ClientError::Unavailable)
}

/// Fetch the departments offered on the register form
#[cfg(not(feature = "ssr"))]
pub async fn fetch_departments() -> Result<Vec<Department>, ClientError> {
    use gloo_net::http::Request;

    let response = Request::get(DEPARTMENTS_URL)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        return Err(ClientError::rejected(status, response.json().await.ok()));
    }

    response
        .json::<Vec<Department>>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(feature = "ssr")]
pub async fn fetch_departments() -> Result<Vec<Department>, ClientError> {
    Err(ClientError::Unavailable)
}

#[cfg(not(feature = "ssr"))]
async fn post_json<T: serde::Serialize>(url: &str, body: &T) -> Result<(), ClientError> {
    use gloo_net::http::Request;

    let request = Request::post(url)
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| ClientError::Request(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        let status = response.status();
        Err(ClientError::rejected(status, response.json().await.ok()))
    }
}
