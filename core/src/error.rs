//! Error types for the foods API client and dashboard.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the dashboard treats "the
//! backend no longer has this food" differently from other failures. All
//! other non-2xx responses land in `HttpError` with the raw status code and
//! body for debugging. `UnknownFood` and `FormNotOpen` are raised locally,
//! before any request is made.

use thiserror::Error;

use crate::types::FoodId;

/// Errors returned by the API client and the dashboard operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The dashboard holds no food with this id.
    #[error("no food with id {0} in the dashboard")]
    UnknownFood(FoodId),

    /// A form submission was requested while that form is not open.
    #[error("the {0} form is not open")]
    FormNotOpen(&'static str),
}

/// Format an `ApiError` into a short message fit for showing to a user.
pub fn format_api_error(error: &ApiError) -> String {
    match error {
        ApiError::Transport(msg) => format_transport_error(msg),
        ApiError::NotFound => "That food no longer exists on the server".to_string(),
        ApiError::HttpError { status, .. } if *status >= 500 => {
            format!("Server error ({status}) - try again later")
        }
        ApiError::HttpError { status, .. } => format!("Request rejected ({status})"),
        ApiError::DeserializationError(_) => "Unexpected response from the server".to_string(),
        ApiError::SerializationError(_) => "Could not encode the request".to_string(),
        ApiError::UnknownFood(id) => format!("Food {id} is not on the dashboard"),
        ApiError::FormNotOpen(which) => format!("Open the {which} form first"),
    }
}

fn format_transport_error(msg: &str) -> String {
    let lower = msg.to_lowercase();
    if lower.contains("refused") {
        "Connection refused - is the API running?".to_string()
    } else if lower.contains("timeout") || lower.contains("timed out") {
        "Request timed out".to_string()
    } else if lower.contains("dns") || lower.contains("resolve") {
        "Could not resolve the API host".to_string()
    } else {
        format!("Connection failed: {msg}")
    }
}
