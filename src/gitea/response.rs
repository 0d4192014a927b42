//! Result of a call to the Gitea API
use reqwest::Response;
use serde_json::{Map, Value};

use crate::errors::{GitBackupError, GitBackupErrorKind};

/// Parsed body of a Gitea API response
///
/// Gitea does not always signal failures with the status code alone, so the
/// body decides: an object carrying a `message` field is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The call returned data
    Success(Value),

    /// The call returned an error message
    Error(String),
}

impl ApiResponse {
    /// Whether the response describes an existing object (it has an `id` field)
    pub fn has_id(&self) -> bool {
        self.fields().is_some_and(|fields| fields.contains_key("id"))
    }

    /// Fields of a successful object response
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            ApiResponse::Success(Value::Object(fields)) => Some(fields),
            _ => None,
        }
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        match value.get("message") {
            Some(Value::String(message)) => ApiResponse::Error(message.clone()),
            Some(other) => ApiResponse::Error(other.to_string()),
            None => ApiResponse::Success(value),
        }
    }
}

/// Read the body of any Gitea response
///
/// A successful response must hold JSON. A failed response is returned as long
/// as its body parses, only a failed response without a JSON body is an error.
pub(crate) async fn handle_response(response: Response) -> Result<ApiResponse, GitBackupError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;
    log::trace!("{status} {url}: {text}");
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok(value.into()),
        Err(e) if status.is_success() => Err(e.into()),
        Err(_) => Err(GitBackupError::new(GitBackupErrorKind::Http)
            .with_text(&format!("{status} for {url}: {text}"))),
    }
}
