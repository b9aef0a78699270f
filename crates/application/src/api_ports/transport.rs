use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tahfeez_core::{AppResult, Locale};
use tahfeez_domain::RequestBody;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// Read.
    Get,
    /// Create, or multipart update with a `_method` override.
    Post,
    /// Full update.
    Put,
    /// Partial update used by workflow endpoints.
    Patch,
    /// Removal.
    Delete,
}

impl ApiMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Fully described request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: ApiMethod,
    /// Path relative to the API base URL, without a leading slash.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Optional JSON or multipart body.
    pub body: Option<RequestBody>,
    /// Interface language sent in the `lang` header.
    pub locale: Locale,
    /// Bearer token for authenticated endpoints.
    pub bearer_token: Option<String>,
}

impl ApiRequest {
    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Port for the single HTTP wrapper every API call goes through.
///
/// Implementations unwrap the `{status, data}` envelope and map HTTP failures
/// onto [`tahfeez_core::AppError`] variants.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends one request and returns the response payload.
    async fn send(&self, request: ApiRequest) -> AppResult<Value>;
}
