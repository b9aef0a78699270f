use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tahfeez_core::{AppError, AppResult, Locale};
use tahfeez_domain::RequestBody;

use super::transport::{ApiMethod, ApiRequest, ApiTransport};

/// Transport bound to the current locale and bearer token.
///
/// Cloned into every API module; a new binding is produced when the session
/// or locale changes.
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn ApiTransport>,
    locale: Locale,
    bearer_token: Option<String>,
}

impl fmt::Debug for ApiGateway {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiGateway")
            .field("locale", &self.locale)
            .field("authenticated", &self.bearer_token.is_some())
            .finish()
    }
}

impl ApiGateway {
    /// Creates an unauthenticated gateway.
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>, locale: Locale) -> Self {
        Self {
            transport,
            locale,
            bearer_token: None,
        }
    }

    /// Returns a copy bound to another bearer token.
    #[must_use]
    pub fn with_token(&self, bearer_token: Option<String>) -> Self {
        Self {
            bearer_token,
            ..self.clone()
        }
    }

    /// Returns a copy bound to another locale.
    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }

    /// Returns the bound locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns whether a bearer token is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Builds a request carrying the bound locale and token.
    #[must_use]
    pub fn request(&self, method: ApiMethod, path: impl Into<String>) -> ApiRequest {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            locale: self.locale,
            bearer_token: self.bearer_token.clone(),
        }
    }

    /// Sends a request through the transport.
    pub async fn send(&self, request: ApiRequest) -> AppResult<Value> {
        self.transport.send(request).await
    }

    /// Sends a `GET` with query parameters.
    pub async fn get(
        &self,
        path: impl Into<String>,
        query: Vec<(&'static str, String)>,
    ) -> AppResult<Value> {
        let mut request = self.request(ApiMethod::Get, path);
        request.query = query
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        self.send(request).await
    }

    /// Sends a request with an optional body.
    pub async fn send_body(
        &self,
        method: ApiMethod,
        path: impl Into<String>,
        body: Option<RequestBody>,
    ) -> AppResult<Value> {
        let mut request = self.request(method, path);
        request.body = body;
        self.send(request).await
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, what: &str) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|error| AppError::Decode(format!("failed to decode {what}: {error}")))
}

/// Decodes `value[key]` when present, else `value` itself.
pub(crate) fn decode_nested<T: DeserializeOwned>(mut value: Value, key: &str) -> AppResult<T> {
    if let Some(inner) = value.get_mut(key).map(Value::take) {
        return decode(inner, key);
    }

    decode(value, key)
}

/// Decodes a record array sent either bare or under `key`.
pub(crate) fn decode_collection<T: DeserializeOwned>(value: Value, key: &str) -> AppResult<Vec<T>> {
    match value {
        Value::Array(_) => decode(value, key),
        Value::Object(mut entries) => match entries.remove(key) {
            Some(items) => decode(items, key),
            None => match entries.remove("data") {
                Some(items @ Value::Array(_)) => decode(items, key),
                _ => Err(AppError::Decode(format!(
                    "response is missing the '{key}' collection"
                ))),
            },
        },
        Value::Null => Ok(Vec::new()),
        other => Err(AppError::Decode(format!(
            "expected the '{key}' collection, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_collection, decode_nested};

    #[test]
    fn collection_accepts_bare_array_keyed_object_and_null() {
        let bare = decode_collection::<u64>(json!([1, 2]), "ids");
        let keyed = decode_collection::<u64>(json!({"ids": [3]}), "ids");
        let empty = decode_collection::<u64>(json!(null), "ids");

        assert_eq!(bare.unwrap_or_default(), vec![1, 2]);
        assert_eq!(keyed.unwrap_or_default(), vec![3]);
        assert!(matches!(empty, Ok(ref items) if items.is_empty()));
    }

    #[test]
    fn collection_without_key_is_a_decode_error() {
        let result = decode_collection::<u64>(json!({"other": []}), "ids");
        assert!(matches!(result, Err(tahfeez_core::AppError::Decode(_))));
    }

    #[test]
    fn nested_decoding_falls_back_to_whole_value() {
        let nested = decode_nested::<String>(json!({"name": "x"}), "name");
        let whole = decode_nested::<String>(json!("y"), "name");

        assert_eq!(nested.unwrap_or_default(), "x");
        assert_eq!(whole.unwrap_or_default(), "y");
    }
}
