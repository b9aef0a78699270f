use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tahfeez_application::{ApiMethod, ApiRequest, ApiTransport};
use tahfeez_core::{AppError, AppResult};
use tahfeez_domain::{MultipartForm, RequestBody};
use tracing::{debug, warn};
use url::Url;

const LOCALE_HEADER: &str = "lang";
const GENERIC_VALIDATION_MESSAGE: &str = "البيانات المدخلة غير صحيحة";

/// reqwest-based implementation of the API transport.
#[derive(Clone)]
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// Without a timeout the HTTP stack's defaults apply.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Self::with_client(http_client, base_url)
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "invalid API base URL '{base_url}'"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Returns the API root every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, request: &ApiRequest) -> AppResult<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|error| {
                AppError::Validation(format!("invalid API path '{}': {error}", request.path))
            })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        Ok(url)
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> AppResult<Value> {
        let url = self.endpoint(&request)?;
        let mut builder = self
            .http_client
            .request(http_method(request.method), url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(LOCALE_HEADER, request.locale.as_str());

        if let Some(token) = request.bearer_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Multipart(form)) => builder.multipart(multipart_form(form)?),
            None => builder,
        };

        let response = builder.send().await.map_err(|error| {
            warn!(
                method = %request.method,
                path = %request.path,
                error = %error,
                "API request failed before a response arrived"
            );
            AppError::Transport(error.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| AppError::Transport(format!("failed to read response: {error}")))?;
        debug!(method = %request.method, path = %request.path, status, "API request completed");

        interpret_response(status, &text)
    }
}

fn http_method(method: ApiMethod) -> reqwest::Method {
    match method {
        ApiMethod::Get => reqwest::Method::GET,
        ApiMethod::Post => reqwest::Method::POST,
        ApiMethod::Put => reqwest::Method::PUT,
        ApiMethod::Patch => reqwest::Method::PATCH,
        ApiMethod::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(form: MultipartForm) -> AppResult<Form> {
    let mut multipart = Form::new();
    for (name, value) in form.fields() {
        multipart = multipart.text(name.clone(), value.clone());
    }
    for file in form.files() {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_owned())
            .mime_str(file.mime_type())
            .map_err(|error| {
                AppError::Validation(format!(
                    "invalid MIME type '{}' for '{}': {error}",
                    file.mime_type(),
                    file.file_name()
                ))
            })?;
        multipart = multipart.part(file.field().to_owned(), part);
    }

    Ok(multipart)
}

/// Maps a raw HTTP response onto the payload or an application error.
pub(crate) fn interpret_response(status: u16, text: &str) -> AppResult<Value> {
    let success = (200..300).contains(&status);
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(text) {
            Ok(body) => body,
            Err(error) if success => {
                return Err(AppError::Decode(format!(
                    "response is not valid JSON: {error}"
                )));
            }
            Err(_) => Value::Null,
        }
    };

    if success {
        return Ok(unwrap_envelope(body));
    }

    let message = server_message(&body);
    Err(match status {
        401 => AppError::Unauthorized(message.unwrap_or_else(|| "unauthenticated".to_owned())),
        403 => AppError::Forbidden(message.unwrap_or_else(|| "forbidden".to_owned())),
        404 => AppError::NotFound(message.unwrap_or_else(|| "not found".to_owned())),
        422 => AppError::Validation(
            message
                .or_else(|| first_validation_error(&body))
                .unwrap_or_else(|| GENERIC_VALIDATION_MESSAGE.to_owned()),
        ),
        _ => AppError::Http {
            status,
            message: message.unwrap_or_else(|| format!("HTTP error! status: {status}")),
        },
    })
}

fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut object)
            if object.contains_key("status") && object.contains_key("data") =>
        {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn first_validation_error(body: &Value) -> Option<String> {
    let errors = body.get("errors")?;
    let first = match errors {
        Value::Object(fields) => fields.values().next()?,
        Value::Array(_) => errors,
        _ => return None,
    };

    match first {
        Value::String(message) => Some(message.clone()),
        Value::Array(messages) => messages.first().and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
