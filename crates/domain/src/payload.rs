use serde::Serialize;
use serde_json::Value;
use tahfeez_core::{AppError, AppResult};

/// File selected in a form, kept in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    field: String,
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a file part for the given form field.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Returns the form field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_str()
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

/// Multipart body for file-bearing resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Appends a file.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Returns text fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns attached files.
    #[must_use]
    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Returns the first value of a text field.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn push_value(&mut self, key: &str, value: Value) {
        match value {
            Value::Null => {}
            Value::Bool(flag) => self
                .fields
                .push((key.to_owned(), if flag { "1" } else { "0" }.to_owned())),
            Value::Number(number) => self.fields.push((key.to_owned(), number.to_string())),
            Value::String(text) => self.fields.push((key.to_owned(), text)),
            Value::Array(items) => {
                let item_key = format!("{key}[]");
                for item in items {
                    self.push_value(item_key.as_str(), item);
                }
            }
            Value::Object(entries) => {
                for (name, item) in entries {
                    self.push_value(format!("{key}[{name}]").as_str(), item);
                }
            }
        }
    }
}

/// Request body accepted by mutation endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON body.
    Json(Value),
    /// Multipart body; the boundary is chosen by the HTTP layer.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Encodes a draft, switching to multipart when it carries files.
    ///
    /// Multipart text fields follow the backend's form conventions: booleans
    /// become `1`/`0`, arrays use `key[]`, nested objects use `key[name]`.
    pub fn from_draft<T: Serialize>(draft: &T, attachments: Vec<FilePart>) -> AppResult<Self> {
        let value = serde_json::to_value(draft)
            .map_err(|error| AppError::Internal(format!("failed to encode draft: {error}")))?;

        if attachments.is_empty() {
            return Ok(Self::Json(value));
        }

        let mut form = MultipartForm::new();
        if let Value::Object(entries) = value {
            for (name, item) in entries {
                form.push_value(name.as_str(), item);
            }
        }

        Ok(Self::Multipart(
            attachments.into_iter().fold(form, MultipartForm::file),
        ))
    }

    /// Returns whether the body must be sent as `multipart/form-data`.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{FilePart, RequestBody};

    #[derive(Serialize)]
    struct Draft {
        name: String,
        is_active: bool,
        features: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<f64>,
    }

    fn draft() -> Draft {
        Draft {
            name: "باقة".to_owned(),
            is_active: true,
            features: vec!["a".to_owned(), "b".to_owned()],
            price: None,
        }
    }

    #[test]
    fn draft_without_files_is_json() {
        let body = RequestBody::from_draft(&draft(), Vec::new());

        assert!(matches!(
            body,
            Ok(RequestBody::Json(value))
                if value == json!({"name": "باقة", "is_active": true, "features": ["a", "b"]})
        ));
    }

    #[test]
    fn draft_with_files_flattens_to_form_fields() {
        let image = FilePart::new("image", "cover.png", "image/png", vec![1, 2, 3]);
        let body = RequestBody::from_draft(&draft(), vec![image]);

        let Ok(RequestBody::Multipart(form)) = body else {
            unreachable!("expected multipart body");
        };
        assert_eq!(form.field_value("is_active"), Some("1"));
        assert_eq!(
            form.fields()
                .iter()
                .filter(|(name, _)| name == "features[]")
                .count(),
            2
        );
        assert_eq!(form.field_value("price"), None);
        assert_eq!(form.files().len(), 1);
    }
}
