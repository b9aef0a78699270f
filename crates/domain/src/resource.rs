use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tahfeez_core::{AppError, AppResult, Locale, NonEmptyString};

use crate::lenient;
use crate::localized::localized;
use crate::payload::RequestBody;

/// Backend-managed record type exposed through list/get/create/update/delete
/// endpoints.
pub trait Resource: DeserializeOwned + Debug + Clone + Send + Sync + 'static {
    /// Endpoint path relative to the API base URL, without slashes.
    const PATH: &'static str;
    /// Key holding the record array in list responses.
    const COLLECTION_KEY: &'static str;
    /// Page size requested when the page does not choose one.
    const DEFAULT_PER_PAGE: u32 = 15;

    /// Page-local filter shape.
    type Filter: ResourceFilter;
    /// Create/edit form draft.
    type Draft: ResourceDraft<Self>;

    /// Returns the server identifier.
    fn id(&self) -> u64;

    /// Returns the label used in lists, pickers and confirmation prompts.
    fn display_name(&self, locale: Locale) -> String;
}

/// Filter values sent as query parameters with list requests.
pub trait ResourceFilter: Debug + Clone + Default + PartialEq + Send + Sync + 'static {
    /// Returns non-empty filter values as query pairs.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Returns whether any filter narrows the list.
    fn is_active(&self) -> bool {
        !self.query_pairs().is_empty()
    }

    /// Replaces the free-text search term; filters without search ignore it.
    #[must_use]
    fn with_search(self, search: Option<String>) -> Self;
}

/// Whether a draft creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    /// New record.
    Create,
    /// Existing record.
    Edit,
}

/// Client-local copy of a record being created or edited.
pub trait ResourceDraft<R>: Debug + Clone + Default + Send + Sync + 'static {
    /// Seeds an edit draft from a fetched record.
    fn from_record(record: &R) -> Self;

    /// Runs the required-field and upload checks the form enforces before
    /// submission.
    fn validate(&self, mode: DraftMode) -> AppResult<()>;

    /// Encodes the draft as a request body.
    fn into_body(self) -> AppResult<RequestBody>;
}

/// Nested reference to a student, teacher or supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Nested reference to a subscription package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Arabic name.
    #[serde(default)]
    pub name_ar: Option<String>,
    /// English name.
    #[serde(default)]
    pub name_en: Option<String>,
    /// Legacy unlocalized name.
    #[serde(default)]
    pub name: Option<String>,
}

impl PackageRef {
    /// Returns the localized package name.
    #[must_use]
    pub fn name(&self, locale: Locale) -> &str {
        localized(
            self.name_ar.as_deref(),
            self.name_en.as_deref(),
            self.name.as_deref(),
            locale,
        )
    }
}

pub(crate) fn person_name(person: Option<&PersonRef>) -> &str {
    person.map(|value| value.name.as_str()).unwrap_or_default()
}

pub(crate) fn require_text(value: &str, label: &str) -> AppResult<()> {
    NonEmptyString::new(value)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("حقل {label} مطلوب")))
}

pub(crate) fn require_id(value: Option<u64>, label: &str) -> AppResult<()> {
    match value {
        Some(id) if id > 0 => Ok(()),
        _ => Err(AppError::Validation(format!("يرجى اختيار {label}"))),
    }
}

pub(crate) fn check_email(value: Option<&str>) -> AppResult<()> {
    match value.map(str::trim).filter(|email| !email.is_empty()) {
        Some(email) if !is_plausible_email(email) => Err(AppError::Validation(
            "صيغة البريد الإلكتروني غير صحيحة".to_owned(),
        )),
        _ => Ok(()),
    }
}

/// Returns whether a value looks like an email address.
#[must_use]
pub fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Collects query pairs, skipping absent and blank values.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub(crate) fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.0.push((key, value.to_owned()));
        }
        self
    }

    pub(crate) fn id(mut self, key: &'static str, value: Option<u64>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn flag(mut self, key: &'static str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.push((key, if value { "1" } else { "0" }.to_owned()));
        }
        self
    }

    pub(crate) fn finish(self) -> Vec<(&'static str, String)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use tahfeez_core::Locale;

    use super::{PackageRef, QueryPairs, is_plausible_email, require_id, require_text};

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("student@academy.com"));
        assert!(!is_plausible_email("student@academy"));
        assert!(!is_plausible_email("student academy@x.com"));
        assert!(!is_plausible_email("@academy.com"));
    }

    #[test]
    fn required_checks_reject_blank_and_zero() {
        assert!(require_text("  ", "الاسم").is_err());
        assert!(require_text("أحمد", "الاسم").is_ok());
        assert!(require_id(Some(0), "الطالب").is_err());
        assert!(require_id(None, "الطالب").is_err());
    }

    #[test]
    fn query_pairs_skip_blank_values() {
        let pairs = QueryPairs::default()
            .text("search", Some("  "))
            .text("status", Some("active"))
            .id("teacher_id", None)
            .flag("is_active", Some(false))
            .finish();

        assert_eq!(
            pairs,
            vec![("status", "active".to_owned()), ("is_active", "0".to_owned())]
        );
    }

    #[test]
    fn package_ref_name_uses_legacy_fallback() {
        let package = PackageRef {
            id: 1,
            name_ar: None,
            name_en: None,
            name: Some("Basic".to_owned()),
        };

        assert_eq!(package.name(Locale::Ar), "Basic");
    }
}
