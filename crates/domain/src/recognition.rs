use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tahfeez_core::{AppResult, Locale};

use crate::lenient;
use crate::localized::localized;
use crate::payload::{FilePart, RequestBody};
use crate::resource::{
    DraftMode, PersonRef, QueryPairs, Resource, ResourceDraft, ResourceFilter, person_name,
    require_id, require_text,
};
use crate::upload::{UploadKind, validate_upload};

/// Student featured on the honor board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HonorBoardEntry {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Honored student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// Arabic title.
    #[serde(default)]
    pub title_ar: Option<String>,
    /// English title.
    #[serde(default)]
    pub title_en: Option<String>,
    /// Legacy title.
    #[serde(default)]
    pub title: Option<String>,
    /// Arabic achievement text.
    #[serde(default)]
    pub achievement_ar: Option<String>,
    /// English achievement text.
    #[serde(default)]
    pub achievement_en: Option<String>,
    /// Legacy achievement text.
    #[serde(default)]
    pub achievement: Option<String>,
    /// Month in `YYYY-MM` form.
    #[serde(default)]
    pub month: Option<String>,
    /// Student photo.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the entry is visible on the website.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_published: bool,
}

impl HonorBoardEntry {
    /// Returns the localized title.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        localized(
            self.title_ar.as_deref(),
            self.title_en.as_deref(),
            self.title.as_deref(),
            locale,
        )
    }

    /// Returns the localized achievement text.
    #[must_use]
    pub fn achievement(&self, locale: Locale) -> &str {
        localized(
            self.achievement_ar.as_deref(),
            self.achievement_en.as_deref(),
            self.achievement.as_deref(),
            locale,
        )
    }
}

impl Resource for HonorBoardEntry {
    const PATH: &'static str = "admin/honor-boards";
    const COLLECTION_KEY: &'static str = "honor_boards";
    const DEFAULT_PER_PAGE: u32 = 12;

    type Filter = HonorBoardFilter;
    type Draft = HonorBoardDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, locale: Locale) -> String {
        let student = person_name(self.student.as_ref());
        let title = self.title(locale);
        match (student.is_empty(), title.is_empty()) {
            (false, false) => format!("{student} - {title}"),
            (false, true) => student.to_owned(),
            _ => title.to_owned(),
        }
    }
}

/// Filters of the honor board page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HonorBoardFilter {
    /// Student or title search.
    pub search: Option<String>,
    /// Month in `YYYY-MM` form.
    pub month: Option<String>,
}

impl ResourceFilter for HonorBoardFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .text("month", self.month.as_deref())
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Honor board create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HonorBoardDraft {
    /// Honored student (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Arabic title (required).
    pub title_ar: String,
    /// English title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Arabic achievement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_ar: Option<String>,
    /// English achievement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_en: Option<String>,
    /// Month in `YYYY-MM` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Whether the entry is visible on the website.
    pub is_published: bool,
    /// New student photo.
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl ResourceDraft<HonorBoardEntry> for HonorBoardDraft {
    fn from_record(record: &HonorBoardEntry) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            title_ar: record
                .title_ar
                .clone()
                .or_else(|| record.title.clone())
                .unwrap_or_default(),
            title_en: record.title_en.clone(),
            achievement_ar: record
                .achievement_ar
                .clone()
                .or_else(|| record.achievement.clone()),
            achievement_en: record.achievement_en.clone(),
            month: record.month.clone(),
            is_published: record.is_published,
            image: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_id(self.student_id, "الطالب")?;
        require_text(&self.title_ar, "العنوان بالعربية")?;
        if let Some(month) = self.month.as_deref() {
            crate::billing::validate_month(month)?;
        }
        if let Some(image) = &self.image {
            validate_upload(image, UploadKind::Image)?;
        }

        Ok(())
    }

    fn into_body(mut self) -> AppResult<RequestBody> {
        let attachments = self.image.take().into_iter().collect();
        RequestBody::from_draft(&self, attachments)
    }
}

/// Certificate issued to a student, e.g. for completing a juz'.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Certificate {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Certified student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// Issuing teacher.
    #[serde(default)]
    pub teacher: Option<PersonRef>,
    /// Arabic title.
    #[serde(default)]
    pub title_ar: Option<String>,
    /// English title.
    #[serde(default)]
    pub title_en: Option<String>,
    /// Legacy title.
    #[serde(default)]
    pub title: Option<String>,
    /// Issue date.
    #[serde(default)]
    pub issued_at: Option<NaiveDate>,
    /// Scanned certificate.
    #[serde(default)]
    pub file_url: Option<String>,
}

impl Certificate {
    /// Returns the localized title.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        localized(
            self.title_ar.as_deref(),
            self.title_en.as_deref(),
            self.title.as_deref(),
            locale,
        )
    }
}

impl Resource for Certificate {
    const PATH: &'static str = "admin/certificates";
    const COLLECTION_KEY: &'static str = "certificates";

    type Filter = CertificateFilter;
    type Draft = CertificateDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, locale: Locale) -> String {
        format!(
            "{} ({})",
            self.title(locale),
            person_name(self.student.as_ref())
        )
    }
}

/// Filters of the certificates page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateFilter {
    /// Title or student search.
    pub search: Option<String>,
    /// Certified student.
    pub student_id: Option<u64>,
}

impl ResourceFilter for CertificateFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .id("student_id", self.student_id)
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Certificate create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateDraft {
    /// Certified student (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Issuing teacher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<u64>,
    /// Arabic title (required).
    pub title_ar: String,
    /// English title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Issue date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDate>,
    /// New scanned certificate.
    #[serde(skip)]
    pub file: Option<FilePart>,
}

impl ResourceDraft<Certificate> for CertificateDraft {
    fn from_record(record: &Certificate) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            teacher_id: record.teacher.as_ref().map(|teacher| teacher.id),
            title_ar: record
                .title_ar
                .clone()
                .or_else(|| record.title.clone())
                .unwrap_or_default(),
            title_en: record.title_en.clone(),
            issued_at: record.issued_at,
            file: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_id(self.student_id, "الطالب")?;
        require_text(&self.title_ar, "العنوان بالعربية")?;
        if let Some(file) = &self.file {
            validate_upload(file, UploadKind::Image)?;
        }

        Ok(())
    }

    fn into_body(mut self) -> AppResult<RequestBody> {
        let attachments = self.file.take().into_iter().collect();
        RequestBody::from_draft(&self, attachments)
    }
}
