//! Content shown on the public website and managed from the dashboard:
//! packages, features, lessons and testimonials.

use serde::{Deserialize, Serialize};
use tahfeez_core::{AppError, AppResult, Locale};

use crate::lenient;
use crate::localized::localized;
use crate::payload::{FilePart, RequestBody};
use crate::resource::{
    DraftMode, QueryPairs, Resource, ResourceDraft, ResourceFilter, require_text,
};
use crate::upload::{UploadKind, validate_upload};

/// Subscription package offered to students.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Package {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Arabic name.
    #[serde(default)]
    pub name_ar: Option<String>,
    /// English name.
    #[serde(default)]
    pub name_en: Option<String>,
    /// Legacy name.
    #[serde(default)]
    pub name: Option<String>,
    /// Arabic description.
    #[serde(default)]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(default)]
    pub description_en: Option<String>,
    /// Legacy description.
    #[serde(default)]
    pub description: Option<String>,
    /// Monthly price.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: f64,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Sessions included per month.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub sessions_per_month: Option<u32>,
    /// Session length in minutes.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub session_duration: Option<u32>,
    /// Bullet points shown on the pricing card.
    #[serde(default)]
    pub features: Vec<String>,
    /// Whether new students can subscribe.
    #[serde(default = "default_true", deserialize_with = "lenient::flag")]
    pub is_active: bool,
    /// Cover image.
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Package {
    /// Returns the localized name.
    #[must_use]
    pub fn name(&self, locale: Locale) -> &str {
        localized(
            self.name_ar.as_deref(),
            self.name_en.as_deref(),
            self.name.as_deref(),
            locale,
        )
    }

    /// Returns the localized description.
    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        localized(
            self.description_ar.as_deref(),
            self.description_en.as_deref(),
            self.description.as_deref(),
            locale,
        )
    }
}

impl Resource for Package {
    const PATH: &'static str = "admin/packages";
    const COLLECTION_KEY: &'static str = "packages";

    type Filter = PackageFilter;
    type Draft = PackageDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, locale: Locale) -> String {
        self.name(locale).to_owned()
    }
}

/// Filters of the packages page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    /// Name search.
    pub search: Option<String>,
    /// Active/inactive.
    pub is_active: Option<bool>,
}

impl ResourceFilter for PackageFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .flag("is_active", self.is_active)
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Package create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageDraft {
    /// Arabic name (required).
    pub name_ar: String,
    /// English name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    /// Arabic description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    /// Monthly price (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// ISO currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Sessions included per month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_per_month: Option<u32>,
    /// Session length in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<u32>,
    /// Pricing card bullet points.
    pub features: Vec<String>,
    /// Whether new students can subscribe.
    pub is_active: bool,
    /// New cover image.
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl ResourceDraft<Package> for PackageDraft {
    fn from_record(record: &Package) -> Self {
        Self {
            name_ar: record
                .name_ar
                .clone()
                .or_else(|| record.name.clone())
                .unwrap_or_default(),
            name_en: record.name_en.clone(),
            description_ar: record
                .description_ar
                .clone()
                .or_else(|| record.description.clone()),
            description_en: record.description_en.clone(),
            price: Some(record.price),
            currency: record.currency.clone(),
            sessions_per_month: record.sessions_per_month,
            session_duration: record.session_duration,
            features: record.features.clone(),
            is_active: record.is_active,
            image: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.name_ar, "الاسم بالعربية")?;
        match self.price {
            None => return Err(AppError::Validation("حقل السعر مطلوب".to_owned())),
            Some(price) if price < 0.0 || !price.is_finite() => {
                return Err(AppError::Validation(
                    "السعر يجب أن يكون رقماً موجباً".to_owned(),
                ));
            }
            Some(_) => {}
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

/// Selling point shown in the website's features section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feature {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Arabic title.
    #[serde(default)]
    pub title_ar: Option<String>,
    /// English title.
    #[serde(default)]
    pub title_en: Option<String>,
    /// Legacy title.
    #[serde(default)]
    pub title: Option<String>,
    /// Arabic description.
    #[serde(default)]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(default)]
    pub description_en: Option<String>,
    /// Legacy description.
    #[serde(default)]
    pub description: Option<String>,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Illustration.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Display order.
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl Feature {
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

    /// Returns the localized description.
    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        localized(
            self.description_ar.as_deref(),
            self.description_en.as_deref(),
            self.description.as_deref(),
            locale,
        )
    }
}

impl Resource for Feature {
    const PATH: &'static str = "admin/features";
    const COLLECTION_KEY: &'static str = "features";

    type Filter = SearchFilter;
    type Draft = FeatureDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, locale: Locale) -> String {
        self.title(locale).to_owned()
    }
}

/// Filter for pages that only offer free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Search term.
    pub search: Option<String>,
}

impl ResourceFilter for SearchFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search }
    }
}

/// Feature create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureDraft {
    /// Arabic title (required).
    pub title_ar: String,
    /// English title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Arabic description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    /// New illustration.
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl ResourceDraft<Feature> for FeatureDraft {
    fn from_record(record: &Feature) -> Self {
        Self {
            title_ar: record
                .title_ar
                .clone()
                .or_else(|| record.title.clone())
                .unwrap_or_default(),
            title_en: record.title_en.clone(),
            description_ar: record
                .description_ar
                .clone()
                .or_else(|| record.description.clone()),
            description_en: record.description_en.clone(),
            icon: record.icon.clone(),
            sort_order: record.sort_order,
            image: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.title_ar, "العنوان بالعربية")?;
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

/// Recorded lesson published on the website.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Arabic title.
    #[serde(default)]
    pub title_ar: Option<String>,
    /// English title.
    #[serde(default)]
    pub title_en: Option<String>,
    /// Legacy title.
    #[serde(default)]
    pub title: Option<String>,
    /// Arabic description.
    #[serde(default)]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(default)]
    pub description_en: Option<String>,
    /// Legacy description.
    #[serde(default)]
    pub description: Option<String>,
    /// Uploaded or external video.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Poster image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Length in minutes.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub duration_minutes: Option<u32>,
    /// Whether the lesson is visible on the website.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_published: bool,
}

impl Lesson {
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

impl Resource for Lesson {
    const PATH: &'static str = "admin/lessons";
    const COLLECTION_KEY: &'static str = "lessons";

    type Filter = PublishedFilter;
    type Draft = LessonDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, locale: Locale) -> String {
        self.title(locale).to_owned()
    }
}

/// Filter for website content that can be unpublished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedFilter {
    /// Search term.
    pub search: Option<String>,
    /// Published/unpublished.
    pub is_published: Option<bool>,
}

impl ResourceFilter for PublishedFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .flag("is_published", self.is_published)
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Lesson create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LessonDraft {
    /// Arabic title (required).
    pub title_ar: String,
    /// English title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Arabic description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    /// English description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    /// External video link, used when no file is uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Length in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Whether the lesson is visible on the website.
    pub is_published: bool,
    /// New video file.
    #[serde(skip)]
    pub video: Option<FilePart>,
    /// New poster image.
    #[serde(skip)]
    pub thumbnail: Option<FilePart>,
}

impl ResourceDraft<Lesson> for LessonDraft {
    fn from_record(record: &Lesson) -> Self {
        Self {
            title_ar: record
                .title_ar
                .clone()
                .or_else(|| record.title.clone())
                .unwrap_or_default(),
            title_en: record.title_en.clone(),
            description_ar: record
                .description_ar
                .clone()
                .or_else(|| record.description.clone()),
            description_en: record.description_en.clone(),
            video_url: record.video_url.clone(),
            duration_minutes: record.duration_minutes,
            is_published: record.is_published,
            video: None,
            thumbnail: None,
        }
    }

    fn validate(&self, mode: DraftMode) -> AppResult<()> {
        require_text(&self.title_ar, "العنوان بالعربية")?;
        if mode == DraftMode::Create
            && self.video.is_none()
            && self.video_url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            return Err(AppError::Validation(
                "يرجى رفع فيديو أو إدخال رابط الفيديو".to_owned(),
            ));
        }
        if let Some(video) = &self.video {
            validate_upload(video, UploadKind::Video)?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            validate_upload(thumbnail, UploadKind::Image)?;
        }

        Ok(())
    }

    fn into_body(mut self) -> AppResult<RequestBody> {
        let attachments = [self.video.take(), self.thumbnail.take()]
            .into_iter()
            .flatten()
            .collect();
        RequestBody::from_draft(&self, attachments)
    }
}

/// Parent or student testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Testimonial {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Author name.
    pub name: String,
    /// Arabic text.
    #[serde(default)]
    pub content_ar: Option<String>,
    /// English text.
    #[serde(default)]
    pub content_en: Option<String>,
    /// Legacy text.
    #[serde(default)]
    pub content: Option<String>,
    /// Star rating, 1 to 5.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub rating: Option<u8>,
    /// Author photo.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the testimonial is visible on the website.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_published: bool,
}

impl Testimonial {
    /// Returns the localized text.
    #[must_use]
    pub fn content(&self, locale: Locale) -> &str {
        localized(
            self.content_ar.as_deref(),
            self.content_en.as_deref(),
            self.content.as_deref(),
            locale,
        )
    }
}

impl Resource for Testimonial {
    const PATH: &'static str = "admin/testimonials";
    const COLLECTION_KEY: &'static str = "testimonials";

    type Filter = PublishedFilter;
    type Draft = TestimonialDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        self.name.clone()
    }
}

/// Testimonial create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestimonialDraft {
    /// Author name (required).
    pub name: String,
    /// Arabic text (required).
    pub content_ar: String,
    /// English text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    /// Star rating, 1 to 5 (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Whether the testimonial is visible on the website.
    pub is_published: bool,
    /// New author photo.
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl ResourceDraft<Testimonial> for TestimonialDraft {
    fn from_record(record: &Testimonial) -> Self {
        Self {
            name: record.name.clone(),
            content_ar: record
                .content_ar
                .clone()
                .or_else(|| record.content.clone())
                .unwrap_or_default(),
            content_en: record.content_en.clone(),
            rating: record.rating,
            is_published: record.is_published,
            image: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.name, "الاسم")?;
        require_text(&self.content_ar, "النص بالعربية")?;
        if !self.rating.is_some_and(|rating| (1..=5).contains(&rating)) {
            return Err(AppError::Validation(
                "التقييم يجب أن يكون من 1 إلى 5".to_owned(),
            ));
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

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tahfeez_core::Locale;

    use super::{Lesson, LessonDraft, Package, PackageDraft, TestimonialDraft};
    use crate::payload::{FilePart, RequestBody};
    use crate::resource::{DraftMode, ResourceDraft};

    #[test]
    fn package_decodes_decimal_price_and_defaults_active() {
        let package = serde_json::from_value::<Package>(json!({
            "id": 1,
            "name": "Basic",
            "name_ar": "",
            "price": "99.00",
            "features": ["جلستان أسبوعياً"]
        }));

        let Ok(package) = package else {
            unreachable!("package fixture must decode");
        };
        assert_eq!(package.name(Locale::Ar), "Basic");
        assert!(package.is_active);
        assert!((package.price - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn package_draft_rejects_negative_price() {
        let draft = PackageDraft {
            name_ar: "أساسية".to_owned(),
            price: Some(-1.0),
            ..PackageDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
    }

    #[test]
    fn lesson_create_needs_video_source() {
        let mut draft = LessonDraft {
            title_ar: "سورة الفاتحة".to_owned(),
            ..LessonDraft::default()
        };
        assert!(draft.validate(DraftMode::Create).is_err());
        assert!(draft.validate(DraftMode::Edit).is_ok());

        draft.video = Some(FilePart::new("video", "a.mov", "video/quicktime", vec![0; 8]));
        assert!(draft.validate(DraftMode::Create).is_ok());
        assert!(matches!(
            draft.into_body(),
            Ok(RequestBody::Multipart(form)) if form.files().len() == 1
        ));
    }

    #[test]
    fn lesson_rejects_image_as_video() {
        let draft = LessonDraft {
            title_ar: "درس".to_owned(),
            video: Some(FilePart::new("video", "a.png", "image/png", vec![0; 8])),
            ..LessonDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
    }

    #[test]
    fn lesson_title_uses_locale() {
        let lesson = serde_json::from_value::<Lesson>(json!({
            "id": 4,
            "title_ar": "التجويد",
            "title_en": "Tajweed",
            "is_published": "1"
        }));

        assert!(matches!(
            lesson,
            Ok(ref value) if value.title(Locale::En) == "Tajweed" && value.is_published
        ));
    }

    #[test]
    fn testimonial_rating_must_be_in_range() {
        let draft = TestimonialDraft {
            name: "أم محمد".to_owned(),
            content_ar: "تجربة رائعة".to_owned(),
            rating: Some(6),
            ..TestimonialDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
    }
}
