use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tahfeez_core::{AppResult, Locale};

use crate::lenient;
use crate::localized::localized;
use crate::payload::{FilePart, RequestBody};
use crate::resource::{
    DraftMode, PackageRef, PersonRef, QueryPairs, Resource, ResourceDraft, ResourceFilter,
    check_email, require_text,
};
use crate::status::{AccountStatus, Gender};
use crate::upload::{UploadKind, validate_upload};

/// Student enrolled in the academy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone, usually WhatsApp.
    #[serde(default)]
    pub phone: Option<String>,
    /// Gender.
    #[serde(default, deserialize_with = "lenient::known")]
    pub gender: Option<Gender>,
    /// Age in years.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub age: Option<u32>,
    /// Country of residence.
    #[serde(default)]
    pub country: Option<String>,
    /// Account state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: AccountStatus,
    /// Assigned teacher.
    #[serde(default)]
    pub teacher: Option<PersonRef>,
    /// Subscribed package.
    #[serde(default)]
    pub package: Option<PackageRef>,
    /// Sessions the server has marked completed.
    #[serde(default, deserialize_with = "lenient::count")]
    pub completed_sessions: u32,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Student {
    const PATH: &'static str = "admin/students";
    const COLLECTION_KEY: &'static str = "students";

    type Filter = StudentFilter;
    type Draft = StudentDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        self.name.clone()
    }
}

/// Filters of the students page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Name, email or phone search.
    pub search: Option<String>,
    /// Account state.
    pub status: Option<AccountStatus>,
    /// Assigned teacher.
    pub teacher_id: Option<u64>,
    /// Subscribed package.
    pub package_id: Option<u64>,
}

impl ResourceFilter for StudentFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .text("status", self.status.as_ref().map(AccountStatus::as_str))
            .id("teacher_id", self.teacher_id)
            .id("package_id", self.package_id)
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Student create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentDraft {
    /// Full name (required).
    pub name: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Login password; left empty on edit to keep the current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Country of residence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Assigned teacher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<u64>,
    /// Subscribed package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<u64>,
    /// Account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

impl ResourceDraft<Student> for StudentDraft {
    fn from_record(record: &Student) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            password: None,
            gender: record.gender,
            age: record.age,
            country: record.country.clone(),
            teacher_id: record.teacher.as_ref().map(|teacher| teacher.id),
            package_id: record.package.as_ref().map(|package| package.id),
            status: Some(record.status),
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.name, "الاسم")?;
        check_email(self.email.as_deref())
    }

    fn into_body(self) -> AppResult<RequestBody> {
        RequestBody::from_draft(&self, Vec::new())
    }
}

/// Teacher employed by the academy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Teacher {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Gender.
    #[serde(default, deserialize_with = "lenient::known")]
    pub gender: Option<Gender>,
    /// Arabic biography.
    #[serde(default)]
    pub bio_ar: Option<String>,
    /// English biography.
    #[serde(default)]
    pub bio_en: Option<String>,
    /// Legacy biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Hourly rate used by salary calculation.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub hourly_rate: Option<f64>,
    /// Account state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: AccountStatus,
    /// Profile picture.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Number of assigned students.
    #[serde(default, deserialize_with = "lenient::count")]
    pub students_count: u32,
}

impl Teacher {
    /// Returns the localized biography.
    #[must_use]
    pub fn bio(&self, locale: Locale) -> &str {
        localized(
            self.bio_ar.as_deref(),
            self.bio_en.as_deref(),
            self.bio.as_deref(),
            locale,
        )
    }
}

impl Resource for Teacher {
    const PATH: &'static str = "admin/teachers";
    const COLLECTION_KEY: &'static str = "teachers";

    type Filter = TeacherFilter;
    type Draft = TeacherDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        self.name.clone()
    }
}

/// Filters of the teachers page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherFilter {
    /// Name, email or phone search.
    pub search: Option<String>,
    /// Account state.
    pub status: Option<AccountStatus>,
}

impl ResourceFilter for TeacherFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .text("status", self.status.as_ref().map(AccountStatus::as_str))
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Teacher create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeacherDraft {
    /// Full name (required).
    pub name: String,
    /// Contact email (required).
    pub email: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Login password; left empty on edit to keep the current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Hourly rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// Arabic biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_ar: Option<String>,
    /// English biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_en: Option<String>,
    /// Account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    /// New profile picture.
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl ResourceDraft<Teacher> for TeacherDraft {
    fn from_record(record: &Teacher) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone().unwrap_or_default(),
            phone: record.phone.clone(),
            password: None,
            gender: record.gender,
            hourly_rate: record.hourly_rate,
            bio_ar: record.bio_ar.clone(),
            bio_en: record.bio_en.clone(),
            status: Some(record.status),
            image: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.name, "الاسم")?;
        require_text(&self.email, "البريد الإلكتروني")?;
        check_email(Some(self.email.as_str()))?;
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

/// Supervisor account with access to the admin dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Supervisor {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Account state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: AccountStatus,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Supervisor {
    const PATH: &'static str = "admin/supervisors";
    const COLLECTION_KEY: &'static str = "supervisors";

    type Filter = SupervisorFilter;
    type Draft = SupervisorDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        self.name.clone()
    }
}

/// Filters of the supervisors page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorFilter {
    /// Name or email search.
    pub search: Option<String>,
    /// Account state.
    pub status: Option<AccountStatus>,
}

impl ResourceFilter for SupervisorFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .text("status", self.status.as_ref().map(AccountStatus::as_str))
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Supervisor create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupervisorDraft {
    /// Full name (required).
    pub name: String,
    /// Login email (required).
    pub email: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Password, required when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

impl ResourceDraft<Supervisor> for SupervisorDraft {
    fn from_record(record: &Supervisor) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone().unwrap_or_default(),
            phone: record.phone.clone(),
            password: None,
            status: Some(record.status),
        }
    }

    fn validate(&self, mode: DraftMode) -> AppResult<()> {
        require_text(&self.name, "الاسم")?;
        require_text(&self.email, "البريد الإلكتروني")?;
        check_email(Some(self.email.as_str()))?;
        if mode == DraftMode::Create {
            require_text(self.password.as_deref().unwrap_or_default(), "كلمة المرور")?;
        }

        Ok(())
    }

    fn into_body(self) -> AppResult<RequestBody> {
        RequestBody::from_draft(&self, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tahfeez_core::Locale;

    use super::{Student, StudentFilter, SupervisorDraft, Teacher, TeacherDraft};
    use crate::payload::{FilePart, RequestBody};
    use crate::resource::{DraftMode, Resource, ResourceDraft, ResourceFilter};
    use crate::status::AccountStatus;

    #[test]
    fn student_decodes_with_nested_references() {
        let student = serde_json::from_value::<Student>(json!({
            "id": 3,
            "name": "عبدالله",
            "status": "active",
            "teacher": {"id": 9, "name": "الشيخ أحمد"},
            "package": {"id": 2, "name_ar": "الباقة الذهبية"},
            "completed_sessions": 12,
            "created_at": "2024-05-01T10:00:00.000000Z"
        }));

        let Ok(student) = student else {
            unreachable!("student fixture must decode");
        };
        assert_eq!(student.id(), 3);
        assert_eq!(student.teacher.map(|teacher| teacher.id), Some(9));
        assert_eq!(
            student.package.as_ref().map(|package| package.name(Locale::En)),
            Some("الباقة الذهبية")
        );
        assert!(student.created_at.is_some());
    }

    #[test]
    fn loosely_typed_rows_still_decode() {
        let student = serde_json::from_value::<Student>(json!({
            "id": "3",
            "name": "عبدالله",
            "status": null,
            "completed_sessions": null,
            "age": "12",
            "gender": ""
        }));
        let teacher = serde_json::from_value::<Teacher>(json!({
            "id": 9,
            "name": "الشيخ أحمد",
            "status": null,
            "students_count": "4"
        }));

        assert!(matches!(
            student,
            Ok(Student {
                id: 3,
                age: Some(12),
                completed_sessions: 0,
                status: AccountStatus::Active,
                gender: None,
                ..
            })
        ));
        assert!(matches!(
            teacher,
            Ok(Teacher {
                status: AccountStatus::Active,
                students_count: 4,
                ..
            })
        ));
    }

    #[test]
    fn student_filter_encodes_only_set_values() {
        let filter = StudentFilter {
            status: Some(AccountStatus::Inactive),
            ..StudentFilter::default()
        }
        .with_search(Some("علي".to_owned()));

        assert!(filter.is_active());
        assert_eq!(
            filter.query_pairs(),
            vec![("search", "علي".to_owned()), ("status", "inactive".to_owned())]
        );
        assert!(!StudentFilter::default().is_active());
    }

    #[test]
    fn teacher_draft_requires_name() {
        let draft = TeacherDraft {
            email: "t@academy.com".to_owned(),
            ..TeacherDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
    }

    #[test]
    fn teacher_draft_with_image_becomes_multipart() {
        let draft = TeacherDraft {
            name: "أحمد".to_owned(),
            email: "t@academy.com".to_owned(),
            image: Some(FilePart::new("image", "t.jpg", "image/jpeg", vec![1])),
            ..TeacherDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_ok());
        assert!(matches!(draft.into_body(), Ok(body) if body.is_multipart()));
    }

    #[test]
    fn teacher_bio_falls_back_to_legacy() {
        let teacher = serde_json::from_value::<Teacher>(json!({
            "id": 1,
            "name": "أحمد",
            "bio": "حافظ للقرآن",
            "hourly_rate": "12.50"
        }));

        assert!(matches!(teacher, Ok(ref value) if value.bio(Locale::En) == "حافظ للقرآن"));
        assert!(matches!(teacher, Ok(ref value) if value.hourly_rate == Some(12.5)));
    }

    #[test]
    fn supervisor_password_required_only_on_create() {
        let draft = SupervisorDraft {
            name: "سارة".to_owned(),
            email: "s@academy.com".to_owned(),
            ..SupervisorDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
        assert!(draft.validate(DraftMode::Edit).is_ok());
        assert!(matches!(draft.into_body(), Ok(RequestBody::Json(_))));
    }
}
