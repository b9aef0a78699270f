use std::ffi::OsStr;
use std::path::Path;

use tahfeez_core::{AppError, AppResult};
use tahfeez_domain::{AccountStatus, FilePart, Gender, StudentDraft, TeacherDraft, UploadKind};

use crate::cli::RecordFields;

const IMAGE_FIELD: &str = "image";
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Parsed `create`/`update` flags, with the picture already read from disk.
#[derive(Debug, Default)]
pub struct FormValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub gender: Option<Gender>,
    pub status: Option<AccountStatus>,
    pub age: Option<u32>,
    pub country: Option<String>,
    pub teacher_id: Option<u64>,
    pub package_id: Option<u64>,
    pub hourly_rate: Option<f64>,
    pub bio_ar: Option<String>,
    pub bio_en: Option<String>,
    pub image: Option<FilePart>,
}

impl FormValues {
    pub async fn from_fields(fields: RecordFields) -> AppResult<Self> {
        let gender = fields.gender.as_deref().map(str::parse::<Gender>).transpose()?;
        let status = fields
            .status
            .as_deref()
            .map(str::parse::<AccountStatus>)
            .transpose()?;
        let image = match fields.image.as_deref() {
            Some(path) => Some(read_image(path).await?),
            None => None,
        };

        Ok(Self {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            password: fields.password,
            gender,
            status,
            age: fields.age,
            country: fields.country,
            teacher_id: fields.teacher_id,
            package_id: fields.package_id,
            hourly_rate: fields.hourly_rate,
            bio_ar: fields.bio_ar,
            bio_en: fields.bio_en,
            image,
        })
    }
}

/// Loads a picture for upload, typing it by file extension. Unknown
/// extensions are left for the draft's upload check to reject.
pub async fn read_image(path: &Path) -> AppResult<FilePart> {
    let bytes = tokio::fs::read(path).await.map_err(|error| {
        AppError::Validation(format!("تعذر قراءة الملف {}: {error}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(IMAGE_FIELD);
    let mime_type = path
        .extension()
        .and_then(OsStr::to_str)
        .and_then(UploadKind::mime_type_for_extension)
        .unwrap_or(UNKNOWN_MIME_TYPE);

    Ok(FilePart::new(IMAGE_FIELD, file_name, mime_type, bytes))
}

/// Copies the given flags onto an open draft, leaving the rest untouched.
pub trait FillDraft {
    fn fill(&mut self, values: FormValues) -> AppResult<()>;
}

impl FillDraft for StudentDraft {
    fn fill(&mut self, values: FormValues) -> AppResult<()> {
        reject_unused(&[
            ("hourly-rate", values.hourly_rate.is_some()),
            ("bio-ar", values.bio_ar.is_some()),
            ("bio-en", values.bio_en.is_some()),
            ("image", values.image.is_some()),
        ])?;

        if let Some(name) = values.name {
            self.name = name;
        }
        replace(&mut self.email, values.email);
        replace(&mut self.phone, values.phone);
        replace(&mut self.password, values.password);
        replace(&mut self.gender, values.gender);
        replace(&mut self.status, values.status);
        replace(&mut self.age, values.age);
        replace(&mut self.country, values.country);
        replace(&mut self.teacher_id, values.teacher_id);
        replace(&mut self.package_id, values.package_id);
        Ok(())
    }
}

impl FillDraft for TeacherDraft {
    fn fill(&mut self, values: FormValues) -> AppResult<()> {
        reject_unused(&[
            ("age", values.age.is_some()),
            ("country", values.country.is_some()),
            ("teacher-id", values.teacher_id.is_some()),
            ("package-id", values.package_id.is_some()),
        ])?;

        if let Some(name) = values.name {
            self.name = name;
        }
        if let Some(email) = values.email {
            self.email = email;
        }
        replace(&mut self.phone, values.phone);
        replace(&mut self.password, values.password);
        replace(&mut self.gender, values.gender);
        replace(&mut self.status, values.status);
        replace(&mut self.hourly_rate, values.hourly_rate);
        replace(&mut self.bio_ar, values.bio_ar);
        replace(&mut self.bio_en, values.bio_en);
        replace(&mut self.image, values.image);
        Ok(())
    }
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn reject_unused(flags: &[(&str, bool)]) -> AppResult<()> {
    match flags.iter().find(|(_, given)| *given) {
        Some((flag, _)) => Err(AppError::Validation(format!(
            "الخيار --{flag} غير متاح لهذا النوع"
        ))),
        None => Ok(()),
    }
}
