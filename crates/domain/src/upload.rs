use tahfeez_core::{AppError, AppResult};

use crate::payload::FilePart;

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
/// Largest accepted video upload.
pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;

const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg", "image/gif"];
const VIDEO_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/x-msvideo",
    "video/quicktime",
    "video/x-ms-wmv",
    "video/x-flv",
    "video/webm",
];

/// Kind of media a form field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// jpeg/png/jpg/gif up to 5 MB.
    Image,
    /// mp4/avi/mov/wmv/flv/webm up to 50 MB.
    Video,
}

impl UploadKind {
    /// Returns accepted MIME types.
    #[must_use]
    pub fn accepted_mime_types(&self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_MIME_TYPES,
            Self::Video => VIDEO_MIME_TYPES,
        }
    }

    /// Returns the size limit in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    /// Guesses the MIME type from a file extension.
    #[must_use]
    pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "mp4" => Some("video/mp4"),
            "avi" => Some("video/x-msvideo"),
            "mov" => Some("video/quicktime"),
            "wmv" => Some("video/x-ms-wmv"),
            "flv" => Some("video/x-flv"),
            "webm" => Some("video/webm"),
            _ => None,
        }
    }
}

/// Checks a selected file against the accepted types and size.
///
/// Advisory only; the server repeats the check.
pub fn validate_upload(part: &FilePart, kind: UploadKind) -> AppResult<()> {
    let mime_type = part.mime_type().to_ascii_lowercase();
    if !kind.accepted_mime_types().contains(&mime_type.as_str()) {
        return Err(AppError::Validation(match kind {
            UploadKind::Image => "نوع الصورة غير مدعوم، الأنواع المسموحة: jpeg, png, jpg, gif".to_owned(),
            UploadKind::Video => {
                "نوع الفيديو غير مدعوم، الأنواع المسموحة: mp4, avi, mov, wmv, flv, webm".to_owned()
            }
        }));
    }

    if part.size() > kind.max_bytes() {
        return Err(AppError::Validation(match kind {
            UploadKind::Image => "حجم الصورة يجب ألا يتجاوز 5 ميجابايت".to_owned(),
            UploadKind::Video => "حجم الفيديو يجب ألا يتجاوز 50 ميجابايت".to_owned(),
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tahfeez_core::AppError;

    use super::{MAX_IMAGE_BYTES, UploadKind, validate_upload};
    use crate::payload::FilePart;

    #[test]
    fn accepts_png_under_limit() {
        let part = FilePart::new("image", "a.png", "image/png", vec![0; 1024]);
        assert!(validate_upload(&part, UploadKind::Image).is_ok());
    }

    #[test]
    fn rejects_video_in_image_field() {
        let part = FilePart::new("image", "a.mp4", "video/mp4", vec![0; 10]);
        assert!(matches!(
            validate_upload(&part, UploadKind::Image),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_oversized_image() {
        let size = usize::try_from(MAX_IMAGE_BYTES + 1).unwrap_or(usize::MAX);
        let part = FilePart::new("image", "a.jpg", "image/jpeg", vec![0; size]);
        assert!(validate_upload(&part, UploadKind::Image).is_err());
    }

    #[test]
    fn maps_video_extensions() {
        assert_eq!(UploadKind::mime_type_for_extension("MOV"), Some("video/quicktime"));
        assert_eq!(UploadKind::mime_type_for_extension("exe"), None);
    }
}
