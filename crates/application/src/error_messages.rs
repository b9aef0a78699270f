use tahfeez_core::{AppError, Locale};

/// Returns the text shown to the user for an error.
///
/// Validation messages come from local checks or from the server's 422 body
/// and are shown verbatim.
#[must_use]
pub fn user_facing_message(error: &AppError, locale: Locale) -> String {
    match (error, locale) {
        (AppError::Validation(message), _) => message.clone(),
        (AppError::Http { message, .. }, _) if !message.trim().is_empty() => message.clone(),
        (AppError::Unauthorized(_), Locale::Ar) => {
            "انتهت الجلسة، يرجى تسجيل الدخول مرة أخرى".to_owned()
        }
        (AppError::Unauthorized(_), Locale::En) => {
            "Your session has expired, please sign in again".to_owned()
        }
        (AppError::Forbidden(_), Locale::Ar) => "ليس لديك صلاحية لتنفيذ هذا الإجراء".to_owned(),
        (AppError::Forbidden(_), Locale::En) => {
            "You are not allowed to perform this action".to_owned()
        }
        (AppError::NotFound(_), Locale::Ar) => "العنصر المطلوب غير موجود".to_owned(),
        (AppError::NotFound(_), Locale::En) => "The requested item was not found".to_owned(),
        (AppError::Transport(_), Locale::Ar) => "تعذر الاتصال بالخادم".to_owned(),
        (AppError::Transport(_), Locale::En) => "Could not reach the server".to_owned(),
        (_, Locale::Ar) => "حدث خطأ غير متوقع".to_owned(),
        (_, Locale::En) => "An unexpected error occurred".to_owned(),
    }
}
