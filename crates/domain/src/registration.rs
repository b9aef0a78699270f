use serde::Serialize;
use tahfeez_core::{AppError, AppResult};

use crate::resource::{check_email, require_text};
use crate::status::Gender;

/// Youngest and oldest age the public sign-up form accepts.
pub const REGISTRATION_AGE_RANGE: std::ops::RangeInclusive<u32> = 4..=100;

/// Public sign-up submitted from the website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    /// Student name (required).
    pub name: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone, usually WhatsApp (required).
    pub phone: String,
    /// Student age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Student gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Country of residence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Package the student wants to subscribe to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<u64>,
    /// Preferred lesson time, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    /// Additional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RegistrationForm {
    /// Runs the checks the website form enforces before submission.
    pub fn validate(&self) -> AppResult<()> {
        require_text(&self.name, "الاسم")?;
        require_text(&self.phone, "رقم الهاتف")?;
        check_email(self.email.as_deref())?;
        if let Some(age) = self.age
            && !REGISTRATION_AGE_RANGE.contains(&age)
        {
            return Err(AppError::Validation(format!(
                "العمر يجب أن يكون بين {} و {}",
                REGISTRATION_AGE_RANGE.start(),
                REGISTRATION_AGE_RANGE.end()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RegistrationForm;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "عبد الله".to_owned(),
            phone: "+201000000000".to_owned(),
            ..RegistrationForm::default()
        }
    }

    #[test]
    fn minimal_form_is_valid() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn phone_is_required() {
        let form = RegistrationForm {
            phone: " ".to_owned(),
            ..valid_form()
        };

        assert!(form.validate().is_err());
    }

    #[test]
    fn age_outside_range_is_rejected() {
        let young = RegistrationForm {
            age: Some(3),
            ..valid_form()
        };
        let ok = RegistrationForm {
            age: Some(4),
            ..valid_form()
        };

        assert!(young.validate().is_err());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = RegistrationForm {
            email: Some("not-an-email".to_owned()),
            ..valid_form()
        };

        assert!(form.validate().is_err());
    }
}
