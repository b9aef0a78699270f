use serde_json::{Value, json};
use tahfeez_core::{AppError, AppResult, Locale};
use tahfeez_domain::{ComplaintStatus, ReviewDecision};

use crate::api_ports::ApiMethod;

/// Named workflow endpoint on a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// Approve or reject a receipt, schedule change or pause request.
    Review(ReviewDecision),
    /// Move a complaint to another handling state.
    ComplaintStatus {
        /// Target state.
        status: ComplaintStatus,
        /// Optional answer stored with the change.
        reply: Option<String>,
    },
    /// Mark a calculated salary as paid.
    MarkSalaryPaid,
}

impl RecordAction {
    /// Returns the HTTP method of the endpoint.
    #[must_use]
    pub fn method(&self) -> ApiMethod {
        match self {
            Self::Review(_) => ApiMethod::Post,
            Self::ComplaintStatus { .. } | Self::MarkSalaryPaid => ApiMethod::Patch,
        }
    }

    /// Returns the path segment appended to the record path.
    #[must_use]
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Review(decision) => decision.action(),
            Self::ComplaintStatus { .. } => "status",
            Self::MarkSalaryPaid => "pay",
        }
    }

    /// Returns the JSON body of the request.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Review(decision) => decision.payload(),
            Self::ComplaintStatus { status, reply } => {
                let mut payload = json!({ "status": status.as_str() });
                if let Some(reply) = reply.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
                    payload["admin_reply"] = Value::String(reply.to_owned());
                }
                payload
            }
            Self::MarkSalaryPaid => json!({}),
        }
    }

    /// Checks the action before it is sent.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Review(decision) => decision.validate(),
            Self::ComplaintStatus {
                status: ComplaintStatus::Unknown,
                ..
            } => Err(AppError::Validation("حالة الشكوى غير صالحة".to_owned())),
            Self::ComplaintStatus { .. } | Self::MarkSalaryPaid => Ok(()),
        }
    }

    /// Returns the prompt shown before running the action, if it needs one.
    #[must_use]
    pub fn confirmation_prompt(&self, locale: Locale) -> Option<&'static str> {
        match (self, locale) {
            (Self::Review(ReviewDecision::Approve { .. }), Locale::Ar) => {
                Some("هل أنت متأكد من قبول هذا الطلب؟")
            }
            (Self::Review(ReviewDecision::Approve { .. }), Locale::En) => {
                Some("Are you sure you want to approve this request?")
            }
            (Self::MarkSalaryPaid, Locale::Ar) => Some("هل تريد تأكيد صرف هذا الراتب؟"),
            (Self::MarkSalaryPaid, Locale::En) => Some("Confirm this salary has been paid?"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tahfeez_core::Locale;
    use tahfeez_domain::{ComplaintStatus, ReviewDecision};

    use super::RecordAction;
    use crate::api_ports::ApiMethod;

    #[test]
    fn complaint_status_is_a_patch_with_trimmed_reply() {
        let action = RecordAction::ComplaintStatus {
            status: ComplaintStatus::Resolved,
            reply: Some(" تم التواصل مع المعلم ".to_owned()),
        };

        assert_eq!(action.method(), ApiMethod::Patch);
        assert_eq!(action.segment(), "status");
        assert_eq!(
            action.payload(),
            json!({"status": "resolved", "admin_reply": "تم التواصل مع المعلم"})
        );
    }

    #[test]
    fn unknown_complaint_status_is_refused() {
        let action = RecordAction::ComplaintStatus {
            status: ComplaintStatus::Unknown,
            reply: None,
        };

        assert!(action.validate().is_err());
    }

    #[test]
    fn only_approval_and_payment_ask_for_confirmation() {
        let approve = RecordAction::Review(ReviewDecision::Approve { note: None });
        let reject = RecordAction::Review(ReviewDecision::Reject {
            reason: "صورة غير واضحة".to_owned(),
        });

        assert!(approve.confirmation_prompt(Locale::Ar).is_some());
        assert!(RecordAction::MarkSalaryPaid.confirmation_prompt(Locale::En).is_some());
        assert!(reject.confirmation_prompt(Locale::Ar).is_none());
    }
}
