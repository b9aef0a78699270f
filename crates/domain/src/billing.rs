use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tahfeez_core::{AppError, AppResult, Locale};

use crate::lenient;
use crate::payload::{FilePart, RequestBody};
use crate::resource::{
    DraftMode, PersonRef, QueryPairs, Resource, ResourceDraft, ResourceFilter, person_name,
    require_id,
};
use crate::status::{ReviewStatus, SalaryStatus};
use crate::upload::{UploadKind, validate_upload};

/// Checks a `YYYY-MM` month value.
pub fn validate_month(value: &str) -> AppResult<()> {
    let value = value.trim();
    let valid = value.len() == 7
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();
    if !valid {
        return Err(AppError::Validation(
            "صيغة الشهر غير صحيحة (YYYY-MM)".to_owned(),
        ));
    }

    Ok(())
}

/// Proof of a subscription payment uploaded for admin review.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentReceipt {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Paying student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// Amount paid.
    #[serde(deserialize_with = "lenient::decimal")]
    pub amount: f64,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Billed month in `YYYY-MM` form.
    #[serde(default)]
    pub month: Option<String>,
    /// Transfer channel, e.g. bank or wallet.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Uploaded proof image.
    #[serde(default)]
    pub receipt_image_url: Option<String>,
    /// Review state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ReviewStatus,
    /// Reason given when rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Upload time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for PaymentReceipt {
    const PATH: &'static str = "admin/payment-receipts";
    const COLLECTION_KEY: &'static str = "payment_receipts";

    type Filter = ReceiptFilter;
    type Draft = PaymentReceiptDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        let currency = self.currency.as_deref().unwrap_or("USD");
        format!(
            "{} - {:.2} {currency}",
            person_name(self.student.as_ref()),
            self.amount
        )
    }
}

/// Filters of the payment receipts page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptFilter {
    /// Review state.
    pub status: Option<ReviewStatus>,
    /// Paying student.
    pub student_id: Option<u64>,
    /// Billed month in `YYYY-MM` form.
    pub month: Option<String>,
}

impl ReceiptFilter {
    /// Filter matching receipts still waiting for review.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: Some(ReviewStatus::Pending),
            ..Self::default()
        }
    }
}

impl ResourceFilter for ReceiptFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("status", self.status.as_ref().map(ReviewStatus::as_str))
            .id("student_id", self.student_id)
            .text("month", self.month.as_deref())
            .finish()
    }

    fn with_search(self, _search: Option<String>) -> Self {
        self
    }
}

/// Payment receipt create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentReceiptDraft {
    /// Paying student (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Amount paid (required, positive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// ISO currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Billed month in `YYYY-MM` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Transfer channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Proof image; required for new receipts.
    #[serde(skip)]
    pub receipt_image: Option<FilePart>,
}

impl ResourceDraft<PaymentReceipt> for PaymentReceiptDraft {
    fn from_record(record: &PaymentReceipt) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            amount: Some(record.amount),
            currency: record.currency.clone(),
            month: record.month.clone(),
            payment_method: record.payment_method.clone(),
            receipt_image: None,
        }
    }

    fn validate(&self, mode: DraftMode) -> AppResult<()> {
        require_id(self.student_id, "الطالب")?;
        match self.amount {
            Some(amount) if amount > 0.0 && amount.is_finite() => {}
            _ => {
                return Err(AppError::Validation(
                    "المبلغ يجب أن يكون أكبر من صفر".to_owned(),
                ));
            }
        }
        if let Some(month) = self.month.as_deref() {
            validate_month(month)?;
        }
        match (&self.receipt_image, mode) {
            (Some(image), _) => validate_upload(image, UploadKind::Image)?,
            (None, DraftMode::Create) => {
                return Err(AppError::Validation("يرجى إرفاق صورة الإيصال".to_owned()));
            }
            (None, DraftMode::Edit) => {}
        }

        Ok(())
    }

    fn into_body(mut self) -> AppResult<RequestBody> {
        let attachments = self.receipt_image.take().into_iter().collect();
        RequestBody::from_draft(&self, attachments)
    }
}

/// Monthly salary computed by the backend for one teacher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryCalculation {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Paid teacher.
    #[serde(default)]
    pub teacher: Option<PersonRef>,
    /// Month in `YYYY-MM` form.
    pub month: String,
    /// Completed sessions counted by the server.
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_sessions: u32,
    /// Hours counted by the server.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_hours: f64,
    /// Rate applied.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub hourly_rate: f64,
    /// Bonus added by an admin.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub bonus: f64,
    /// Deductions applied by an admin.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub deductions: f64,
    /// Final amount; always computed server-side.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_amount: f64,
    /// Payout state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: SalaryStatus,
    /// Payout time.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Resource for SalaryCalculation {
    const PATH: &'static str = "admin/salaries";
    const COLLECTION_KEY: &'static str = "salaries";

    type Filter = SalaryFilter;
    type Draft = SalaryDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        format!("{} ({})", person_name(self.teacher.as_ref()), self.month)
    }
}

/// Filters of the salaries page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryFilter {
    /// Paid teacher.
    pub teacher_id: Option<u64>,
    /// Month in `YYYY-MM` form.
    pub month: Option<String>,
    /// Payout state.
    pub status: Option<SalaryStatus>,
}

impl ResourceFilter for SalaryFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .id("teacher_id", self.teacher_id)
            .text("month", self.month.as_deref())
            .text("status", self.status.as_ref().map(SalaryStatus::as_str))
            .finish()
    }

    fn with_search(self, _search: Option<String>) -> Self {
        self
    }
}

/// Salary adjustment form; totals stay server-computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalaryDraft {
    /// Paid teacher (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<u64>,
    /// Month in `YYYY-MM` form (required).
    pub month: String,
    /// Bonus to add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    /// Deductions to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductions: Option<f64>,
    /// Admin notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResourceDraft<SalaryCalculation> for SalaryDraft {
    fn from_record(record: &SalaryCalculation) -> Self {
        Self {
            teacher_id: record.teacher.as_ref().map(|teacher| teacher.id),
            month: record.month.clone(),
            bonus: Some(record.bonus),
            deductions: Some(record.deductions),
            notes: None,
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_id(self.teacher_id, "المعلم")?;
        validate_month(&self.month)?;
        if [self.bonus, self.deductions]
            .into_iter()
            .flatten()
            .any(|value| value < 0.0 || !value.is_finite())
        {
            return Err(AppError::Validation(
                "المكافآت والخصومات يجب أن تكون أرقاماً موجبة".to_owned(),
            ));
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

    use super::{
        PaymentReceipt, PaymentReceiptDraft, SalaryCalculation, SalaryDraft, validate_month,
    };
    use crate::payload::FilePart;
    use crate::resource::{DraftMode, Resource, ResourceDraft};
    use crate::status::SalaryStatus;

    #[test]
    fn month_format() {
        assert!(validate_month("2024-06").is_ok());
        assert!(validate_month("2024-6").is_err());
        assert!(validate_month("2024-13").is_err());
        assert!(validate_month("June").is_err());
    }

    #[test]
    fn new_receipt_requires_proof_image() {
        let draft = PaymentReceiptDraft {
            student_id: Some(4),
            amount: Some(50.0),
            ..PaymentReceiptDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
        assert!(draft.validate(DraftMode::Edit).is_ok());

        let with_proof = PaymentReceiptDraft {
            receipt_image: Some(FilePart::new(
                "receipt_image",
                "proof.png",
                "image/png",
                vec![0; 64],
            )),
            ..draft
        };
        assert!(with_proof.validate(DraftMode::Create).is_ok());
    }

    #[test]
    fn receipt_amount_must_be_positive() {
        let draft = PaymentReceiptDraft {
            student_id: Some(4),
            amount: Some(0.0),
            ..PaymentReceiptDraft::default()
        };

        assert!(draft.validate(DraftMode::Edit).is_err());
    }

    #[test]
    fn receipt_decodes_string_amount() {
        let receipt = serde_json::from_value::<PaymentReceipt>(json!({
            "id": 9,
            "student": {"id": 4, "name": "يوسف"},
            "amount": "45.50",
            "currency": "USD",
            "status": "pending"
        }));

        assert!(matches!(
            receipt,
            Ok(ref value) if value.display_name(Locale::Ar) == "يوسف - 45.50 USD"
        ));
    }

    #[test]
    fn salary_decodes_server_totals() {
        let salary = serde_json::from_value::<SalaryCalculation>(json!({
            "id": 3,
            "teacher": {"id": 2, "name": "أ. خالد"},
            "month": "2024-06",
            "total_sessions": 40,
            "total_hours": "20.0",
            "hourly_rate": "8.00",
            "total_amount": "160.00",
            "status": "paid"
        }));
        let Ok(salary) = salary else {
            unreachable!("salary fixture must decode");
        };

        assert!((salary.total_amount - 160.0).abs() < f64::EPSILON);
        assert_eq!(salary.status, SalaryStatus::Paid);
        assert!(SalaryDraft::from_record(&salary)
            .validate(DraftMode::Edit)
            .is_ok());
    }

    #[test]
    fn salary_adjustments_reject_negative_values() {
        let draft = SalaryDraft {
            teacher_id: Some(2),
            month: "2024-06".to_owned(),
            bonus: Some(-5.0),
            ..SalaryDraft::default()
        };

        assert!(draft.validate(DraftMode::Edit).is_err());
    }
}
