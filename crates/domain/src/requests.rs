use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tahfeez_core::{AppError, AppResult, Locale};

use crate::lenient;
use crate::payload::RequestBody;
use crate::resource::{
    DraftMode, PersonRef, QueryPairs, Resource, ResourceDraft, ResourceFilter, person_name,
    require_id, require_text,
};
use crate::status::{ComplaintStatus, ReviewStatus};

/// Admin decision on a reviewable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the request.
    Approve {
        /// Optional note stored with the approval.
        note: Option<String>,
    },
    /// Refuse the request.
    Reject {
        /// Reason shown to the student (required).
        reason: String,
    },
}

impl ReviewDecision {
    /// Returns the endpoint segment for this decision.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
        }
    }

    /// Checks that a rejection carries a reason.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Reject { reason } if reason.trim().is_empty() => Err(AppError::Validation(
                "يرجى كتابة سبب الرفض".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    /// Returns the JSON body sent with the decision.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Approve { note: Some(note) } if !note.trim().is_empty() => {
                json!({ "admin_notes": note.trim() })
            }
            Self::Approve { .. } => json!({}),
            Self::Reject { reason } => json!({ "rejection_reason": reason.trim() }),
        }
    }
}

/// Complaint raised by a student or guardian.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Complaint {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Complaining student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// Teacher concerned, if any.
    #[serde(default)]
    pub teacher: Option<PersonRef>,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Complaint body.
    #[serde(default)]
    pub message: String,
    /// Handling state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ComplaintStatus,
    /// Admin answer.
    #[serde(default)]
    pub admin_reply: Option<String>,
    /// Submission time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Complaint {
    const PATH: &'static str = "admin/complaints";
    const COLLECTION_KEY: &'static str = "complaints";

    type Filter = ComplaintFilter;
    type Draft = ComplaintDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        self.subject.clone()
    }
}

/// Filters of the complaints page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    /// Subject or student search.
    pub search: Option<String>,
    /// Handling state.
    pub status: Option<ComplaintStatus>,
}

impl ResourceFilter for ComplaintFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("search", self.search.as_deref())
            .text("status", self.status.as_ref().map(ComplaintStatus::as_str))
            .finish()
    }

    fn with_search(self, search: Option<String>) -> Self {
        Self { search, ..self }
    }
}

/// Complaint create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintDraft {
    /// Complaining student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Teacher concerned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<u64>,
    /// Subject line (required).
    pub subject: String,
    /// Complaint body (required).
    pub message: String,
    /// Handling state.
    pub status: ComplaintStatus,
    /// Admin answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
}

impl ResourceDraft<Complaint> for ComplaintDraft {
    fn from_record(record: &Complaint) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            teacher_id: record.teacher.as_ref().map(|teacher| teacher.id),
            subject: record.subject.clone(),
            message: record.message.clone(),
            status: record.status,
            admin_reply: record.admin_reply.clone(),
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_text(&self.subject, "الموضوع")?;
        require_text(&self.message, "الرسالة")
    }

    fn into_body(self) -> AppResult<RequestBody> {
        RequestBody::from_draft(&self, Vec::new())
    }
}

/// Student request to move their lesson schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleChangeRequest {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Requesting student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// Current teacher.
    #[serde(default)]
    pub teacher: Option<PersonRef>,
    /// Schedule in effect.
    #[serde(default)]
    pub current_schedule: Option<String>,
    /// Schedule asked for.
    #[serde(default)]
    pub requested_schedule: String,
    /// Student's reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Review state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ReviewStatus,
    /// Notes left by the reviewing admin.
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Submission time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for ScheduleChangeRequest {
    const PATH: &'static str = "admin/schedule-change-requests";
    const COLLECTION_KEY: &'static str = "schedule_change_requests";

    type Filter = ReviewFilter;
    type Draft = ScheduleChangeDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        format!(
            "{}: {}",
            person_name(self.student.as_ref()),
            self.requested_schedule
        )
    }
}

/// Filters shared by pages listing reviewable requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Review state.
    pub status: Option<ReviewStatus>,
    /// Requesting student.
    pub student_id: Option<u64>,
}

impl ReviewFilter {
    /// Filter matching requests still waiting for a decision.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: Some(ReviewStatus::Pending),
            student_id: None,
        }
    }
}

impl ResourceFilter for ReviewFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .text("status", self.status.as_ref().map(ReviewStatus::as_str))
            .id("student_id", self.student_id)
            .finish()
    }

    fn with_search(self, _search: Option<String>) -> Self {
        self
    }
}

/// Schedule change create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleChangeDraft {
    /// Requesting student (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Schedule in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_schedule: Option<String>,
    /// Schedule asked for (required).
    pub requested_schedule: String,
    /// Student's reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ResourceDraft<ScheduleChangeRequest> for ScheduleChangeDraft {
    fn from_record(record: &ScheduleChangeRequest) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            current_schedule: record.current_schedule.clone(),
            requested_schedule: record.requested_schedule.clone(),
            reason: record.reason.clone(),
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_id(self.student_id, "الطالب")?;
        require_text(&self.requested_schedule, "الموعد المطلوب")
    }

    fn into_body(self) -> AppResult<RequestBody> {
        RequestBody::from_draft(&self, Vec::new())
    }
}

/// Student request to pause their subscription for a period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionPause {
    /// Server identifier.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: u64,
    /// Requesting student.
    #[serde(default)]
    pub student: Option<PersonRef>,
    /// First paused day.
    pub start_date: NaiveDate,
    /// Last paused day.
    pub end_date: NaiveDate,
    /// Student's reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Review state.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ReviewStatus,
    /// Notes left by the reviewing admin.
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl SubscriptionPause {
    /// Returns the paused period length in days, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Resource for SubscriptionPause {
    const PATH: &'static str = "admin/subscription-pauses";
    const COLLECTION_KEY: &'static str = "subscription_pauses";

    type Filter = ReviewFilter;
    type Draft = SubscriptionPauseDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self, _locale: Locale) -> String {
        format!(
            "{} ({} → {})",
            person_name(self.student.as_ref()),
            self.start_date,
            self.end_date
        )
    }
}

/// Subscription pause create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionPauseDraft {
    /// Requesting student (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// First paused day (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last paused day (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Student's reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ResourceDraft<SubscriptionPause> for SubscriptionPauseDraft {
    fn from_record(record: &SubscriptionPause) -> Self {
        Self {
            student_id: record.student.as_ref().map(|student| student.id),
            start_date: Some(record.start_date),
            end_date: Some(record.end_date),
            reason: record.reason.clone(),
        }
    }

    fn validate(&self, _mode: DraftMode) -> AppResult<()> {
        require_id(self.student_id, "الطالب")?;
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(AppError::Validation(
                "يرجى تحديد تاريخ البداية والنهاية".to_owned(),
            ));
        };
        if end < start {
            return Err(AppError::Validation(
                "تاريخ النهاية يجب أن يكون بعد تاريخ البداية".to_owned(),
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
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{
        ComplaintDraft, ComplaintFilter, ReviewDecision, ReviewFilter, SubscriptionPause,
        SubscriptionPauseDraft,
    };
    use crate::resource::{DraftMode, ResourceDraft, ResourceFilter};
    use crate::status::ComplaintStatus;

    #[test]
    fn rejection_requires_reason() {
        let blank = ReviewDecision::Reject {
            reason: "  ".to_owned(),
        };
        let approve = ReviewDecision::Approve { note: None };

        assert!(blank.validate().is_err());
        assert!(approve.validate().is_ok());
        assert_eq!(approve.action(), "approve");
        assert_eq!(approve.payload(), json!({}));
    }

    #[test]
    fn rejection_payload_carries_trimmed_reason() {
        let decision = ReviewDecision::Reject {
            reason: " الموعد غير متاح ".to_owned(),
        };

        assert_eq!(decision.action(), "reject");
        assert_eq!(
            decision.payload(),
            json!({ "rejection_reason": "الموعد غير متاح" })
        );
    }

    #[test]
    fn complaint_requires_subject_and_message() {
        let draft = ComplaintDraft {
            subject: "تأخر المعلم".to_owned(),
            ..ComplaintDraft::default()
        };

        assert!(draft.validate(DraftMode::Create).is_err());
    }

    #[test]
    fn complaint_filter_sends_status_wire_value() {
        let filter = ComplaintFilter {
            search: None,
            status: Some(ComplaintStatus::InProgress),
        };

        assert_eq!(
            filter.query_pairs(),
            vec![("status", "in_progress".to_owned())]
        );
    }

    #[test]
    fn pending_review_filter_is_active() {
        assert!(ReviewFilter::pending().is_active());
        assert!(!ReviewFilter::default().is_active());
    }

    #[test]
    fn pause_end_must_not_precede_start() {
        let draft = SubscriptionPauseDraft {
            student_id: Some(3),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            reason: None,
        };

        assert!(draft.validate(DraftMode::Create).is_err());

        let same_day = SubscriptionPauseDraft {
            end_date: draft.start_date,
            ..draft
        };
        assert!(same_day.validate(DraftMode::Create).is_ok());
    }

    #[test]
    fn pause_days_include_both_ends() {
        let pause = serde_json::from_value::<SubscriptionPause>(json!({
            "id": 1,
            "start_date": "2024-05-01",
            "end_date": "2024-05-10",
            "status": "approved"
        }));

        assert!(matches!(pause, Ok(ref value) if value.days() == 10));
    }
}
