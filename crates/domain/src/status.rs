use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tahfeez_core::{AppError, Locale};

/// Account state of students, teachers and supervisors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account in good standing.
    #[default]
    Active,
    /// Account disabled by an admin.
    Inactive,
    /// Account suspended, typically for missing payment.
    Suspended,
    /// Value this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl AccountStatus {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Active, Locale::Ar) => "نشط",
            (Self::Active, Locale::En) => "Active",
            (Self::Inactive, Locale::Ar) => "غير نشط",
            (Self::Inactive, Locale::En) => "Inactive",
            (Self::Suspended, Locale::Ar) => "موقوف",
            (Self::Suspended, Locale::En) => "Suspended",
            (Self::Unknown, Locale::Ar) => "غير معروف",
            (Self::Unknown, Locale::En) => "Unknown",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(AppError::Validation(format!(
                "unknown account status '{value}'"
            ))),
        }
    }
}

/// Review state of requests that need admin approval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Waiting for an admin decision.
    #[default]
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Value this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }

    /// Returns whether an admin can still approve or reject.
    #[must_use]
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::Ar) => "قيد المراجعة",
            (Self::Pending, Locale::En) => "Pending",
            (Self::Approved, Locale::Ar) => "مقبول",
            (Self::Approved, Locale::En) => "Approved",
            (Self::Rejected, Locale::Ar) => "مرفوض",
            (Self::Rejected, Locale::En) => "Rejected",
            (Self::Unknown, Locale::Ar) => "غير معروف",
            (Self::Unknown, Locale::En) => "Unknown",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown review status '{value}'"
            ))),
        }
    }
}

/// Handling state of a complaint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Not yet handled.
    #[default]
    Pending,
    /// Being handled.
    InProgress,
    /// Resolved with a reply.
    Resolved,
    /// Closed without further action.
    Closed,
    /// Value this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl ComplaintStatus {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::Ar) => "جديدة",
            (Self::Pending, Locale::En) => "Pending",
            (Self::InProgress, Locale::Ar) => "قيد المعالجة",
            (Self::InProgress, Locale::En) => "In progress",
            (Self::Resolved, Locale::Ar) => "تم الحل",
            (Self::Resolved, Locale::En) => "Resolved",
            (Self::Closed, Locale::Ar) => "مغلقة",
            (Self::Closed, Locale::En) => "Closed",
            (Self::Unknown, Locale::Ar) => "غير معروف",
            (Self::Unknown, Locale::En) => "Unknown",
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::Validation(format!(
                "unknown complaint status '{value}'"
            ))),
        }
    }
}

/// Payout state of a teacher salary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Calculated, not yet paid.
    #[default]
    Pending,
    /// Paid out.
    Paid,
    /// Value this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl SalaryStatus {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::Ar) => "غير مدفوع",
            (Self::Pending, Locale::En) => "Pending",
            (Self::Paid, Locale::Ar) => "مدفوع",
            (Self::Paid, Locale::En) => "Paid",
            (Self::Unknown, Locale::Ar) => "غير معروف",
            (Self::Unknown, Locale::En) => "Unknown",
        }
    }
}

impl FromStr for SalaryStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(AppError::Validation(format!(
                "unknown salary status '{value}'"
            ))),
        }
    }
}

/// Gender recorded for students and teachers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(AppError::Validation(format!("unknown gender '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ComplaintStatus, ReviewStatus};

    #[test]
    fn unknown_server_status_does_not_fail_decoding() {
        let status = serde_json::from_str::<ReviewStatus>("\"escalated\"");
        assert!(matches!(status, Ok(ReviewStatus::Unknown)));
    }

    #[test]
    fn complaint_status_uses_snake_case_wire_values() {
        let encoded = serde_json::to_string(&ComplaintStatus::InProgress).unwrap_or_default();
        assert_eq!(encoded, "\"in_progress\"");
        assert!(matches!(
            "in_progress".parse::<ComplaintStatus>(),
            Ok(ComplaintStatus::InProgress)
        ));
    }
}
