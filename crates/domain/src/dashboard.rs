use serde::Deserialize;

use crate::lenient;

/// Counters shown on the admin dashboard, computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    /// Enrolled students.
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_students: u64,
    /// Employed teachers.
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_teachers: u64,
    /// Students with a running subscription.
    #[serde(default, deserialize_with = "lenient::count")]
    pub active_subscriptions: u64,
    /// Receipts waiting for review.
    #[serde(default, deserialize_with = "lenient::count")]
    pub pending_receipts: u64,
    /// Complaints not yet handled.
    #[serde(default, deserialize_with = "lenient::count")]
    pub pending_complaints: u64,
    /// Schedule change requests waiting for review.
    #[serde(default, deserialize_with = "lenient::count")]
    pub pending_schedule_requests: u64,
    /// Approved payments in the current month.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub monthly_revenue: f64,
}

impl DashboardStats {
    /// Returns the number of items waiting for an admin.
    #[must_use]
    pub fn pending_total(&self) -> u64 {
        self.pending_receipts + self.pending_complaints + self.pending_schedule_requests
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::DashboardStats;

    #[test]
    fn missing_counters_default_to_zero() {
        let stats = serde_json::from_value::<DashboardStats>(json!({
            "total_students": 120,
            "pending_receipts": 3,
            "pending_complaints": 1,
            "monthly_revenue": "2400.00"
        }));

        assert!(matches!(
            stats,
            Ok(ref value)
                if value.total_teachers == 0
                    && value.pending_total() == 4
                    && (value.monthly_revenue - 2400.0).abs() < f64::EPSILON
        ));
    }
}
