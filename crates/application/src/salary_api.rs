use serde_json::json;
use tahfeez_core::AppResult;
use tahfeez_domain::{RequestBody, Resource, SalaryCalculation};

use crate::api_ports::{ApiGateway, ApiMethod, decode_nested};

/// Salary calculation endpoint.
///
/// Totals are computed by the backend; this only triggers and returns them.
#[derive(Debug, Clone)]
pub struct SalaryApi {
    gateway: ApiGateway,
}

impl SalaryApi {
    /// Creates the API bound to a gateway.
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Calculates (or recalculates) one teacher's salary for a `YYYY-MM` month.
    pub async fn calculate(&self, teacher_id: u64, month: &str) -> AppResult<SalaryCalculation> {
        let body = RequestBody::Json(json!({ "teacher_id": teacher_id, "month": month }));
        let value = self
            .gateway
            .send_body(
                ApiMethod::Post,
                format!("{}/calculate", SalaryCalculation::PATH),
                Some(body),
            )
            .await?;

        decode_nested(value, "salary")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::SalaryApi;
    use crate::api_ports::ApiMethod;
    use crate::test_support::{FakeTransport, authorized_gateway};

    #[tokio::test]
    async fn calculate_returns_server_totals() {
        let transport = FakeTransport::new(|_| {
            Ok(json!({"salary": {
                "id": 8,
                "teacher": {"id": 2, "name": "أ. خالد"},
                "month": "2024-06",
                "total_amount": "320.00"
            }}))
        });
        let api = SalaryApi::new(authorized_gateway(transport.clone()));

        let salary = api.calculate(2, "2024-06").await;

        assert!(matches!(
            salary,
            Ok(ref value) if (value.total_amount - 320.0).abs() < f64::EPSILON
        ));
        assert_eq!(
            transport
                .count(ApiMethod::Post, "admin/salaries/calculate")
                .await,
            1
        );
    }
}
