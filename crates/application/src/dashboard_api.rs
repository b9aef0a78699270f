use tahfeez_core::AppResult;
use tahfeez_domain::DashboardStats;

use crate::api_ports::{ApiGateway, decode_nested};

const STATS_PATH: &str = "admin/dashboard/stats";

/// Dashboard counters endpoint.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    gateway: ApiGateway,
}

impl DashboardApi {
    /// Creates the API bound to a gateway.
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Fetches the server-computed counters.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let value = self.gateway.get(STATS_PATH, Vec::new()).await?;
        decode_nested(value, "stats")
    }
}
