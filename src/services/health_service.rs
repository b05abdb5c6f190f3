use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::{ComponentHealth, HealthStatus};
use crate::repositories::HealthProbe;

/// Runs component checks for the health endpoints.
#[derive(Clone)]
pub struct HealthService {
    probe: Arc<dyn HealthProbe>,
}

impl HealthService {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self { probe }
    }

    /// Pings the database and reports status with round-trip time.
    pub async fn check_database(&self) -> ComponentHealth {
        let start_time = Instant::now();
        let result = self.probe.ping().await;
        let response_time_ms = Some(start_time.elapsed().as_millis() as u64);

        match result {
            Ok(()) => ComponentHealth {
                status: HealthStatus::Healthy,
                message: Some("Connected".to_string()),
                response_time_ms,
            },
            Err(e) => ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Connection failed: {}", e)),
                response_time_ms,
            },
        }
    }
}
