use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// GET /: liveness banner with the current server time.
pub async fn handle_root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "running",
        message: "Vapi business advisor webhook is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/health
pub async fn handle_health() -> Json<Health> {
    Json(Health { status: "healthy" })
}
