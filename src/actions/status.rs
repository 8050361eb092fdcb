use axum::response::Json;
use serde_json::{Value, json};

/// Liveness blob for monitoring.
pub async fn get_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vatrack",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
