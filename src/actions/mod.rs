pub mod acars;
pub mod bids;
pub mod status;

pub use acars::*;
pub use bids::*;
pub use status::*;

use axum::{http::StatusCode, response::Json};
use serde_json::{Value, json};

/// Standard error payload: `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
