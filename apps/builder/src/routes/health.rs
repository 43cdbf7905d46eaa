use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and document revision.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "revision": state.store.revision(),
        "bulletsProxy": state.llm.is_some(),
        "bulletsEndpoint": state.config.bullets_endpoint_url,
    }))
}
