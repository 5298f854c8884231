use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/health — liveness plus which sinks are configured.
pub async fn health(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "sinks": {
            "chat": app.config.chat_enabled(),
            "sheet": app.config.sheet_enabled(),
        },
    }))
}
