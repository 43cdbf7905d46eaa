use axum::{extract::State, Json};
use tracing::info;

use crate::assist::prompts::{bullets_system, build_bullets_prompt};
use crate::assist::{BulletRequest, BulletResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/generate-bullets
///
/// The endpoint the bullet assistant calls by default. Forwards the notes to
/// the LLM and returns `{bulletPoints}`.
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    Json(req): Json<BulletRequest>,
) -> Result<Json<BulletResponse>, AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("description is required".to_string()));
    }
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Llm("ANTHROPIC_API_KEY is not configured".to_string()))?;

    let prompt = build_bullets_prompt(&req.description, req.kind);
    let response: BulletResponse = llm
        .call_json(&prompt, &bullets_system())
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    info!(
        kind = req.kind.as_str(),
        count = response.bullet_points.len(),
        "bullets generated"
    );
    Ok(Json(response))
}
