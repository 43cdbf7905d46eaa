use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::editor::duration::Anchor;
use crate::editor::profile::{self, AdditionalInfo};
use crate::editor::section::{AssistOutcome, DraftView, SectionError, SectionKind};
use crate::errors::AppError;
use crate::models::resume::{PersonalInfo, Resume};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DocumentResponse {
    pub revision: u64,
    pub resume: Resume,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionResponse {
    pub revision: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub revision: u64,
    /// Index the entry landed at (add, commit) or was removed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub draft: DraftView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistResponse {
    pub outcome: AssistOutcome,
    pub draft: DraftView,
}

#[derive(Deserialize)]
pub struct DatesRequest {
    pub anchor: Anchor,
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsResponse {
    pub revision: u64,
    pub index: usize,
    pub skills: Vec<String>,
}

fn document(state: &AppState) -> DocumentResponse {
    DocumentResponse {
        revision: state.store.revision(),
        resume: (*state.store.get()).clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Whole document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<DocumentResponse> {
    Json(document(&state))
}

/// PUT /api/v1/resume
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Json(resume): Json<Resume>,
) -> Json<DocumentResponse> {
    let mut session = state.session.lock().await;
    session.discard_all();
    let revision = state.store.replace(resume);
    info!(revision, "resume replaced wholesale");
    Json(document(&state))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset_resume(State(state): State<AppState>) -> Json<DocumentResponse> {
    let mut session = state.session.lock().await;
    session.discard_all();
    let revision = state.store.reset();
    info!(revision, "resume reset");
    Json(document(&state))
}

/// PUT /api/v1/resume/personal-info
pub async fn handle_submit_personal_info(
    State(state): State<AppState>,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<RevisionResponse>, AppError> {
    let _session = state.session.lock().await;
    let revision = profile::submit_personal_info(&state.store, info)?;
    Ok(Json(RevisionResponse { revision }))
}

/// PUT /api/v1/resume/additional
pub async fn handle_submit_additional(
    State(state): State<AppState>,
    Json(additional): Json<AdditionalInfo>,
) -> Json<RevisionResponse> {
    let _session = state.session.lock().await;
    let revision = profile::submit_additional(&state.store, additional);
    Json(RevisionResponse { revision })
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let session = state.session.lock().await;
    let index = session.skills.add(&state.store, &req.value)?;
    Ok(Json(SkillsResponse {
        revision: state.store.revision(),
        index,
        skills: state.store.get().skills.clone(),
    }))
}

/// DELETE /api/v1/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SkillsResponse>, AppError> {
    let session = state.session.lock().await;
    session.skills.remove(&state.store, index)?;
    Ok(Json(SkillsResponse {
        revision: state.store.revision(),
        index,
        skills: state.store.get().skills.clone(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// List sections
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sections/:section/draft
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Json<DraftView> {
    Json(state.session.lock().await.section(kind).view())
}

/// PUT /api/v1/sections/:section/draft
pub async fn handle_set_draft(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
    Json(entry): Json<Value>,
) -> Result<Json<DraftView>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.set_entry_json(entry)?;
    Ok(Json(section.view()))
}

/// PUT /api/v1/sections/:section/draft/dates
pub async fn handle_set_dates(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
    Json(req): Json<DatesRequest>,
) -> Json<DraftView> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.set_anchor(req.anchor, req.date);
    Json(section.view())
}

/// POST /api/v1/sections/:section/draft/technologies
pub async fn handle_add_technology(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    if kind != SectionKind::Projects {
        return Err(SectionError::Unsupported(kind).into());
    }
    let mut session = state.session.lock().await;
    let index = session
        .projects
        .add_technology(&req.value)
        .map_err(SectionError::from)?;
    Ok(Json(SectionResponse {
        revision: state.store.revision(),
        index: Some(index),
        draft: session.section(kind).view(),
    }))
}

/// DELETE /api/v1/sections/:section/draft/technologies/:index
pub async fn handle_remove_technology(
    State(state): State<AppState>,
    Path((kind, index)): Path<(SectionKind, usize)>,
) -> Result<Json<SectionResponse>, AppError> {
    if kind != SectionKind::Projects {
        return Err(SectionError::Unsupported(kind).into());
    }
    let mut session = state.session.lock().await;
    session
        .projects
        .remove_technology(index)
        .map_err(SectionError::from)?;
    Ok(Json(SectionResponse {
        revision: state.store.revision(),
        index: Some(index),
        draft: session.section(kind).view(),
    }))
}

/// POST /api/v1/sections/:section/draft/discard
pub async fn handle_discard_draft(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Json<DraftView> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.discard();
    Json(section.view())
}

/// POST /api/v1/sections/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Result<Json<SectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    let index = section.add(&state.store)?;
    Ok(Json(SectionResponse {
        revision: state.store.revision(),
        index: Some(index),
        draft: section.view(),
    }))
}

/// DELETE /api/v1/sections/:section/entries/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((kind, index)): Path<(SectionKind, usize)>,
) -> Result<Json<SectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.remove(&state.store, index)?;
    Ok(Json(SectionResponse {
        revision: state.store.revision(),
        index: Some(index),
        draft: section.view(),
    }))
}

/// POST /api/v1/sections/:section/entries/:index/edit
pub async fn handle_start_edit(
    State(state): State<AppState>,
    Path((kind, index)): Path<(SectionKind, usize)>,
) -> Result<Json<DraftView>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.start_edit(&state.store, index)?;
    Ok(Json(section.view()))
}

/// POST /api/v1/sections/:section/commit
pub async fn handle_commit_edit(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Result<Json<SectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    let index = section.commit_edit(&state.store)?;
    Ok(Json(SectionResponse {
        revision: state.store.revision(),
        index: Some(index),
        draft: section.view(),
    }))
}

/// POST /api/v1/sections/:section/assist
///
/// The remote call runs in its own task without the session lock, so other
/// edits proceed meanwhile and a dropped client still settles the slot.
pub async fn handle_assist(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Result<Json<AssistResponse>, AppError> {
    let request = state.session.lock().await.section_mut(kind).begin_assist()?;

    let assistant = state.assistant.clone();
    let session = state.session.clone();
    let task = tokio::spawn(async move {
        let bullets = assistant
            .generate(&request.description, request.kind)
            .await;
        let mut session = session.lock().await;
        let section = session.section_mut(kind);
        let outcome = section.finish_assist(request.ticket, bullets);
        (outcome, section.view())
    });

    let (outcome, draft) = task.await.map_err(anyhow::Error::from)?;
    Ok(Json(AssistResponse { outcome, draft }))
}

/// POST /api/v1/sections/:section/assist/apply
pub async fn handle_apply_suggestions(
    State(state): State<AppState>,
    Path(kind): Path<SectionKind>,
) -> Result<Json<DraftView>, AppError> {
    let mut session = state.session.lock().await;
    let section = session.section_mut(kind);
    section.apply_suggestions()?;
    Ok(Json(section.view()))
}
