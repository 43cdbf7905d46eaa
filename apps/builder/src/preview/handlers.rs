use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::preview::PreviewTree;
use crate::state::AppState;
use crate::template::{catalog, TemplateInfo};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse<'a> {
    pub revision: u64,
    pub preview: &'a PreviewTree,
}

/// GET /api/v1/preview
pub async fn handle_get_preview(State(state): State<AppState>) -> Response {
    let rendered = state.preview.current().await;
    Json(PreviewResponse {
        revision: rendered.revision,
        preview: &rendered.tree,
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub selected: String,
    pub templates: &'static [TemplateInfo],
}

#[derive(Deserialize)]
pub struct SelectTemplateRequest {
    pub id: String,
}

/// GET /api/v1/template
pub async fn handle_get_template(State(state): State<AppState>) -> Json<TemplateResponse> {
    Json(TemplateResponse {
        selected: state.templates.current(),
        templates: catalog(),
    })
}

/// PUT /api/v1/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(req): Json<SelectTemplateRequest>,
) -> Json<TemplateResponse> {
    state.templates.select(&req.id);
    Json(TemplateResponse {
        selected: state.templates.current(),
        templates: catalog(),
    })
}

/// RFC 5987 `attr-char`s pass through; everything else is percent-encoded.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Builds `Content-Disposition` with an ASCII `filename` fallback and the
/// exact UTF-8 name in `filename*` (RFC 6266).
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let encoded = utf8_percent_encode(filename, FILENAME_ENCODE_SET);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// Set on export responses; `true` when content ran past the page bottom.
pub const CLIPPED_HEADER: &str = "x-export-clipped";

/// GET /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let rendered = state.preview.current().await;
    let name = rendered.tree.header.name.clone();
    let file = state.exporter.export(rendered.tree, &name).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&file.filename))
        .map_err(anyhow::Error::from)?;
    let clipped = HeaderValue::from_static(if file.clipped { "true" } else { "false" });
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (HeaderName::from_static(CLIPPED_HEADER), clipped),
        ],
        file.bytes,
    )
        .into_response())
}
