pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::assist::handlers as assist;
use crate::editor::handlers as editor;
use crate::preview::handlers as preview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Whole document and form submits
        .route(
            "/api/v1/resume",
            get(editor::handle_get_resume).put(editor::handle_replace_resume),
        )
        .route("/api/v1/resume/reset", post(editor::handle_reset_resume))
        .route(
            "/api/v1/resume/personal-info",
            put(editor::handle_submit_personal_info),
        )
        .route(
            "/api/v1/resume/additional",
            put(editor::handle_submit_additional),
        )
        .route("/api/v1/skills", post(editor::handle_add_skill))
        .route("/api/v1/skills/:index", delete(editor::handle_remove_skill))
        // Section controllers
        .route(
            "/api/v1/sections/:section/draft",
            get(editor::handle_get_draft).put(editor::handle_set_draft),
        )
        .route(
            "/api/v1/sections/:section/draft/dates",
            put(editor::handle_set_dates),
        )
        .route(
            "/api/v1/sections/:section/draft/technologies",
            post(editor::handle_add_technology),
        )
        .route(
            "/api/v1/sections/:section/draft/technologies/:index",
            delete(editor::handle_remove_technology),
        )
        .route(
            "/api/v1/sections/:section/draft/discard",
            post(editor::handle_discard_draft),
        )
        .route(
            "/api/v1/sections/:section/entries",
            post(editor::handle_add_entry),
        )
        .route(
            "/api/v1/sections/:section/entries/:index",
            delete(editor::handle_remove_entry),
        )
        .route(
            "/api/v1/sections/:section/entries/:index/edit",
            post(editor::handle_start_edit),
        )
        .route(
            "/api/v1/sections/:section/commit",
            post(editor::handle_commit_edit),
        )
        .route(
            "/api/v1/sections/:section/assist",
            post(editor::handle_assist),
        )
        .route(
            "/api/v1/sections/:section/assist/apply",
            post(editor::handle_apply_suggestions),
        )
        // Template, preview and export
        .route(
            "/api/v1/template",
            get(preview::handle_get_template).put(preview::handle_select_template),
        )
        .route("/api/v1/preview", get(preview::handle_get_preview))
        .route("/api/v1/export", get(preview::handle_export))
        // Bullet endpoint the assistant calls by default
        .route(
            "/api/generate-bullets",
            post(assist::handle_generate_bullets),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::tests::FixedSource;
    use crate::assist::BulletAssistant;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(source: Arc<FixedSource>) -> (AppState, Router) {
        let state = AppState::new(Config::default(), BulletAssistant::new(source), None);
        let router = build_router(state.clone());
        (state, router)
    }

    fn app() -> (AppState, Router) {
        app_with(FixedSource::ok(&[]))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn stanford() -> Value {
        json!({
            "degree": "BS in Computer Science",
            "institution": "Stanford University",
            "duration": "Sep 2020 - May 2024"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["revision"], 0);
    }

    #[tokio::test]
    async fn test_add_education_shows_in_preview_without_gpa() {
        let (_, router) = app();

        let (status, _) = send(
            &router,
            Method::PUT,
            "/api/v1/sections/education/draft",
            Some(stanford()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/education/entries", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index"], 0);
        assert_eq!(body["revision"], 1);
        assert_eq!(body["draft"]["entry"]["institution"], "");

        let (_, body) = send(&router, Method::GET, "/api/v1/preview", None).await;
        let education = &body["preview"]["sections"][0];
        assert_eq!(education["heading"], "EDUCATION");
        assert_eq!(education["items"].as_array().unwrap().len(), 1);
        assert!(!body.to_string().contains("Cumulative GPA"));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_with_field_list() {
        let (state, router) = app();
        send(
            &router,
            Method::PUT,
            "/api/v1/sections/experience/draft",
            Some(json!({"title": "Engineer"})),
        )
        .await;

        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/experience/entries", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_FIELDS");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"company"));
        assert!(!fields.contains(&"title"));
        assert_eq!(state.store.revision(), 0);
    }

    #[tokio::test]
    async fn test_unknown_index_is_not_found() {
        let (_, router) = app();
        let (status, body) = send(
            &router,
            Method::DELETE,
            "/api/v1/sections/projects/entries/3",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_skill_added_twice_is_kept_twice() {
        let (state, router) = app();
        for _ in 0..2 {
            let (status, _) = send(
                &router,
                Method::POST,
                "/api/v1/skills",
                Some(json!({"value": "Python"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(state.store.get().skills, vec!["Python", "Python"]);

        let (status, body) = send(&router, Method::DELETE, "/api/v1/skills/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["Python"]));
    }

    #[tokio::test]
    async fn test_edit_and_commit_through_the_api() {
        let (state, router) = app();
        for company in ["Acme", "Globex"] {
            send(
                &router,
                Method::PUT,
                "/api/v1/sections/experience/draft",
                Some(json!({
                    "title": "Engineer",
                    "company": company,
                    "duration": "2020 - 2021",
                    "description": ["Did things"]
                })),
            )
            .await;
            send(&router, Method::POST, "/api/v1/sections/experience/entries", None).await;
        }

        let (status, draft) = send(
            &router,
            Method::POST,
            "/api/v1/sections/experience/entries/1/edit",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["editing"], 1);

        let mut entry = draft["entry"].clone();
        entry["title"] = json!("Staff Engineer");
        send(
            &router,
            Method::PUT,
            "/api/v1/sections/experience/draft",
            Some(entry),
        )
        .await;
        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/experience/commit", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index"], 1);

        let experience = &state.store.get().experience;
        assert_eq!(experience[0].title, "Engineer");
        assert_eq!(experience[1].title, "Staff Engineer");
        assert_eq!(experience[1].company, "Globex");
    }

    #[tokio::test]
    async fn test_commit_without_edit_conflicts() {
        let (_, router) = app();
        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/activities/commit", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_dates_derive_open_experience_range() {
        let (_, router) = app();
        let (status, draft) = send(
            &router,
            Method::PUT,
            "/api/v1/sections/experience/draft/dates",
            Some(json!({"anchor": "start", "date": "2022-01-15"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["entry"]["duration"], "Jan 2022 - Present");
    }

    #[tokio::test]
    async fn test_technologies_only_for_projects() {
        let (_, router) = app();
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/sections/projects/draft/technologies",
            Some(json!({"value": " Rust "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["draft"]["entry"]["technologies"], json!(["Rust"]));

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/v1/sections/education/draft/technologies",
            Some(json!({"value": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assist_offers_then_applies_suggestions() {
        let (state, router) = app_with(FixedSource::ok(&["Built X", "Shipped Y"]));
        send(
            &router,
            Method::PUT,
            "/api/v1/sections/experience/draft",
            Some(json!({"description": ["did x", "did y"]})),
        )
        .await;

        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/experience/assist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["offered"]["count"], 2);
        assert_eq!(body["draft"]["entry"]["description"], json!(["did x", "did y"]));

        let (status, draft) = send(
            &router,
            Method::POST,
            "/api/v1/sections/experience/assist/apply",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["entry"]["description"], json!(["Built X", "Shipped Y"]));
        assert_eq!(state.store.revision(), 0);
    }

    #[tokio::test]
    async fn test_failed_assist_leaves_draft_unchanged() {
        let (_, router) = app_with(FixedSource::failing(500));
        send(
            &router,
            Method::PUT,
            "/api/v1/sections/projects/draft",
            Some(json!({"name": "Compiler", "description": ["wrote a parser"]})),
        )
        .await;

        let (status, body) =
            send(&router, Method::POST, "/api/v1/sections/projects/assist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["offered"]["count"], 0);
        assert_eq!(body["draft"]["entry"]["description"], json!(["wrote a parser"]));
    }

    #[tokio::test]
    async fn test_personal_info_validation() {
        let (state, router) = app();
        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/v1/resume/personal-info",
            Some(json!({"name": "Ada", "title": "Engineer", "email": "nope", "phone": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"][0]["field"], "email");

        let (status, _) = send(
            &router,
            Method::PUT,
            "/api/v1/resume/personal-info",
            Some(json!({"name": "Ada", "title": "Engineer", "email": "ada@example.com", "phone": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.store.get().personal_info.name, "Ada");
    }

    #[tokio::test]
    async fn test_template_selection_changes_preview_theme() {
        let (_, router) = app();
        let (_, body) = send(&router, Method::GET, "/api/v1/template", None).await;
        assert_eq!(body["selected"], "default");
        assert_eq!(body["templates"].as_array().unwrap().len(), 3);

        send(
            &router,
            Method::PUT,
            "/api/v1/template",
            Some(json!({"id": "creative"})),
        )
        .await;
        let (_, body) = send(&router, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(body["preview"]["templateId"], "creative");
        assert_eq!(body["preview"]["theme"]["headerAlign"], "left");
    }

    #[tokio::test]
    async fn test_reset_discards_document_and_drafts() {
        let (state, router) = app();
        send(&router, Method::POST, "/api/v1/skills", Some(json!({"value": "Go"}))).await;
        send(
            &router,
            Method::PUT,
            "/api/v1/sections/education/draft",
            Some(stanford()),
        )
        .await;

        let (status, body) = send(&router, Method::POST, "/api/v1/resume/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["skills"], json!([]));
        assert!(state.store.get().skills.is_empty());

        let (_, draft) = send(&router, Method::GET, "/api/v1/sections/education/draft", None).await;
        assert_eq!(draft["entry"]["institution"], "");
    }

    #[tokio::test]
    async fn test_replace_accepts_partial_document() {
        let (state, router) = app();
        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/v1/resume",
            Some(json!({"skills": ["Rust"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 1);
        assert_eq!(body["resume"]["personalInfo"]["name"], "");
        assert_eq!(state.store.get().skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_export_downloads_resume_pdf() {
        let (_, router) = app();
        let request = Request::builder()
            .uri("/api/v1/export")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume.pdf\"; filename*=UTF-8''Resume.pdf"
        );
        assert_eq!(response.headers()["x-export-clipped"], "false");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_keeps_unicode_candidate_name() {
        let (_, router) = app();
        let (status, _) = send(
            &router,
            Method::PUT,
            "/api/v1/resume/personal-info",
            Some(json!({
                "name": "Zoë Müller",
                "title": "Engineer",
                "email": "zoe@example.com",
                "phone": "1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/v1/export")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap();
        assert!(disposition.ends_with("filename*=UTF-8''Zo%C3%AB%20M%C3%BCller.pdf"));
    }

    #[tokio::test]
    async fn test_generate_bullets_without_api_key_is_llm_error() {
        let (_, router) = app();
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/generate-bullets",
            Some(json!({"description": "did x", "type": "experience"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }
}
