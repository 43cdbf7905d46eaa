use std::sync::Arc;

use tokio::sync::Mutex;

use crate::assist::BulletAssistant;
use crate::config::Config;
use crate::editor::EditorSession;
use crate::export::Exporter;
use crate::llm_client::LlmClient;
use crate::preview::LivePreview;
use crate::store::ResumeStore;
use crate::template::TemplateSelector;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: ResumeStore,
    pub templates: TemplateSelector,
    /// Controller state. Every mutating handler takes this lock, which is
    /// what keeps positional indices stable between requests.
    pub session: Arc<Mutex<EditorSession>>,
    pub preview: LivePreview,
    pub exporter: Exporter,
    pub assistant: BulletAssistant,
    /// Backs the `/api/generate-bullets` proxy. `None` without an API key.
    pub llm: Option<LlmClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, assistant: BulletAssistant, llm: Option<LlmClient>) -> Self {
        let store = ResumeStore::default();
        let templates = TemplateSelector::default();
        let preview = LivePreview::new(&store, &templates);
        Self {
            store,
            templates,
            session: Arc::new(Mutex::new(EditorSession::new())),
            preview,
            exporter: Exporter::default(),
            assistant,
            llm,
            config,
        }
    }
}
