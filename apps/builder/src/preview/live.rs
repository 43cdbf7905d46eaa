use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::debug;

use super::{render, PreviewTree};
use crate::store::{ResumeStore, Snapshot};
use crate::template::TemplateSelector;

/// A rendered tree and the document revision it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedPreview {
    pub revision: u64,
    pub tree: Arc<PreviewTree>,
}

/// Keeps the preview in step with the store and the template selection.
///
/// The tree is re-derived on the first read after either input changes and
/// served from cache otherwise.
#[derive(Clone)]
pub struct LivePreview {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    resume_rx: watch::Receiver<Snapshot>,
    template_rx: watch::Receiver<String>,
    cached: Option<RenderedPreview>,
    renders: u64,
}

impl LivePreview {
    pub fn new(store: &ResumeStore, templates: &TemplateSelector) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                resume_rx: store.subscribe(),
                template_rx: templates.subscribe(),
                cached: None,
                renders: 0,
            })),
        }
    }

    pub async fn current(&self) -> RenderedPreview {
        let mut inner = self.inner.lock().await;

        let stale = inner.cached.is_none()
            || inner.resume_rx.has_changed().unwrap_or(false)
            || inner.template_rx.has_changed().unwrap_or(false);

        if let (false, Some(cached)) = (stale, inner.cached.as_ref()) {
            return cached.clone();
        }

        let snapshot = inner.resume_rx.borrow_and_update().clone();
        let template_id = inner.template_rx.borrow_and_update().clone();
        let rendered = RenderedPreview {
            revision: snapshot.revision,
            tree: Arc::new(render(&snapshot.resume, &template_id)),
        };
        inner.renders += 1;
        debug!(
            revision = snapshot.revision,
            template = %template_id,
            renders = inner.renders,
            "preview re-rendered"
        );
        inner.cached = Some(rendered.clone());
        rendered
    }

    /// How many times the tree has actually been rendered.
    #[cfg(test)]
    pub async fn render_count(&self) -> u64 {
        self.inner.lock().await.renders
    }
}
