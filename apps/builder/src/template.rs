//! Template Selector: which projection the preview and export use.
//!
//! The active id is plain text and is not validated: any id is stored as
//! given, and the renderer falls back to the default projection for ids it
//! does not know.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

pub const DEFAULT_TEMPLATE_ID: &str = "default";

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

const CATALOG: &[TemplateInfo] = &[
    TemplateInfo {
        id: "default",
        name: "Modern",
        description: "Clean and professional design with modern typography",
        category: "Professional",
    },
    TemplateInfo {
        id: "classic",
        name: "Classic",
        description: "Traditional layout with timeless appeal",
        category: "Professional",
    },
    TemplateInfo {
        id: "creative",
        name: "Creative",
        description: "Innovative design for creative professionals",
        category: "Creative",
    },
];

pub fn catalog() -> &'static [TemplateInfo] {
    CATALOG
}

/// The projections the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Default,
    Classic,
    Creative,
}

impl TemplateKind {
    /// Unknown ids resolve to `Default`.
    pub fn resolve(id: &str) -> Self {
        match id {
            "classic" => TemplateKind::Classic,
            "creative" => TemplateKind::Creative,
            _ => TemplateKind::Default,
        }
    }
}

#[derive(Clone)]
pub struct TemplateSelector {
    tx: Arc<watch::Sender<String>>,
}

impl TemplateSelector {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DEFAULT_TEMPLATE_ID.to_string());
        Self { tx: Arc::new(tx) }
    }

    pub fn select(&self, id: &str) {
        info!(template = id, "template selected");
        self.tx.send_replace(id.to_string());
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_default() {
        assert_eq!(TemplateSelector::new().current(), "default");
    }

    #[test]
    fn test_unknown_id_is_stored_but_resolves_to_default() {
        let selector = TemplateSelector::new();
        selector.select("neon-brutalist");
        assert_eq!(selector.current(), "neon-brutalist");
        assert_eq!(TemplateKind::resolve(&selector.current()), TemplateKind::Default);
    }

    #[test]
    fn test_catalog_ids_resolve_to_their_kind() {
        let kinds: Vec<TemplateKind> = catalog().iter().map(|t| TemplateKind::resolve(t.id)).collect();
        assert_eq!(
            kinds,
            vec![TemplateKind::Default, TemplateKind::Classic, TemplateKind::Creative]
        );
    }

    #[test]
    fn test_select_notifies_subscribers() {
        let selector = TemplateSelector::new();
        let mut rx = selector.subscribe();
        selector.select("classic");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "classic");
    }
}
