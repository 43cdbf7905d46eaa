//! Plain string lists: résumé skills and a project draft's technologies.
//!
//! Both append trimmed, non-empty text at the end, keep duplicates, and
//! remove by position.

use tracing::info;

use crate::editor::section::{SectionController, SectionError, SectionKind};
use crate::editor::validation::ValidationError;
use crate::models::resume::ProjectEntry;
use crate::store::ResumeStore;

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no {list} item at index {index} (list has {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

fn push_trimmed(
    list: &mut Vec<String>,
    field: &'static str,
    text: &str,
) -> Result<usize, ListError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::single(field, "Value cannot be empty").into());
    }
    list.push(text.to_string());
    Ok(list.len() - 1)
}

fn remove_at(list: &mut Vec<String>, name: &'static str, index: usize) -> Result<String, ListError> {
    if index >= list.len() {
        return Err(ListError::IndexOutOfRange {
            list: name,
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

/// Skills are written straight into the document; there is no draft.
#[derive(Debug, Default)]
pub struct SkillsController;

impl SkillsController {
    pub fn add(&self, store: &ResumeStore, skill: &str) -> Result<usize, ListError> {
        let mut next = (*store.get()).clone();
        let index = push_trimmed(&mut next.skills, "skill", skill)?;
        store.replace(next);
        info!(index, "skill added");
        Ok(index)
    }

    pub fn remove(&self, store: &ResumeStore, index: usize) -> Result<String, ListError> {
        let mut next = (*store.get()).clone();
        let removed = remove_at(&mut next.skills, "skills", index)?;
        store.replace(next);
        info!(index, "skill removed");
        Ok(removed)
    }
}

/// Technologies belong to the project draft and only reach the document
/// when the project is added or committed.
impl SectionController<ProjectEntry> {
    pub fn add_technology(&mut self, technology: &str) -> Result<usize, ListError> {
        let technologies = self.entry_mut().technologies.get_or_insert_with(Vec::new);
        push_trimmed(technologies, "technology", technology)
    }

    pub fn remove_technology(&mut self, index: usize) -> Result<String, ListError> {
        let technologies = self.entry_mut().technologies.get_or_insert_with(Vec::new);
        remove_at(technologies, "technologies", index)
    }
}

impl From<ListError> for SectionError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Validation(v) => SectionError::Validation(v),
            ListError::IndexOutOfRange { index, len, .. } => SectionError::IndexOutOfRange {
                section: SectionKind::Projects,
                index,
                len,
            },
        }
    }
}
