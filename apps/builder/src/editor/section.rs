//! Section Controllers: pending edit buffers for list sections.
//!
//! A controller owns a working copy of one entry (the draft) plus an optional
//! index meaning "overwrite this entry on commit". Nothing in the draft
//! reaches the document until `add` or `commit_edit` validates it and
//! replaces the whole document in the store.
//!
//! Entries are addressed by position. The editor session lock serializes all
//! calls, so an index read by one request is still valid for the next.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::assist::ContentKind;
use crate::editor::duration::{Anchor, DateAnchors, DurationRule};
use crate::editor::validation::ValidationError;
use crate::models::resume::Resume;
use crate::store::ResumeStore;
use crate::ticket::{Ticket, TicketCounter};

#[derive(Debug, Error)]
pub enum SectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no {section} entry at index {index} (section has {len})")]
    IndexOutOfRange {
        section: SectionKind,
        index: usize,
        len: usize,
    },

    #[error("no {0} entry is being edited")]
    NotEditing(SectionKind),

    #[error("a bullet suggestion request is already running for {0}")]
    AssistInFlight(SectionKind),

    #[error("{0} entries have no bullet assistant")]
    AssistUnsupported(SectionKind),

    #[error("no bullet suggestions to apply for {0}")]
    NoSuggestions(SectionKind),

    #[error("{0} does not support this operation")]
    Unsupported(SectionKind),

    #[error("malformed {section} draft: {source}")]
    MalformedDraft {
        section: SectionKind,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
    Activities,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Activities,
    ];
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
            SectionKind::Activities => "activities",
        };
        f.write_str(name)
    }
}

/// An entry type that lives in one of the résumé's list sections.
pub trait SectionEntry:
    Clone + Default + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + 'static
{
    const KIND: SectionKind;
    const DURATION_RULE: DurationRule;
    /// Content kind sent to the bullet assistant, if the section has one.
    const ASSIST: Option<ContentKind> = None;

    fn entries(resume: &Resume) -> &[Self];
    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self>;

    /// Required-field gate for add and commit.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Shape the draft takes once stored (blank lines dropped, empty
    /// optionals made absent).
    fn normalized(self) -> Self {
        self
    }

    fn set_duration(&mut self, duration: String);

    fn description(&self) -> Vec<String> {
        Vec::new()
    }

    fn replace_description(&mut self, _lines: Vec<String>) {}
}

/// The pending edit buffer of one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft<E> {
    pub entry: E,
    pub anchors: DateAnchors,
    /// When set, `commit_edit` overwrites this index instead of appending.
    pub editing: Option<usize>,
}

/// Work handed to the bullet assistant outside the session lock.
#[derive(Debug, Clone)]
pub struct AssistRequest {
    pub ticket: Ticket,
    pub kind: ContentKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistOutcome {
    /// Suggestions are waiting to be applied (possibly zero of them).
    Offered { count: usize },
    /// The draft changed hands while the request ran; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct AssistSlot {
    tickets: TicketCounter,
    in_flight: Option<Ticket>,
    suggestions: Vec<String>,
}

impl AssistSlot {
    /// Drops pending suggestions and orphans any running request.
    fn reset(&mut self) {
        self.tickets.invalidate();
        self.in_flight = None;
        self.suggestions.clear();
    }
}

#[derive(Debug)]
pub struct SectionController<E: SectionEntry> {
    draft: Draft<E>,
    assist: AssistSlot,
}

impl<E: SectionEntry> Default for SectionController<E> {
    fn default() -> Self {
        Self {
            draft: Draft::default(),
            assist: AssistSlot::default(),
        }
    }
}

impl<E: SectionEntry> SectionController<E> {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn draft(&self) -> &Draft<E> {
        &self.draft
    }

    #[cfg(test)]
    pub fn suggestions(&self) -> &[String] {
        &self.assist.suggestions
    }

    pub fn assist_in_flight(&self) -> bool {
        self.assist.in_flight.is_some()
    }

    /// Replaces the draft's fields, keeping the edit index and date anchors.
    pub fn set_entry(&mut self, entry: E) {
        self.draft.entry = entry;
    }

    pub fn entry_mut(&mut self) -> &mut E {
        &mut self.draft.entry
    }

    /// Records a chosen date and re-derives the duration when the section's
    /// rule allows it; otherwise the typed duration is kept.
    pub fn set_anchor(&mut self, anchor: Anchor, date: Option<NaiveDate>) {
        self.draft.anchors.set(anchor, date);
        if let Some(duration) = self.draft.anchors.derive(E::DURATION_RULE) {
            self.draft.entry.set_duration(duration);
        }
    }

    /// Appends the draft to the section. Returns the new entry's index.
    pub fn add(&mut self, store: &ResumeStore) -> Result<usize, SectionError> {
        self.draft.entry.validate()?;
        let entry = self.draft.entry.clone().normalized();

        let mut next = (*store.get()).clone();
        let entries = E::entries_mut(&mut next);
        entries.push(entry);
        let index = entries.len() - 1;
        store.replace(next);

        info!(section = %E::KIND, index, "entry added");
        self.clear();
        Ok(index)
    }

    /// Splices out the entry at `index`, shifting later entries up.
    pub fn remove(&mut self, store: &ResumeStore, index: usize) -> Result<E, SectionError> {
        let mut next = (*store.get()).clone();
        let entries = E::entries_mut(&mut next);
        if index >= entries.len() {
            return Err(SectionError::IndexOutOfRange {
                section: E::KIND,
                index,
                len: entries.len(),
            });
        }
        let removed = entries.remove(index);
        store.replace(next);

        // Keep a running edit pointed at the same entry.
        self.draft.editing = match self.draft.editing {
            Some(editing) if editing == index => None,
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };

        info!(section = %E::KIND, index, "entry removed");
        Ok(removed)
    }

    /// Loads the entry at `index` into the draft for editing.
    pub fn start_edit(&mut self, store: &ResumeStore, index: usize) -> Result<(), SectionError> {
        let resume = store.get();
        let entries = E::entries(&resume);
        let entry = entries
            .get(index)
            .cloned()
            .ok_or(SectionError::IndexOutOfRange {
                section: E::KIND,
                index,
                len: entries.len(),
            })?;

        self.assist.reset();
        self.draft = Draft {
            entry,
            anchors: DateAnchors::default(),
            editing: Some(index),
        };
        debug!(section = %E::KIND, index, "edit started");
        Ok(())
    }

    /// Overwrites the entry recorded by `start_edit`. Other entries are left
    /// exactly as they were.
    pub fn commit_edit(&mut self, store: &ResumeStore) -> Result<usize, SectionError> {
        let index = self.draft.editing.ok_or(SectionError::NotEditing(E::KIND))?;
        self.draft.entry.validate()?;

        let mut next = (*store.get()).clone();
        let entries = E::entries_mut(&mut next);
        let len = entries.len();
        let slot = entries
            .get_mut(index)
            .ok_or(SectionError::IndexOutOfRange {
                section: E::KIND,
                index,
                len,
            })?;
        *slot = self.draft.entry.clone().normalized();
        store.replace(next);

        info!(section = %E::KIND, index, "entry updated");
        self.clear();
        Ok(index)
    }

    /// Throws the draft away. A bullet request still running for it will
    /// find its ticket stale.
    pub fn discard(&mut self) {
        debug!(section = %E::KIND, "draft discarded");
        self.clear();
    }

    /// Claims the single assist slot for the current draft.
    pub fn begin_assist(&mut self) -> Result<AssistRequest, SectionError> {
        let kind = E::ASSIST.ok_or(SectionError::AssistUnsupported(E::KIND))?;
        if self.assist.in_flight.is_some() {
            return Err(SectionError::AssistInFlight(E::KIND));
        }
        let ticket = self.assist.tickets.issue();
        self.assist.in_flight = Some(ticket);
        Ok(AssistRequest {
            ticket,
            kind,
            description: self.draft.entry.description().join("\n"),
        })
    }

    /// Stores returned suggestions unless the draft moved on meanwhile.
    /// The draft itself is never changed here.
    pub fn finish_assist(&mut self, ticket: Ticket, bullets: Vec<String>) -> AssistOutcome {
        if !self.assist.tickets.is_current(ticket) {
            debug!(section = %E::KIND, "dropping stale bullet suggestions");
            return AssistOutcome::Stale;
        }
        self.assist.in_flight = None;
        self.assist.suggestions = bullets;
        AssistOutcome::Offered {
            count: self.assist.suggestions.len(),
        }
    }

    /// Copies the pending suggestions over the draft's description.
    pub fn apply_suggestions(&mut self) -> Result<usize, SectionError> {
        if self.assist.suggestions.is_empty() {
            return Err(SectionError::NoSuggestions(E::KIND));
        }
        let bullets = std::mem::take(&mut self.assist.suggestions);
        let count = bullets.len();
        self.draft.entry.replace_description(bullets);
        Ok(count)
    }

    fn clear(&mut self) {
        self.draft = Draft::default();
        self.assist.reset();
    }
}

/// JSON view of a section's draft, as served over HTTP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub section: SectionKind,
    pub entry: Value,
    pub anchors: DateAnchors,
    pub editing: Option<usize>,
    pub suggestions: Vec<String>,
    pub assist_in_flight: bool,
}

/// Object-safe face of `SectionController`, letting the HTTP layer pick a
/// section at runtime.
pub trait SectionOps: Send {
    fn view(&self) -> DraftView;
    fn set_entry_json(&mut self, entry: Value) -> Result<(), SectionError>;
    fn set_anchor(&mut self, anchor: Anchor, date: Option<NaiveDate>);
    fn add(&mut self, store: &ResumeStore) -> Result<usize, SectionError>;
    fn remove(&mut self, store: &ResumeStore, index: usize) -> Result<(), SectionError>;
    fn start_edit(&mut self, store: &ResumeStore, index: usize) -> Result<(), SectionError>;
    fn commit_edit(&mut self, store: &ResumeStore) -> Result<usize, SectionError>;
    fn discard(&mut self);
    fn begin_assist(&mut self) -> Result<AssistRequest, SectionError>;
    fn finish_assist(&mut self, ticket: Ticket, bullets: Vec<String>) -> AssistOutcome;
    fn apply_suggestions(&mut self) -> Result<usize, SectionError>;
}

impl<E: SectionEntry> SectionOps for SectionController<E> {
    fn view(&self) -> DraftView {
        DraftView {
            section: E::KIND,
            entry: serde_json::to_value(&self.draft.entry).unwrap_or(Value::Null),
            anchors: self.draft.anchors,
            editing: self.draft.editing,
            suggestions: self.assist.suggestions.clone(),
            assist_in_flight: self.assist_in_flight(),
        }
    }

    fn set_entry_json(&mut self, entry: Value) -> Result<(), SectionError> {
        let entry = serde_json::from_value::<E>(entry).map_err(|source| {
            SectionError::MalformedDraft {
                section: E::KIND,
                source,
            }
        })?;
        self.set_entry(entry);
        Ok(())
    }

    fn set_anchor(&mut self, anchor: Anchor, date: Option<NaiveDate>) {
        SectionController::set_anchor(self, anchor, date)
    }

    fn add(&mut self, store: &ResumeStore) -> Result<usize, SectionError> {
        SectionController::add(self, store)
    }

    fn remove(&mut self, store: &ResumeStore, index: usize) -> Result<(), SectionError> {
        SectionController::remove(self, store, index).map(|_| ())
    }

    fn start_edit(&mut self, store: &ResumeStore, index: usize) -> Result<(), SectionError> {
        SectionController::start_edit(self, store, index)
    }

    fn commit_edit(&mut self, store: &ResumeStore) -> Result<usize, SectionError> {
        SectionController::commit_edit(self, store)
    }

    fn discard(&mut self) {
        SectionController::discard(self)
    }

    fn begin_assist(&mut self) -> Result<AssistRequest, SectionError> {
        SectionController::begin_assist(self)
    }

    fn finish_assist(&mut self, ticket: Ticket, bullets: Vec<String>) -> AssistOutcome {
        SectionController::finish_assist(self, ticket, bullets)
    }

    fn apply_suggestions(&mut self) -> Result<usize, SectionError> {
        SectionController::apply_suggestions(self)
    }
}
