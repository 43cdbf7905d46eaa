//! Resume Document Store: the one canonical résumé of the editing session.
//!
//! Every mutation is a whole-document `replace`. There is no field-level
//! update at this boundary: callers clone the current value, change the clone
//! and hand it back. Observers subscribe through a `watch` channel, so a
//! replace is visible to every receiver as soon as it returns.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::resume::Resume;

/// A published document value together with the replace count that produced it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub resume: Arc<Resume>,
}

#[derive(Clone)]
pub struct ResumeStore {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl ResumeStore {
    pub fn new(initial: Resume) -> Self {
        let (tx, _rx) = watch::channel(Snapshot {
            revision: 0,
            resume: Arc::new(initial),
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Arc<Resume> {
        self.tx.borrow().resume.clone()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Publishes `resume` as the new document and returns its revision.
    pub fn replace(&self, resume: Resume) -> u64 {
        let resume = Arc::new(resume);
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.revision += 1;
            snapshot.resume = resume;
            revision = snapshot.revision;
        });
        debug!(revision, "resume document replaced");
        revision
    }

    /// Restores the initial empty document. Goes through `replace` like any
    /// other mutation.
    pub fn reset(&self) -> u64 {
        self.replace(Resume::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new(Resume::default())
    }
}
