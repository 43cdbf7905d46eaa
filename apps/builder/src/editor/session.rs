use crate::editor::lists::SkillsController;
use crate::editor::section::{SectionController, SectionKind, SectionOps};
use crate::models::resume::{ActivityEntry, EducationEntry, ExperienceEntry, ProjectEntry};

/// All controller state for the one editing session. Lives behind a single
/// async mutex in `AppState`, which is what serializes edits.
#[derive(Debug, Default)]
pub struct EditorSession {
    pub experience: SectionController<ExperienceEntry>,
    pub education: SectionController<EducationEntry>,
    pub projects: SectionController<ProjectEntry>,
    pub activities: SectionController<ActivityEntry>,
    pub skills: SkillsController,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut dyn SectionOps {
        match kind {
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Activities => &mut self.activities,
        }
    }

    /// Drops every section's draft. Used when the document is swapped out
    /// wholesale and pending edit indices no longer mean anything.
    pub fn discard_all(&mut self) {
        for kind in SectionKind::ALL {
            self.section_mut(kind).discard();
        }
    }

    pub fn section(&self, kind: SectionKind) -> &dyn SectionOps {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Projects => &self.projects,
            SectionKind::Activities => &self.activities,
        }
    }
}
