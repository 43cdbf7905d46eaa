//! Per-section rules: which fields are required, how a draft is tidied
//! before it is stored, and where the duration and bullets live.

use crate::assist::ContentKind;
use crate::editor::duration::DurationRule;
use crate::editor::section::{SectionEntry, SectionKind};
use crate::editor::validation::{Checker, ValidationError};
use crate::models::resume::{ActivityEntry, EducationEntry, ExperienceEntry, ProjectEntry, Resume};

fn drop_blank_lines(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().filter(|l| !l.trim().is_empty()).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

impl SectionEntry for ExperienceEntry {
    const KIND: SectionKind = SectionKind::Experience;
    const DURATION_RULE: DurationRule = DurationRule::OpenEnded;
    const ASSIST: Option<ContentKind> = Some(ContentKind::Experience);

    fn entries(resume: &Resume) -> &[Self] {
        &resume.experience
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.experience
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new()
            .require("title", &self.title, "Title is required")
            .require("company", &self.company, "Company is required")
            .require("duration", &self.duration, "Duration is required")
            .finish()
    }

    fn normalized(mut self) -> Self {
        self.description = drop_blank_lines(self.description);
        self
    }

    fn set_duration(&mut self, duration: String) {
        self.duration = duration;
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn replace_description(&mut self, lines: Vec<String>) {
        self.description = lines;
    }
}

impl SectionEntry for EducationEntry {
    const KIND: SectionKind = SectionKind::Education;
    const DURATION_RULE: DurationRule = DurationRule::BothAnchors;

    fn entries(resume: &Resume) -> &[Self] {
        &resume.education
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.education
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new()
            .require("degree", &self.degree, "Degree is required")
            .require("institution", &self.institution, "Institution is required")
            .require("duration", &self.duration, "Duration is required")
            .finish()
    }

    fn normalized(mut self) -> Self {
        self.gpa = non_empty(self.gpa);
        self.relevant_coursework = non_empty(self.relevant_coursework);
        self
    }

    fn set_duration(&mut self, duration: String) {
        self.duration = duration;
    }
}

impl SectionEntry for ProjectEntry {
    const KIND: SectionKind = SectionKind::Projects;
    const DURATION_RULE: DurationRule = DurationRule::BothAnchors;
    const ASSIST: Option<ContentKind> = Some(ContentKind::Project);

    fn entries(resume: &Resume) -> &[Self] {
        resume.projects()
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        resume.projects.get_or_insert_with(Vec::new)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new()
            .require("name", &self.name, "Project name is required")
            .require_lines(
                "description",
                &self.description,
                "At least one description line is required",
            )
            .finish()
    }

    fn normalized(mut self) -> Self {
        self.description = drop_blank_lines(self.description);
        self.duration = non_empty(self.duration);
        self.technologies = non_empty_list(self.technologies);
        self.achievements = non_empty_list(self.achievements.map(drop_blank_lines));
        self
    }

    fn set_duration(&mut self, duration: String) {
        self.duration = Some(duration);
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn replace_description(&mut self, lines: Vec<String>) {
        self.description = lines;
    }
}

impl SectionEntry for ActivityEntry {
    const KIND: SectionKind = SectionKind::Activities;
    const DURATION_RULE: DurationRule = DurationRule::BothAnchors;

    fn entries(resume: &Resume) -> &[Self] {
        resume.activities()
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        resume.activities.get_or_insert_with(Vec::new)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new()
            .require("name", &self.name, "Activity name is required")
            .require("role", &self.role, "Role is required")
            .require("duration", &self.duration, "Duration is required")
            .finish()
    }

    fn normalized(mut self) -> Self {
        self.description = non_empty_list(self.description.map(drop_blank_lines));
        self
    }

    fn set_duration(&mut self, duration: String) {
        self.duration = duration;
    }

    fn description(&self) -> Vec<String> {
        self.description.clone().unwrap_or_default()
    }

    fn replace_description(&mut self, lines: Vec<String>) {
        self.description = Some(lines);
    }
}
