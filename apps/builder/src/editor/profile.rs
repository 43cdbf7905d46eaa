//! Whole-form submits: personal info and the additional free-text blocks.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::editor::validation::{Checker, ValidationError};
use crate::models::resume::PersonalInfo;
use crate::store::ResumeStore;

pub fn validate_personal_info(info: &PersonalInfo) -> Result<(), ValidationError> {
    Checker::new()
        .require("name", &info.name, "Name is required")
        .require("title", &info.title, "Title is required")
        .email("email", &info.email)
        .require("phone", &info.phone, "Phone is required")
        .finish()
}

/// Strips surrounding whitespace from every text field, so what is
/// validated is exactly what gets stored.
fn trimmed(info: PersonalInfo) -> PersonalInfo {
    let trim = |s: String| s.trim().to_string();
    PersonalInfo {
        name: trim(info.name),
        title: trim(info.title),
        email: trim(info.email),
        phone: trim(info.phone),
        location: info.location.map(trim),
        github: info.github.map(trim),
    }
}

/// Validates `info` and, if it passes, makes it the document's personal info.
pub fn submit_personal_info(
    store: &ResumeStore,
    info: PersonalInfo,
) -> Result<u64, ValidationError> {
    let info = trimmed(info);
    validate_personal_info(&info)?;
    let mut next = (*store.get()).clone();
    next.personal_info = info;
    let revision = store.replace(next);
    info!(revision, "personal info updated");
    Ok(revision)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
}

/// Free-text blocks have no required fields; blank text clears the block.
pub fn submit_additional(store: &ResumeStore, additional: AdditionalInfo) -> u64 {
    let clean = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let mut next = (*store.get()).clone();
    next.languages = clean(additional.languages);
    next.certifications = clean(additional.certifications);
    next.awards = clean(additional.awards);
    store.replace(next)
}
