//! The résumé document and its entry types.
//!
//! Field names serialize in camelCase so the JSON shape matches what browser
//! clients already send (`personalInfo`, `relevantCoursework`, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    /// Carried with the document but never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivityEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
}

/// The document every session starts from: empty personal fields, empty
/// entry lists, no free-text blocks.
impl Default for Resume {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: None,
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Some(Vec::new()),
            activities: Some(Vec::new()),
            languages: None,
            certifications: None,
            awards: None,
        }
    }
}

impl Resume {
    pub fn projects(&self) -> &[ProjectEntry] {
        self.projects.as_deref().unwrap_or(&[])
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        self.activities.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            location: Some(String::new()),
            github: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    /// One string per bullet, in display order.
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_coursework: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resume_has_empty_sections() {
        let resume = Resume::default();
        assert!(resume.personal_info.name.is_empty());
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        assert_eq!(resume.projects, Some(vec![]));
        assert_eq!(resume.activities, Some(vec![]));
        assert!(resume.languages.is_none());
    }

    #[test]
    fn test_deserializes_camel_case_document() {
        let json = r#"{
            "personalInfo": {
                "name": "Ada Lovelace",
                "title": "Engineer",
                "email": "ada@example.com",
                "phone": "555-0100",
                "github": "https://github.com/ada"
            },
            "education": [{
                "degree": "BS in Mathematics",
                "institution": "University of London",
                "duration": "Sep 1832 - May 1836",
                "relevantCoursework": "Analysis"
            }],
            "skills": ["Python", "Python"]
        }"#;

        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.name, "Ada Lovelace");
        assert_eq!(resume.personal_info.location, None);
        assert_eq!(
            resume.education[0].relevant_coursework.as_deref(),
            Some("Analysis")
        );
        assert_eq!(resume.education[0].gpa, None);
        assert_eq!(resume.skills, vec!["Python", "Python"]);
        assert!(resume.projects().is_empty());
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn test_document_without_personal_info_is_accepted() {
        let resume: Resume = serde_json::from_str(r#"{"skills": ["Go"]}"#).unwrap();
        assert_eq!(resume.personal_info, PersonalInfo::default());
        assert_eq!(resume.skills, vec!["Go"]);
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let entry = EducationEntry {
            degree: "BS".to_string(),
            institution: "MIT".to_string(),
            duration: "2020 - 2024".to_string(),
            gpa: None,
            relevant_coursework: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("gpa").is_none());
        assert!(value.get("relevantCoursework").is_none());
    }
}
