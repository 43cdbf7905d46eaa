//! Resume Preview Renderer: projects the document and a template id into a
//! print-oriented visual tree.
//!
//! `render` is pure: same inputs, same tree. It accepts half-filled
//! documents. Sections with nothing to show are left out, except Education,
//! Experience and Technical Skills, whose headings always appear.

pub mod handlers;
pub mod live;
pub mod theme;

use serde::Serialize;

use crate::models::resume::{ActivityEntry, EducationEntry, ExperienceEntry, ProjectEntry, Resume};
use crate::template::TemplateKind;

pub use live::LivePreview;
pub use theme::{Align, HeadingRule, Theme};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTree {
    /// The id that was asked for, which may not be a known template.
    pub template_id: String,
    pub template: TemplateKind,
    pub theme: Theme,
    pub header: Header,
    pub sections: Vec<Section>,
}

#[cfg(test)]
impl PreviewTree {
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub title: Option<String>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Contact {
    Text { text: String },
    Link { label: String, href: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Education,
    Experience,
    Skills,
    Projects,
    Activities,
    Additional,
}

impl SectionId {
    pub fn heading(&self) -> &'static str {
        match self {
            SectionId::Education => "EDUCATION",
            SectionId::Experience => "EXPERIENCE",
            SectionId::Skills => "TECHNICAL SKILLS",
            SectionId::Projects => "UNIVERSITY PROJECTS",
            SectionId::Activities => "ACTIVITIES",
            SectionId::Additional => "ADDITIONAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub heading: &'static str,
    /// One item per entry, in document order.
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Left column for names and titles, right column for dates and GPA.
    Columns { left: Vec<Line>, right: Vec<Line> },
    Line(Line),
    /// A bold label followed by text, e.g. `Technologies: Rust, Axum`.
    Labeled { label: String, text: String },
    Bullets { items: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub text: String,
    pub style: TextStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Regular,
    Bold,
    Italic,
    Small,
}

pub fn render(resume: &Resume, template_id: &str) -> PreviewTree {
    let template = TemplateKind::resolve(template_id);

    let mut sections = vec![
        section(SectionId::Education, resume.education.iter().map(education_item)),
        section(SectionId::Experience, resume.experience.iter().map(experience_item)),
        skills_section(&resume.skills),
    ];
    if !resume.projects().is_empty() {
        sections.push(section(
            SectionId::Projects,
            resume.projects().iter().map(project_item),
        ));
    }
    if !resume.activities().is_empty() {
        sections.push(section(
            SectionId::Activities,
            resume.activities().iter().map(activity_item),
        ));
    }
    if let Some(additional) = additional_section(resume) {
        sections.push(additional);
    }

    PreviewTree {
        template_id: template_id.to_string(),
        template,
        theme: Theme::for_template(template),
        header: header(resume),
        sections,
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn header(resume: &Resume) -> Header {
    let info = &resume.personal_info;
    let mut contacts = Vec::new();
    if let Some(location) = present(info.location.as_ref()) {
        contacts.push(Contact::Text {
            text: location.to_string(),
        });
    }
    for text in [&info.phone, &info.email] {
        if !text.is_empty() {
            contacts.push(Contact::Text { text: text.clone() });
        }
    }
    if let Some(github) = present(info.github.as_ref()) {
        contacts.push(Contact::Link {
            label: "GitHub".to_string(),
            href: github.to_string(),
        });
    }

    Header {
        name: info.name.clone(),
        title: Some(info.title.clone()).filter(|t| !t.is_empty()),
        contacts,
    }
}

fn section(id: SectionId, items: impl Iterator<Item = Item>) -> Section {
    Section {
        id,
        heading: id.heading(),
        items: items.collect(),
    }
}

fn bullets(lines: &[String]) -> Option<Block> {
    (!lines.is_empty()).then(|| Block::Bullets {
        items: lines.to_vec(),
    })
}

fn education_item(edu: &EducationEntry) -> Item {
    let mut left = vec![
        Line::new(&edu.institution, TextStyle::Bold),
        Line::new(&edu.degree, TextStyle::Regular),
    ];
    if let Some(coursework) = present(edu.relevant_coursework.as_ref()) {
        left.push(Line::new(
            format!("Relevant Coursework: {coursework}"),
            TextStyle::Small,
        ));
    }
    let mut right = vec![Line::new(&edu.duration, TextStyle::Regular)];
    if let Some(gpa) = present(edu.gpa.as_ref()) {
        right.push(Line::new(format!("Cumulative GPA: {gpa}"), TextStyle::Regular));
    }
    Item {
        blocks: vec![Block::Columns { left, right }],
    }
}

fn experience_item(exp: &ExperienceEntry) -> Item {
    let mut blocks = vec![
        Block::Columns {
            left: vec![Line::new(&exp.company, TextStyle::Bold)],
            right: vec![Line::new(&exp.duration, TextStyle::Regular)],
        },
        Block::Line(Line::new(&exp.title, TextStyle::Italic)),
    ];
    blocks.extend(bullets(&exp.description));
    Item { blocks }
}

fn skills_section(skills: &[String]) -> Section {
    let items = if skills.is_empty() {
        Vec::new()
    } else {
        vec![Item {
            blocks: vec![Block::Line(Line::new(skills.join(", "), TextStyle::Small))],
        }]
    };
    Section {
        id: SectionId::Skills,
        heading: SectionId::Skills.heading(),
        items,
    }
}

fn project_item(project: &ProjectEntry) -> Item {
    let right = present(project.duration.as_ref())
        .map(|d| vec![Line::new(d, TextStyle::Regular)])
        .unwrap_or_default();
    let mut blocks = vec![Block::Columns {
        left: vec![Line::new(&project.name, TextStyle::Bold)],
        right,
    }];
    blocks.extend(bullets(&project.description));
    if let Some(tech) = project.technologies.as_ref().filter(|t| !t.is_empty()) {
        blocks.push(Block::Labeled {
            label: "Technologies".to_string(),
            text: tech.join(", "),
        });
    }
    if let Some(achievements) = project.achievements.as_deref() {
        blocks.extend(bullets(achievements));
    }
    Item { blocks }
}

fn activity_item(activity: &ActivityEntry) -> Item {
    let mut blocks = vec![
        Block::Columns {
            left: vec![Line::new(&activity.name, TextStyle::Bold)],
            right: vec![Line::new(&activity.duration, TextStyle::Regular)],
        },
        Block::Line(Line::new(&activity.role, TextStyle::Italic)),
    ];
    if let Some(description) = activity.description.as_deref() {
        blocks.extend(bullets(description));
    }
    Item { blocks }
}

fn additional_section(resume: &Resume) -> Option<Section> {
    let blocks: Vec<Block> = [
        ("Languages", &resume.languages),
        ("Certifications", &resume.certifications),
        ("Awards", &resume.awards),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        present(value.as_ref()).map(|text| Block::Labeled {
            label: label.to_string(),
            text: text.to_string(),
        })
    })
    .collect();

    if blocks.is_empty() {
        return None;
    }
    Some(Section {
        id: SectionId::Additional,
        heading: SectionId::Additional.heading(),
        items: vec![Item { blocks }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;

    fn headings(tree: &PreviewTree) -> Vec<&'static str> {
        tree.sections.iter().map(|s| s.heading).collect()
    }

    fn stanford() -> EducationEntry {
        EducationEntry {
            institution: "Stanford University".to_string(),
            degree: "BS in Computer Science".to_string(),
            duration: "Sep 2020 - May 2024".to_string(),
            gpa: None,
            relevant_coursework: None,
        }
    }

    #[test]
    fn test_empty_resume_keeps_core_headings_only() {
        let tree = render(&Resume::default(), "default");

        assert_eq!(
            headings(&tree),
            vec!["EDUCATION", "EXPERIENCE", "TECHNICAL SKILLS"]
        );
        assert!(tree.sections.iter().all(|s| s.items.is_empty()));
        assert!(tree.section(SectionId::Projects).is_none());
        assert!(tree.section(SectionId::Activities).is_none());
        assert!(tree.section(SectionId::Additional).is_none());
        assert_eq!(tree.header.name, "");
        assert_eq!(tree.header.title, None);
        assert!(tree.header.contacts.is_empty());
    }

    #[test]
    fn test_absent_entry_lists_are_tolerated() {
        let resume = Resume {
            projects: None,
            activities: None,
            ..Resume::default()
        };
        let tree = render(&resume, "classic");
        assert_eq!(tree.sections.len(), 3);
    }

    #[test]
    fn test_single_education_entry_without_gpa() {
        let resume = Resume {
            education: vec![stanford()],
            ..Resume::default()
        };
        let tree = render(&resume, "default");
        let education = tree.section(SectionId::Education).unwrap();

        assert_eq!(education.items.len(), 1);
        let Block::Columns { left, right } = &education.items[0].blocks[0] else {
            panic!("education entry should render as columns");
        };
        assert_eq!(left[0], Line::new("Stanford University", TextStyle::Bold));
        assert_eq!(left[1], Line::new("BS in Computer Science", TextStyle::Regular));
        assert_eq!(left.len(), 2);
        assert_eq!(right, &vec![Line::new("Sep 2020 - May 2024", TextStyle::Regular)]);
        assert!(!right.iter().any(|l| l.text.contains("GPA")));
    }

    #[test]
    fn test_gpa_and_coursework_lines() {
        let resume = Resume {
            education: vec![EducationEntry {
                gpa: Some("3.9".to_string()),
                relevant_coursework: Some("Compilers".to_string()),
                ..stanford()
            }],
            ..Resume::default()
        };
        let tree = render(&resume, "default");
        let Block::Columns { left, right } =
            &tree.section(SectionId::Education).unwrap().items[0].blocks[0]
        else {
            panic!("expected columns");
        };
        assert_eq!(left[2].text, "Relevant Coursework: Compilers");
        assert_eq!(right[1].text, "Cumulative GPA: 3.9");
    }

    #[test]
    fn test_experience_item_layout() {
        let resume = Resume {
            experience: vec![ExperienceEntry {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "Jan 2022 - Present".to_string(),
                description: vec!["Built billing".to_string(), "Cut costs".to_string()],
            }],
            ..Resume::default()
        };
        let tree = render(&resume, "default");
        let blocks = &tree.section(SectionId::Experience).unwrap().items[0].blocks;

        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Line(Line::new("Backend Engineer", TextStyle::Italic))
        );
        assert_eq!(
            blocks[2],
            Block::Bullets {
                items: vec!["Built billing".to_string(), "Cut costs".to_string()]
            }
        );
    }

    #[test]
    fn test_skills_are_comma_joined_with_duplicates() {
        let resume = Resume {
            skills: vec!["Python".to_string(), "Python".to_string(), "Rust".to_string()],
            ..Resume::default()
        };
        let tree = render(&resume, "default");
        assert_eq!(
            tree.section(SectionId::Skills).unwrap().items[0].blocks[0],
            Block::Line(Line::new("Python, Python, Rust", TextStyle::Small))
        );
    }

    #[test]
    fn test_projects_activities_additional_appear_when_filled() {
        let resume = Resume {
            projects: Some(vec![ProjectEntry {
                name: "Compiler".to_string(),
                description: vec!["Wrote a parser".to_string()],
                duration: None,
                technologies: Some(vec!["Rust".to_string(), "LLVM".to_string()]),
                achievements: Some(vec!["Top project award".to_string()]),
            }]),
            activities: Some(vec![ActivityEntry {
                name: "Chess Club".to_string(),
                role: "President".to_string(),
                duration: "2021 - 2023".to_string(),
                description: None,
            }]),
            awards: Some("Dean's List".to_string()),
            languages: Some(String::new()),
            ..Resume::default()
        };
        let tree = render(&resume, "default");

        assert_eq!(
            headings(&tree),
            vec![
                "EDUCATION",
                "EXPERIENCE",
                "TECHNICAL SKILLS",
                "UNIVERSITY PROJECTS",
                "ACTIVITIES",
                "ADDITIONAL"
            ]
        );

        let project = &tree.section(SectionId::Projects).unwrap().items[0].blocks;
        assert_eq!(
            project[0],
            Block::Columns {
                left: vec![Line::new("Compiler", TextStyle::Bold)],
                right: vec![],
            }
        );
        assert!(project.contains(&Block::Labeled {
            label: "Technologies".to_string(),
            text: "Rust, LLVM".to_string(),
        }));
        assert_eq!(project.len(), 4);

        let activity = &tree.section(SectionId::Activities).unwrap().items[0].blocks;
        assert_eq!(activity.len(), 2);

        let additional = &tree.section(SectionId::Additional).unwrap().items[0].blocks;
        assert_eq!(
            additional,
            &vec![Block::Labeled {
                label: "Awards".to_string(),
                text: "Dean's List".to_string(),
            }]
        );
    }

    #[test]
    fn test_header_contacts_skip_empty_fields() {
        let resume = Resume {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                title: "Engineer".to_string(),
                email: "ada@example.com".to_string(),
                phone: String::new(),
                location: Some("London".to_string()),
                github: Some("https://github.com/ada".to_string()),
            },
            ..Resume::default()
        };
        let header = render(&resume, "default").header;

        assert_eq!(header.title.as_deref(), Some("Engineer"));
        assert_eq!(
            header.contacts,
            vec![
                Contact::Text {
                    text: "London".to_string()
                },
                Contact::Text {
                    text: "ada@example.com".to_string()
                },
                Contact::Link {
                    label: "GitHub".to_string(),
                    href: "https://github.com/ada".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_template_falls_back_to_default_projection() {
        let resume = Resume {
            skills: vec!["Go".to_string()],
            ..Resume::default()
        };
        let fallback = render(&resume, "does-not-exist");
        let default = render(&resume, "default");

        assert_eq!(fallback.template_id, "does-not-exist");
        assert_eq!(fallback.template, TemplateKind::Default);
        assert_eq!(fallback.theme, default.theme);
        assert_eq!(fallback.sections, default.sections);
    }

    #[test]
    fn test_templates_change_theme_not_content() {
        let resume = Resume {
            education: vec![stanford()],
            ..Resume::default()
        };
        let classic = render(&resume, "classic");
        let creative = render(&resume, "creative");

        assert_eq!(classic.sections, creative.sections);
        assert_eq!(classic.theme.heading_rule, HeadingRule::AboveAndBelow);
        assert_eq!(creative.theme.header_align, Align::Left);
    }

    #[test]
    fn test_render_is_deterministic() {
        let resume = Resume {
            education: vec![stanford()],
            skills: vec!["SQL".to_string()],
            ..Resume::default()
        };
        assert_eq!(render(&resume, "creative"), render(&resume, "creative"));
    }
}
