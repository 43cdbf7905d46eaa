use serde::Serialize;

use crate::template::TemplateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadingRule {
    Below,
    AboveAndBelow,
}

/// Visual knobs that differ between templates. Content and section order
/// are the same for every template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub header_align: Align,
    pub heading_rule: HeadingRule,
    /// RGB used for section headings and their rules.
    pub accent: [u8; 3],
}

const BLACK: [u8; 3] = [0, 0, 0];
const VIOLET: [u8; 3] = [0x7d, 0x47, 0xea];

impl Theme {
    pub fn for_template(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Default => Theme {
                header_align: Align::Center,
                heading_rule: HeadingRule::Below,
                accent: BLACK,
            },
            TemplateKind::Classic => Theme {
                header_align: Align::Center,
                heading_rule: HeadingRule::AboveAndBelow,
                accent: BLACK,
            },
            TemplateKind::Creative => Theme {
                header_align: Align::Left,
                heading_rule: HeadingRule::Below,
                accent: VIOLET,
            },
        }
    }
}
