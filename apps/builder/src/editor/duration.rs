//! Date-range durations: `"Sep 2020 - May 2024"` or `"Sep 2020 - Present"`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MONTH_YEAR: &str = "%b %Y";
const OPEN_END: &str = "Present";

/// When a section lets chosen dates overwrite the free-text duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRule {
    /// Only once both start and end are chosen.
    BothAnchors,
    /// As soon as a start is chosen; a missing end reads "Present".
    OpenEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAnchors {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateAnchors {
    pub fn set(&mut self, anchor: Anchor, date: Option<NaiveDate>) {
        match anchor {
            Anchor::Start => self.start = date,
            Anchor::End => self.end = date,
        }
    }

    /// The duration these anchors dictate under `rule`, or `None` when the
    /// user's typed duration should be left alone.
    pub fn derive(&self, rule: DurationRule) -> Option<String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(format_range(start, Some(end))),
            (Some(start), None) if rule == DurationRule::OpenEnded => {
                Some(format_range(start, None))
            }
            _ => None,
        }
    }
}

pub fn format_range(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end = match end {
        Some(end) => end.format(MONTH_YEAR).to_string(),
        None => OPEN_END.to_string(),
    };
    format!("{} - {}", start.format(MONTH_YEAR), end)
}
