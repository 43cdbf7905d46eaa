// Prompt constants for the bullet generation endpoint.

use crate::assist::ContentKind;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for bullet generation: résumé writing voice plus the shared
/// JSON-only rules.
pub fn bullets_system() -> String {
    format!(
        "You are an experienced resume writer who turns rough notes into \
        concise, achievement-focused resume bullet points. {JSON_ONLY_SYSTEM}"
    )
}

/// Bullet prompt template. Replace `{kind_label}`, `{kind_guidance}` and
/// `{description}` before sending.
pub const BULLETS_PROMPT_TEMPLATE: &str = r#"Rewrite the following {kind_label} notes as resume bullet points.

Notes:
"""
{description}
"""

Return a JSON object with this EXACT schema (no extra fields):
{
  "bulletPoints": [
    "Reduced API p99 latency by 35% by introducing a request-coalescing cache"
  ]
}

Rules:
- 3 to 5 bullet points.
- Start each bullet with a strong past-tense action verb.
- One sentence per bullet, no trailing period, under 25 words.
- Only use facts present in the notes. Do NOT invent metrics, employers or technologies.
{kind_guidance}"#;

const EXPERIENCE_GUIDANCE: &str =
    "- Emphasize ownership, scope and measurable outcomes of the role.";
const PROJECT_GUIDANCE: &str =
    "- Emphasize what was built, the technical approach and the result.";

pub fn build_bullets_prompt(description: &str, kind: ContentKind) -> String {
    let (label, guidance) = match kind {
        ContentKind::Experience => ("work experience", EXPERIENCE_GUIDANCE),
        ContentKind::Project => ("project", PROJECT_GUIDANCE),
    };
    BULLETS_PROMPT_TEMPLATE
        .replace("{kind_label}", label)
        .replace("{kind_guidance}", guidance)
        .replace("{description}", description.trim())
}
