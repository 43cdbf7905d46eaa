// Prompt fragments shared by every LLM caller. Callers keep their own
// prompts.rs next to the code that uses them.

/// Forces a bare JSON reply.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
