/// System prompt for pairing recommendations.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const PAIRING_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Instructions for the one-shot schema repair pass.
pub const REPAIR_PROMPT: &str = include_str!("repair_prompt.txt");

/// JSON shape every response must follow.
pub const RESPONSE_FORMAT: &str = r#"{
  "event": "<string, required>",
  "audience": "<string or null: adults | kids | mixed | 21+>",
  "constraints": ["<string>", "..."],
  "cuisine_pref": "<string or null>",
  "menu": {
    "appetizers": ["<string>"],
    "mains": ["<string>"],
    "sides": ["<string>"],
    "desserts": ["<string>"]
  },
  "drinks": {
    "alcoholic": ["<string>"],
    "non_alcoholic": ["<string>"]
  },
  "rationale": "<string, required>",
  "sources": ["<string>"],
  "tools_used": ["<string>"]
}"#;

/// Build the system prompt, listing the curated event names.
pub fn build_system_prompt<'a, I>(event_names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = event_names.into_iter().collect();
    let mut prompt = PAIRING_SYSTEM_PROMPT.trim_end().to_string();

    if !names.is_empty() {
        prompt.push_str("\n\nCurated presets in the knowledge base: ");
        prompt.push_str(&names.join("; "));
        prompt.push('.');
    }

    prompt.push_str("\n\nReturn ONLY valid JSON with this shape:\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

/// Build the repair system prompt.
pub fn build_repair_prompt() -> String {
    format!(
        "{}\n\nRequired shape:\n{}",
        REPAIR_PROMPT.trim_end(),
        RESPONSE_FORMAT
    )
}
