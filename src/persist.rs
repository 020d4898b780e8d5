//! Append-only text log of saved recommendations.
//!
//! Each record is a timestamped card followed by a blank line, a rule of
//! `=` characters and another blank line. Input that is not recognisable as a
//! pairing object is written verbatim inside the card.

use crate::error::PairingError;
use crate::render::PLACEHOLDER;
use chrono::Local;
use log::{debug, info};
use regex::Regex;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_LOG_FILE: &str = "pairings_output.txt";

const CARD_TITLE: &str = "DELI PAIRING RECOMMENDATION";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 60;

/// Line separating consecutive records in the log.
pub fn record_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn object_regex() -> &'static Regex {
    static OBJECT: OnceLock<Regex> = OnceLock::new();
    OBJECT.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"))
}

/// Recover a JSON object from loosely-typed text: parse it directly, or parse
/// the first `{` .. last `}` span.
pub fn recover_record(raw: &str) -> Option<Value> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(raw) {
        return Some(value);
    }

    let span = object_regex().find(raw)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => {
            debug!("No JSON object recoverable from log input");
            None
        }
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn list_field(value: &Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .filter_map(|i| i.as_str().map(String::from))
        .collect()
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}:", label));
    lines.extend(items.iter().map(|item| format!("  • {}", item)));
    lines.push(String::new());
}

fn structured_card(record: &Value, timestamp: &str) -> Vec<String> {
    let menu = &record["menu"];
    let drinks = &record["drinks"];

    let event = str_field(record, "event").unwrap_or_else(|| "N/A".to_string());
    let constraints = list_field(record, "constraints");

    let mut lines = vec![
        CARD_TITLE.to_string(),
        format!("Generated on: {}", timestamp),
        String::new(),
        format!("Event: {}", title_case(&event)),
        "-".repeat(45),
        format!(
            "Audience: {}",
            str_field(record, "audience").unwrap_or_else(|| PLACEHOLDER.to_string())
        ),
        format!(
            "Cuisine: {}",
            str_field(record, "cuisine_pref").unwrap_or_else(|| "Italian".to_string())
        ),
        format!(
            "Constraints: {}",
            if constraints.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                constraints.join(", ")
            }
        ),
        String::new(),
    ];

    push_list(&mut lines, "Appetizers", &list_field(menu, "appetizers"));
    push_list(&mut lines, "Mains", &list_field(menu, "mains"));
    push_list(&mut lines, "Sides", &list_field(menu, "sides"));
    push_list(&mut lines, "Desserts", &list_field(menu, "desserts"));
    push_list(
        &mut lines,
        "Drinks (Alcoholic)",
        &list_field(drinks, "alcoholic"),
    );
    push_list(
        &mut lines,
        "Drinks (Non-Alcoholic)",
        &list_field(drinks, "non_alcoholic"),
    );

    if let Some(rationale) = str_field(record, "rationale") {
        lines.push("Rationale:".to_string());
        lines.push(format!("  {}", rationale));
        lines.push(String::new());
    }

    push_list(&mut lines, "Sources", &list_field(record, "sources"));

    let tools = list_field(record, "tools_used");
    lines.push("Tools Used:".to_string());
    lines.push(if tools.is_empty() {
        format!("  {}", PLACEHOLDER)
    } else {
        format!("  {}", tools.join(", "))
    });

    lines
}

/// Format one log record, including its trailing separator.
pub fn format_card(raw: &str, timestamp: &str) -> String {
    let lines = match recover_record(raw) {
        Some(record) => structured_card(&record, timestamp),
        None => vec![
            CARD_TITLE.to_string(),
            format!("Generated on: {}", timestamp),
            String::new(),
            raw.to_string(),
        ],
    };

    format!("{}\n\n{}\n\n", lines.join("\n").trim_end(), record_rule())
}

/// Append-only log target.
#[derive(Debug, Clone)]
pub struct PairingLog {
    path: PathBuf,
}

impl Default for PairingLog {
    fn default() -> Self {
        PairingLog::new(DEFAULT_LOG_FILE)
    }
}

impl PairingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PairingLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a card for `raw`, stamped with the current local time.
    pub fn append(&self, raw: &str) -> Result<String, PairingError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.append_with_timestamp(raw, &timestamp)
    }

    /// Append a card for `raw`. The file is created if absent and never truncated.
    pub fn append_with_timestamp(&self, raw: &str, timestamp: &str) -> Result<String, PairingError> {
        let card = format_card(raw, timestamp);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(card.as_bytes())?;

        info!("Appended pairing card to {}", self.path.display());
        Ok(format!(
            "Pairing successfully saved to {}",
            self.path.display()
        ))
    }
}

/// Append `raw` to the log file at `filename`.
pub fn save_to_txt(raw: &str, filename: impl AsRef<Path>) -> Result<String, PairingError> {
    PairingLog::new(filename.as_ref()).append(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "event": "game day / tailgate",
        "audience": "adults",
        "constraints": ["budget:$$"],
        "menu": {"appetizers": ["Wings"], "mains": ["Meatball subs"], "sides": [], "desserts": ["Brownies"]},
        "drinks": {"alcoholic": ["Pale ale"], "non_alcoholic": ["Cola"]},
        "rationale": "  Handheld food for the parking lot. ",
        "sources": ["Deli KB"],
        "tools_used": ["pairing_kb"]
    }"#;

    #[test]
    fn test_recover_direct_json() {
        let record = recover_record(RECORD).unwrap();
        assert_eq!(record["event"], "game day / tailgate");
    }

    #[test]
    fn test_recover_embedded_json() {
        let raw = format!("Here is the plan:\n{}\nCheers!", RECORD);
        assert!(recover_record(&raw).is_some());
    }

    #[test]
    fn test_recover_rejects_non_objects() {
        assert!(recover_record("just a sentence").is_none());
        assert!(recover_record("[1, 2, 3]").is_none());
        assert!(recover_record("{ not json }").is_none());
    }

    #[test]
    fn test_structured_card_layout() {
        let card = format_card(RECORD, "2024-05-01 18:30:00");

        assert!(card.starts_with("DELI PAIRING RECOMMENDATION\nGenerated on: 2024-05-01 18:30:00\n"));
        assert!(card.contains("Event: Game Day / Tailgate\n"));
        assert!(card.contains("Audience: adults\n"));
        assert!(card.contains("Cuisine: Italian\n"));
        assert!(card.contains("Constraints: budget:$$\n"));
        assert!(card.contains("Appetizers:\n  • Wings\n"));
        assert!(card.contains("Drinks (Alcoholic):\n  • Pale ale\n"));
        assert!(!card.contains("Sides:"));
        assert!(card.contains("Rationale:\n  Handheld food for the parking lot.\n"));
        assert!(card.contains("Sources:\n  • Deli KB\n"));
        assert!(card.contains("Tools Used:\n  pairing_kb"));
        assert!(card.ends_with(&format!("\n\n{}\n\n", record_rule())));
    }

    #[test]
    fn test_verbatim_card_for_malformed_input() {
        let card = format_card("The model said: try lasagna!", "2024-05-01 18:30:00");
        assert!(card.contains("\nThe model said: try lasagna!"));
        assert!(!card.contains("Event:"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("date night (italian)"), "Date Night (Italian)");
        assert_eq!(title_case("build-your-own pasta kit"), "Build-Your-Own Pasta Kit");
    }
}
