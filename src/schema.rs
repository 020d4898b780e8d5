use crate::error::PairingError;
use crate::kb::{KbRecord, KB_TOOL_NAME};
use async_trait::async_trait;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::sync::OnceLock;

/// Source tag used for recommendations taken straight from the knowledge base.
pub const KB_SOURCE: &str = "Deli KB";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuSection {
    #[serde(default, deserialize_with = "nullable_list")]
    pub appetizers: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub mains: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub sides: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub desserts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrinkSection {
    #[serde(default, deserialize_with = "nullable_list")]
    pub alcoholic: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub non_alcoholic: Vec<String>,
}

/// A validated pairing recommendation for one query.
///
/// `menu`, `drinks`, `event` and `rationale` are required; every list field
/// defaults to empty and the optional scalars default to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResponse {
    pub event: String,
    /// e.g. "adults", "kids", "mixed", "21+"
    #[serde(default)]
    pub audience: Option<String>,
    /// e.g. "vegetarian", "nut-free", "budget:$"
    #[serde(default, deserialize_with = "nullable_list")]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub cuisine_pref: Option<String>,
    pub menu: MenuSection,
    pub drinks: DrinkSection,
    pub rationale: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub sources: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub tools_used: Vec<String>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PairingResponse {
    /// Build a recommendation directly from a curated record.
    ///
    /// Coffee is served alongside the non-alcoholic drinks; alcohol only
    /// appears when the record lists it.
    pub fn from_kb_record(event: &str, record: &KbRecord) -> Self {
        let mut non_alcoholic = record.drinks.non_alcoholic.clone();
        non_alcoholic.extend(record.drinks.coffee.iter().cloned());

        let rationale = match &record.notes {
            Some(notes) => notes.clone(),
            None => {
                let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
                let mut text = format!(
                    "Curated deli preset for this occasion ({}).",
                    tags.join(", ")
                );
                if !record.drinks.has_alcohol() {
                    text.push_str(" No alcohol is suggested for this event.");
                }
                text
            }
        };

        PairingResponse {
            event: event.trim().to_string(),
            audience: None,
            constraints: Vec::new(),
            cuisine_pref: None,
            menu: MenuSection {
                appetizers: record.food.appetizers.clone(),
                mains: record.food.mains.clone(),
                sides: record.food.sides.clone(),
                desserts: record.food.desserts.clone(),
            },
            drinks: DrinkSection {
                alcoholic: record.drinks.alcoholic.clone(),
                non_alcoholic,
            },
            rationale,
            sources: vec![KB_SOURCE.to_string()],
            tools_used: vec![KB_TOOL_NAME.to_string()],
        }
    }

    /// Pretty JSON, the same shape a provider is asked to produce.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)```").expect("valid fence regex"))
}

/// Pick the JSON object out of model text: a fenced code block, else the
/// span from the first `{` to the last `}`, else the trimmed text.
pub fn extract_json_candidate(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(inner) = fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| inner.starts_with('{'))
    {
        return inner;
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse model text into a [`PairingResponse`], returning the failure reason.
pub fn parse_response(text: &str) -> Result<PairingResponse, String> {
    let candidate = extract_json_candidate(text);
    // Only the first value counts; prose after it is ignored
    match serde_json::Deserializer::from_str(candidate)
        .into_iter::<PairingResponse>()
        .next()
    {
        Some(parsed) => parsed.map_err(|e| e.to_string()),
        None => Err("no JSON object in model output".to_string()),
    }
}

/// Validate model text without a repair pass.
pub fn validate(text: &str) -> Result<PairingResponse, PairingError> {
    parse_response(text).map_err(|reason| PairingError::SchemaViolation {
        reason,
        raw: text.to_string(),
    })
}

/// Collaborator asked, once, to coerce malformed text into the schema.
#[async_trait]
pub trait Repairer: Send + Sync {
    async fn repair(
        &self,
        malformed: &str,
        reason: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Validate; on failure run one repair pass and validate the repaired text
/// again. Errors always carry the original text.
pub async fn validate_with_repair(
    text: &str,
    repairer: &dyn Repairer,
) -> Result<PairingResponse, PairingError> {
    let reason = match parse_response(text) {
        Ok(response) => return Ok(response),
        Err(reason) => reason,
    };

    info!("Model output failed validation, attempting repair: {}", reason);

    let repaired = repairer
        .repair(text, &reason)
        .await
        .map_err(|e| PairingError::RepairFailed {
            reason: e.to_string(),
            raw: text.to_string(),
        })?;
    debug!("Repaired output: {}", repaired);

    parse_response(&repaired).map_err(|second| {
        warn!("Repaired output still invalid: {}", second);
        PairingError::SchemaViolation {
            reason: format!("{} (after repair: {})", reason, second),
            raw: text.to_string(),
        }
    })
}
