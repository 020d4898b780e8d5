mod data;
mod loader;

pub use loader::{configured_knowledge_base, load_knowledge_base, parse_knowledge_base};

use crate::error::PairingError;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

/// Literal answer of the `pairing_kb` tool when an event has no curated record.
pub const NO_MATCH: &str = "NO_MATCH";

/// Name of the KB lookup tool as reported in `tools_used`.
pub const KB_TOOL_NAME: &str = "pairing_kb";

/// Normalized event name: trimmed and lower-cased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey(String);

impl EventKey {
    /// Returns `None` when the label is blank after trimming.
    pub fn new(label: &str) -> Option<Self> {
        let key = label.trim().to_lowercase();
        if key.is_empty() {
            None
        } else {
            Some(EventKey(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Curated food courses for an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FoodSections {
    #[serde(default)]
    pub appetizers: Vec<String>,
    #[serde(default)]
    pub mains: Vec<String>,
    #[serde(default)]
    pub sides: Vec<String>,
    #[serde(default)]
    pub desserts: Vec<String>,
}

/// Curated drinks for an event. Empty lists are omitted when serialized,
/// so a record without alcohol carries no `alcoholic` key at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrinkSections {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alcoholic: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_alcoholic: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coffee: Vec<String>,
}

impl DrinkSections {
    pub fn has_alcohol(&self) -> bool {
        !self.alcoholic.is_empty()
    }
}

/// One curated knowledge base entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KbRecord {
    pub food: FoodSections,
    pub drinks: DrinkSections,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Event name to curated record mapping.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    records: BTreeMap<EventKey, KbRecord>,
}

impl KnowledgeBase {
    /// Knowledge base compiled into the binary.
    pub fn builtin() -> Self {
        let records = data::builtin_records()
            .into_iter()
            .filter_map(|(name, record)| EventKey::new(name).map(|key| (key, record)))
            .collect();
        KnowledgeBase { records }
    }

    /// Build a knowledge base from named records, rejecting blank names and
    /// names that collide once normalized.
    pub fn from_records<I, S>(records: I) -> Result<Self, PairingError>
    where
        I: IntoIterator<Item = (S, KbRecord)>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (name, record) in records {
            let name = name.as_ref();
            let key = EventKey::new(name).ok_or_else(|| {
                PairingError::KnowledgeBase("event name cannot be empty".to_string())
            })?;
            if map.contains_key(&key) {
                return Err(PairingError::KnowledgeBase(format!(
                    "duplicate event '{}'",
                    key
                )));
            }
            map.insert(key, record);
        }
        Ok(KnowledgeBase { records: map })
    }

    /// Exact lookup after trimming and lower-casing. A miss is `None`, never an error.
    pub fn lookup(&self, event: &str) -> Option<&KbRecord> {
        let record = EventKey::new(event).and_then(|key| self.records.get(&key));
        debug!(
            "KB lookup '{}': {}",
            event.trim(),
            if record.is_some() { "hit" } else { "miss" }
        );
        record
    }

    /// Answer of the `pairing_kb` tool: `NO_MATCH`, or a compact JSON summary.
    pub fn tool_response(&self, event: &str) -> String {
        match self.lookup(event) {
            Some(record) => json!({
                "event": event.trim(),
                "menu": record.food,
                "drinks": record.drinks,
                "tags": record.tags,
            })
            .to_string(),
            None => NO_MATCH.to_string(),
        }
    }

    /// Curated event names in sorted order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(EventKey::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn builtin_kb() -> &'static KnowledgeBase {
    static BUILTIN: OnceLock<KnowledgeBase> = OnceLock::new();
    BUILTIN.get_or_init(KnowledgeBase::builtin)
}

/// Look up curated pairings for an event in the compiled-in knowledge base.
pub fn lookup_pairings(event: &str) -> Option<&'static KbRecord> {
    builtin_kb().lookup(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_key_normalizes() {
        let key = EventKey::new("  Pizza Night \n").unwrap();
        assert_eq!(key.as_str(), "pizza night");
        assert!(EventKey::new("   ").is_none());
    }

    #[test]
    fn test_lookup_is_trim_and_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        let a = kb.lookup("  Pizza Night  ").unwrap();
        let b = kb.lookup("pizza night").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_every_stored_key() {
        let kb = KnowledgeBase::builtin();
        for name in kb.event_names() {
            let shouted = format!("  {}  ", name.to_uppercase());
            assert_eq!(kb.lookup(&shouted), kb.lookup(name), "{}", name);
            assert!(kb.lookup(name).is_some());
        }
    }

    #[test]
    fn test_lookup_has_no_partial_matching() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.lookup("pizza").is_none());
        assert!(kb.lookup("pizza night party").is_none());
        assert!(kb.lookup("").is_none());
        // Repeated misses behave the same
        assert!(kb.lookup("wedding dinner").is_none());
        assert!(kb.lookup("wedding dinner").is_none());
    }

    #[test]
    fn test_tool_response_no_match() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.tool_response("space launch"), NO_MATCH);
    }

    #[test]
    fn test_tool_response_omits_missing_drink_kinds() {
        let kb = KnowledgeBase::builtin();
        let response = kb.tool_response("Kids Birthday");
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(value["event"], "Kids Birthday");
        assert!(value["drinks"].get("alcoholic").is_none());
        assert!(value["drinks"]["non_alcoholic"].as_array().unwrap().len() >= 1);
        assert!(value["menu"]["mains"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m == "Cheese pizza"));
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let result = KnowledgeBase::from_records(vec![
            ("Brunch", KbRecord::default()),
            ("  brunch ", KbRecord::default()),
        ]);
        match result {
            Err(PairingError::KnowledgeBase(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_records_rejects_blank_name() {
        let result = KnowledgeBase::from_records(vec![(" ", KbRecord::default())]);
        assert!(matches!(result, Err(PairingError::KnowledgeBase(_))));
    }

    #[test]
    fn test_lookup_pairings_uses_builtin() {
        let record = lookup_pairings("coffee & pastry break").unwrap();
        assert!(record.food.appetizers.is_empty());
        assert!(!record.drinks.coffee.is_empty());
        assert!(lookup_pairings("nothing here").is_none());
    }
}
