use super::{DrinkSections, FoodSections, KbRecord, KnowledgeBase};
use crate::config::AppConfig;
use crate::error::PairingError;
use config::{Config, File, FileFormat};
use log::info;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// On-disk shape of a knowledge base file:
///
/// ```toml
/// [[events]]
/// name = "pizza night"
/// tags = ["casual"]
///
/// [events.food]
/// mains = ["Calzone"]
///
/// [events.drinks]
/// non_alcoholic = ["Cola"]
/// ```
#[derive(Debug, Deserialize)]
struct KbFile {
    #[serde(default)]
    events: Vec<KbFileEntry>,
}

#[derive(Debug, Deserialize)]
struct KbFileEntry {
    name: String,
    #[serde(default)]
    food: FoodSections,
    #[serde(default)]
    drinks: DrinkSections,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl KbFileEntry {
    fn into_named_record(self) -> (String, KbRecord) {
        let record = KbRecord {
            food: self.food,
            drinks: self.drinks,
            tags: self.tags,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        };
        (self.name, record)
    }
}

fn build(settings: Config) -> Result<KnowledgeBase, PairingError> {
    let file: KbFile = settings.try_deserialize()?;
    KnowledgeBase::from_records(file.events.into_iter().map(KbFileEntry::into_named_record))
}

/// Load a knowledge base from a TOML file, replacing the compiled-in one.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase, PairingError> {
    let settings = Config::builder()
        .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true))
        .build()?;

    let kb = build(settings)?;
    info!("Loaded {} events from {}", kb.len(), path.display());
    Ok(kb)
}

/// The configured knowledge base file, or the compiled-in one when none is set.
pub fn configured_knowledge_base(config: &AppConfig) -> Result<KnowledgeBase, PairingError> {
    match &config.kb_path {
        Some(path) => load_knowledge_base(Path::new(path)),
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Parse a knowledge base from TOML text.
pub fn parse_knowledge_base(toml: &str) -> Result<KnowledgeBase, PairingError> {
    let settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;
    build(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[events]]
        name = "  Wedding Brunch "
        tags = ["elegant", "morning"]
        notes = "Serve family style."

        [events.food]
        appetizers = ["Fruit platter"]
        mains = ["Frittata"]

        [events.drinks]
        alcoholic = ["Mimosa"]
        non_alcoholic = ["Orange juice"]

        [[events]]
        name = "picnic"

        [events.drinks]
        non_alcoholic = ["Lemonade"]
    "#;

    #[test]
    fn test_parse_knowledge_base() {
        let kb = parse_knowledge_base(SAMPLE).unwrap();
        assert_eq!(kb.len(), 2);

        let brunch = kb.lookup("wedding brunch").unwrap();
        assert_eq!(brunch.food.mains, vec!["Frittata"]);
        // Absent lists default to empty rather than being omitted
        assert!(brunch.food.sides.is_empty());
        assert!(brunch.food.desserts.is_empty());
        assert!(brunch.drinks.coffee.is_empty());
        assert!(brunch.tags.contains("morning"));
        assert_eq!(brunch.notes.as_deref(), Some("Serve family style."));

        let picnic = kb.lookup("Picnic").unwrap();
        assert!(picnic.food.appetizers.is_empty());
        assert!(!picnic.drinks.has_alcohol());
        assert!(picnic.notes.is_none());
    }

    #[test]
    fn test_parse_rejects_duplicate_events() {
        let toml = r#"
            [[events]]
            name = "Picnic"

            [[events]]
            name = "picnic"
        "#;
        let result = parse_knowledge_base(toml);
        assert!(matches!(result, Err(PairingError::KnowledgeBase(_))));
    }

    #[test]
    fn test_parse_rejects_non_string_items() {
        let toml = r#"
            [[events]]
            name = "Picnic"

            [events.food]
            mains = [{ item = "Sandwiches" }]
        "#;
        assert!(parse_knowledge_base(toml).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_knowledge_base(Path::new("/definitely/not/here/events.toml"));
        assert!(matches!(result, Err(PairingError::ConfigError(_))));
    }

    #[test]
    fn test_configured_knowledge_base_defaults_to_builtin() {
        let kb = configured_knowledge_base(&AppConfig::default()).unwrap();
        assert_eq!(kb.len(), KnowledgeBase::builtin().len());
    }
}
