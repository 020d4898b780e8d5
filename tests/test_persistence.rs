use pairings_assistant::persist::{format_card, record_rule};
use pairings_assistant::{lookup_pairings, save_to_txt, PairingLog, PairingResponse};
use std::fs;
use tempfile::TempDir;

const GAME_DAY: &str = r#"{
    "event": "game day / tailgate",
    "audience": "adults",
    "constraints": ["budget:$$"],
    "menu": {"appetizers": ["Wings"], "mains": ["Meatball subs"], "sides": [], "desserts": []},
    "drinks": {"alcoholic": ["Pale ale"], "non_alcoholic": ["Cola"]},
    "rationale": "Handheld food for the parking lot.",
    "sources": [],
    "tools_used": ["pairing_kb"]
}"#;

const PICNIC: &str = r#"Sure! Here you go: {"event": "picnic", "menu": {"mains": ["Italian subs"]}, "drinks": {}, "rationale": "Packs well."}"#;

#[test]
fn test_appends_in_order_without_truncating() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pairings_output.txt");
    let log = PairingLog::new(&path);

    log.append_with_timestamp(GAME_DAY, "2026-10-19 12:00:00").unwrap();
    log.append_with_timestamp(PICNIC, "2026-10-19 12:05:00").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let first = contents.find("Event: Game Day / Tailgate").unwrap();
    let second = contents.find("Event: Picnic").unwrap();
    assert!(first < second);

    let rule = record_rule();
    assert_eq!(contents.matches(&rule).count(), 2);
    let between = &contents[first..second];
    assert!(between.contains(&rule));
    assert!(contents.ends_with(&format!("{}\n\n", rule)));
}

#[test]
fn test_existing_contents_are_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, "earlier notes\n").unwrap();

    let message = save_to_txt(GAME_DAY, &path).unwrap();
    assert!(message.starts_with("Pairing successfully saved to"));

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("earlier notes\n"));
    assert!(contents.contains("DELI PAIRING RECOMMENDATION"));
}

#[test]
fn test_knowledge_base_answer_round_trips_into_card() {
    let record = lookup_pairings("coffee & pastry break").unwrap();
    let raw = PairingResponse::from_kb_record("coffee & pastry break", record).to_json_pretty();
    let card = format_card(&raw, "2026-10-19 15:00:00");

    assert!(card.contains("Event: Coffee & Pastry Break"));
    assert!(card.contains("Drinks (Non-Alcoholic):\n  • Hot chocolate"));
    assert!(card.contains("  • Latte"));
    assert!(card.contains("Sources:\n  • Deli KB"));
    assert!(card.contains("Tools Used:\n  pairing_kb"));
    // Nothing alcoholic and no savoury courses for this preset
    assert!(!card.contains("Drinks (Alcoholic):"));
    assert!(!card.contains("Mains:"));
}

#[test]
fn test_malformed_input_is_written_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.txt");
    let raw = "I'd suggest subs and lemonade, but I lost the JSON { oops";

    PairingLog::new(&path).append(raw).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("DELI PAIRING RECOMMENDATION"));
    assert!(contents.contains(raw));
    assert!(contents.contains(&record_rule()));
    assert!(!contents.contains("Event:"));
}

#[test]
fn test_unwritable_path_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("log.txt");

    let err = PairingLog::new(&path).append(GAME_DAY).unwrap_err();
    assert!(matches!(err, pairings_assistant::PairingError::Io(_)));
}
