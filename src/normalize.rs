//! Flattening of loosely-typed model output into one string for schema parsing.
//!
//! Providers hand back text in different shapes: a plain string (OpenAI-style
//! chat completions), a list of content segments (Anthropic messages), or a
//! wrapper object holding either under an `output` key. [`ModelOutput`] names
//! those shapes so flattening is one match instead of runtime type probing.

use serde_json::Value;

/// Key under which wrapper objects nest the actual output.
pub const WRAPPER_KEY: &str = "output";

/// One content segment. Only segments carrying `text` contribute to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: Option<String>,
    pub text: Option<String>,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Text(String),
    Segments(Vec<Segment>),
    /// Value found under [`WRAPPER_KEY`], itself classified again.
    Wrapped(Box<ModelOutput>),
    /// Anything else, converted on a best-effort basis.
    Other(Value),
}

impl ModelOutput {
    /// Produce a single string. Never fails.
    pub fn flatten(self) -> String {
        match self {
            ModelOutput::Text(text) => text,
            ModelOutput::Segments(segments) => flatten_segments(segments),
            ModelOutput::Wrapped(inner) => inner.flatten(),
            ModelOutput::Other(value) => value_to_string(value),
        }
    }

    /// Classify a JSON value. Wrappers are followed down to the value they hold.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key(WRAPPER_KEY) => {
                let inner = map.remove(WRAPPER_KEY).unwrap_or(Value::Null);
                ModelOutput::Wrapped(Box::new(ModelOutput::from_value(inner)))
            }
            other => classify_unwrapped(other),
        }
    }
}

impl From<String> for ModelOutput {
    fn from(text: String) -> Self {
        ModelOutput::Text(text)
    }
}

impl From<&str> for ModelOutput {
    fn from(text: &str) -> Self {
        ModelOutput::Text(text.to_string())
    }
}

impl From<Value> for ModelOutput {
    fn from(value: Value) -> Self {
        ModelOutput::from_value(value)
    }
}

fn classify_unwrapped(value: Value) -> ModelOutput {
    match value {
        Value::String(text) => ModelOutput::Text(text),
        Value::Array(items) => ModelOutput::Segments(items.into_iter().map(segment_from).collect()),
        other => ModelOutput::Other(other),
    }
}

fn segment_from(item: Value) -> Segment {
    match item {
        // Bare strings inside a segment list count as text segments
        Value::String(text) => Segment {
            kind: None,
            text: Some(text),
        },
        Value::Object(map) => Segment {
            kind: map.get("type").and_then(Value::as_str).map(str::to_string),
            text: map.get("text").and_then(Value::as_str).map(str::to_string),
        },
        _ => Segment {
            kind: None,
            text: None,
        },
    }
}

fn flatten_segments(segments: Vec<Segment>) -> String {
    segments
        .into_iter()
        .filter_map(|s| s.text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Flatten any JSON value a provider returned.
pub fn fix_output(value: Value) -> String {
    ModelOutput::from_value(value).flatten()
}
