use textwrap::Options;
use unicode_normalization::UnicodeNormalization;

/// Shown in place of an empty list or missing value.
pub const PLACEHOLDER: &str = "—";

const BULLET: &str = "• ";

const TYPOGRAPHIC: &[(char, &str)] = &[
    ('\u{201C}', "\""), // left double quote
    ('\u{201D}', "\""), // right double quote
    ('\u{2018}', "'"),  // left single quote
    ('\u{2019}', "'"),  // right single quote
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "-"),  // em dash
    ('\u{2212}', "-"),  // minus sign
    ('\u{2026}', "..."),
];

/// NFKC-normalize, then fold typographic punctuation to plain ASCII so
/// column widths stay predictable in a monospace terminal.
pub fn normalize_text(s: &str) -> String {
    let composed: String = s.nfkc().collect();
    let mut out = String::with_capacity(composed.len());
    for c in composed.chars() {
        match TYPOGRAPHIC.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// One bullet per line, or the placeholder when there is nothing to list.
pub fn bulleted(items: &[String]) -> String {
    if items.is_empty() {
        return PLACEHOLDER.to_string();
    }
    items
        .iter()
        .map(|item| format!("{}{}", BULLET, normalize_text(item.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-joined list, or the placeholder.
pub fn joined(items: &[String]) -> String {
    if items.is_empty() {
        return PLACEHOLDER.to_string();
    }
    items
        .iter()
        .map(|item| normalize_text(item.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wrap every line to `width`. Continuation lines of a bullet are indented
/// under the bullet text.
pub fn wrap_cell(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            let options = if line.starts_with(BULLET) {
                Options::new(width).subsequent_indent("  ")
            } else {
                Options::new(width)
            };
            textwrap::fill(line, options)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
