//! Terminal report for a validated pairing response.

mod table;
mod text;

pub use table::Table;
pub use text::{bulleted, joined, normalize_text, wrap_cell, PLACEHOLDER};

use crate::config::RenderConfig;
use crate::schema::{DrinkSection, MenuSection, PairingResponse};
use std::io::IsTerminal;

/// Terminal width assumed when it cannot be detected.
pub const DEFAULT_TERMINAL_WIDTH: usize = 100;

/// Room reserved for the label column and table borders.
const LABEL_ALLOWANCE: usize = 26;
const MIN_COLUMN_WIDTH: usize = 24;
const MAX_COLUMN_WIDTH: usize = 80;

const DEFAULT_CUISINE: &str = "Italian";

pub const FOOTER: &str = "Great for family-style sharing. | Grounded in the deli's menu & market.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub terminal_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            terminal_width: DEFAULT_TERMINAL_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn with_width(terminal_width: usize) -> Self {
        RenderOptions { terminal_width }
    }

    /// Use the configured width, else the detected one, else the default.
    pub fn from_config(config: &RenderConfig) -> Self {
        RenderOptions {
            terminal_width: config.terminal_width.unwrap_or_else(detect_terminal_width),
        }
    }

    /// Width of the recommendations column.
    pub fn column_width(&self) -> usize {
        self.terminal_width
            .saturating_sub(LABEL_ALLOWANCE)
            .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
    }
}

/// Detected stdout width, falling back to [`DEFAULT_TERMINAL_WIDTH`].
pub fn detect_terminal_width() -> usize {
    if std::io::stdout().is_terminal() {
        terminal_size::terminal_size()
            .map(|(terminal_size::Width(w), _)| w as usize)
            .unwrap_or(DEFAULT_TERMINAL_WIDTH)
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}

fn banner(event: &str) -> String {
    let title = format!("{} RECOMMENDATIONS", normalize_text(event.trim()).to_uppercase());
    let rule = "=".repeat(title.chars().count());
    format!("{}\n{}", title, rule)
}

fn heading(title: &str) -> String {
    format!("{}\n{}", title, "-".repeat(title.chars().count()))
}

fn kv_summary(pairs: &[(&str, String)]) -> String {
    let key_width = pairs
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<key_width$}  : {}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn optional(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => normalize_text(v),
        None => fallback.to_string(),
    }
}

/// Menu and drinks tables, wrapped to the column width.
pub fn render_menu_and_drinks(menu: &MenuSection, drinks: &DrinkSection, width: usize) -> String {
    let menu_table = Table::new("Course", "Recommendations")
        .row("Appetizers", bulleted(&menu.appetizers))
        .row("Mains", bulleted(&menu.mains))
        .row("Sides", bulleted(&menu.sides))
        .row("Desserts", bulleted(&menu.desserts));

    let drinks_table = Table::new("Drinks", "Suggestions")
        .row("Alcoholic", bulleted(&drinks.alcoholic))
        .row("Non-Alcoholic", bulleted(&drinks.non_alcoholic));

    format!("{}\n\n{}", menu_table.render(width), drinks_table.render(width))
}

/// Build the full display report. Pure: writing it out is up to the caller.
pub fn render_report(response: &PairingResponse, options: &RenderOptions) -> String {
    let width = options.column_width();
    let mut sections = Vec::new();

    sections.push(banner(&response.event));

    sections.push(kv_summary(&[
        ("Audience", optional(response.audience.as_deref(), PLACEHOLDER)),
        (
            "Cuisine",
            optional(response.cuisine_pref.as_deref(), DEFAULT_CUISINE),
        ),
        ("Constraints", joined(&response.constraints)),
    ]));

    sections.push(render_menu_and_drinks(
        &response.menu,
        &response.drinks,
        width,
    ));

    sections.push(format!(
        "{}\n{}",
        heading("WHY THIS WORKS"),
        wrap_cell(&normalize_text(response.rationale.trim()), width)
    ));

    if !response.sources.is_empty() {
        sections.push(format!(
            "{}\n{}",
            heading("SOURCES"),
            bulleted(&response.sources)
        ));
    }

    sections.push(format!("{}\n{}", heading("TOOLS"), joined(&response.tools_used)));

    sections.push(FOOTER.to_string());

    sections.join("\n\n")
}
