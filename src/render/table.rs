use super::text::wrap_cell;

/// Two-column table: a fixed label column and a wrapped content column.
pub struct Table<'a> {
    headers: (&'a str, &'a str),
    rows: Vec<(&'a str, String)>,
}

impl<'a> Table<'a> {
    pub fn new(left: &'a str, right: &'a str) -> Self {
        Table {
            headers: (left, right),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: &'a str, cell: String) -> Self {
        self.rows.push((label, cell));
        self
    }

    /// Render with the right column wrapped to `width` characters.
    pub fn render(&self, width: usize) -> String {
        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .chain(std::iter::once(self.headers.0.chars().count()))
            .max()
            .unwrap_or(0);

        let rule = format!(
            "{}+{}",
            "-".repeat(label_width + 1),
            "-".repeat(width + 1)
        );

        let mut lines = vec![
            format!("{:<label_width$} | {}", self.headers.0, self.headers.1),
            rule.clone(),
        ];

        for (i, (label, cell)) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(rule.clone());
            }
            let wrapped = wrap_cell(cell, width);
            for (j, line) in wrapped.lines().enumerate() {
                let left = if j == 0 { *label } else { "" };
                lines.push(format!("{:<label_width$} | {}", left, line));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_labels() {
        let table = Table::new("Drinks", "Suggestions")
            .row("Alcoholic", "—".to_string())
            .row("Non-Alcoholic", "• Cola\n• Lemonade".to_string());

        let text = table.render(30);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Drinks        | Suggestions");
        assert_eq!(lines[1], format!("{}+{}", "-".repeat(14), "-".repeat(31)));
        assert_eq!(lines[2], "Alcoholic     | —");
        assert_eq!(lines[4], "Non-Alcoholic | • Cola");
        assert_eq!(lines[5], "              | • Lemonade");
    }

    #[test]
    fn test_render_wraps_long_cells() {
        let table = Table::new("Course", "Recommendations").row(
            "Mains",
            "• Herb-crusted salmon (if featured) or Shrimp Fra Diavolo".to_string(),
        );
        let text = table.render(24);
        let content: Vec<&str> = text
            .lines()
            .skip(2)
            .map(|l| l.split_once(" | ").map(|(_, r)| r).unwrap_or(""))
            .collect();
        assert!(content.len() > 1);
        assert!(content.iter().all(|c| c.chars().count() <= 24));
    }
}
