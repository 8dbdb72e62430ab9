// table.rs — plain-text table rendering for CLI output.
//
// Two styles: `Plain` (two-space gutters with a dashed rule under the
// header, the look of `satchel cache list`) and `Ascii` (`+-|` borders).
// Widths are char counts, so multi-byte text lines up.

use crate::text::truncate_chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Plain,
    Ascii,
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    aligns: Vec<Align>,
    style: Style,
    /// Cells wider than this are truncated with `…`. None = never truncate.
    max_col_width: Option<usize>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let aligns = vec![Align::Left; headers.len()];
        Self { headers, rows: Vec::new(), aligns, style: Style::Plain, max_col_width: None }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = Some(width.max(1));
        self
    }

    /// Set the alignment of column `idx`. Out-of-range indexes are ignored.
    pub fn align(mut self, idx: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(idx) {
            *slot = align;
        }
        self
    }

    /// Add a row. Short rows pad with empty cells; long rows truncate to the
    /// header width.
    pub fn add_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        row.truncate(self.headers.len());
        self.rows.push(row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let clip = |s: &str| match self.max_col_width {
            Some(max) => truncate_chars(s, max),
            None => s.to_string(),
        };
        let headers: Vec<String> = self.headers.iter().map(|h| clip(h)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|c| clip(c)).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        match self.style {
            Style::Plain => self.render_plain(&headers, &rows, &widths),
            Style::Ascii => self.render_ascii(&headers, &rows, &widths),
        }
    }

    fn render_plain(&self, headers: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
        let mut out = String::new();
        out.push_str(&self.format_row(headers, widths, "  "));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for row in rows {
            out.push_str(&self.format_row(row, widths, "  "));
            out.push('\n');
        }
        out
    }

    fn render_ascii(&self, headers: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
        let rule: String = {
            let mut r = String::from("+");
            for w in widths {
                r.push_str(&"-".repeat(w + 2));
                r.push('+');
            }
            r.push('\n');
            r
        };
        let mut out = String::new();
        out.push_str(&rule);
        out.push_str(&format!("| {} |\n", self.format_row(headers, widths, " | ")));
        out.push_str(&rule);
        for row in rows {
            out.push_str(&format!("| {} |\n", self.format_row(row, widths, " | ")));
        }
        out.push_str(&rule);
        out
    }

    fn format_row(&self, cells: &[String], widths: &[usize], sep: &str) -> String {
        let mut parts = Vec::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            let width = widths[i];
            let len = cell.chars().count();
            let pad = width - len;
            let aligned = match self.aligns.get(i).copied().unwrap_or_default() {
                Align::Left => format!("{cell}{}", " ".repeat(pad)),
                Align::Right => format!("{}{cell}", " ".repeat(pad)),
                Align::Center => {
                    let left = pad / 2;
                    format!("{}{cell}{}", " ".repeat(left), " ".repeat(pad - left))
                }
            };
            parts.push(aligned);
        }
        // Trailing spaces on the last column are noise.
        let joined = parts.join(sep);
        if sep.trim().is_empty() {
            joined.trim_end().to_string()
        } else {
            joined
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
