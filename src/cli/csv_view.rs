// cli/csv_view.rs — `satchel csv view`: parse a CSV file, render as a table.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::config::ToolkitConfig;
use crate::csv::Reader;
use crate::table::Table;

pub fn cmd_view(
    config: &ToolkitConfig,
    path: &Path,
    separator: char,
    no_headers: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Reader::new()
        .separator(separator)
        .has_headers(!no_headers)
        .parse(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if doc.records.is_empty() && doc.headers.is_empty() {
        println!("{} is empty.", path.display());
        return Ok(());
    }

    let headers: Vec<String> = if no_headers {
        // Widest record decides the synthetic column count.
        let cols = doc.records.iter().map(Vec::len).max().unwrap_or(0);
        (1..=cols).map(|i| format!("#{i}")).collect()
    } else {
        doc.headers.clone()
    };

    let mut table = Table::new(headers).style(config.table.render_style());
    if config.table.max_col_width > 0 {
        table = table.max_col_width(config.table.max_col_width);
    }
    for record in &doc.records {
        table.add_row(record.iter().map(String::as_str));
    }
    print!("{}", table.render());
    println!("\n{} rows", doc.records.len());
    Ok(())
}
