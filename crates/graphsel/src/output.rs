use serde::Serialize;
use std::io::IsTerminal;
use tabled::{Table, Tabled};

/// How listings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Human,
    Json,
}

impl Format {
    /// The explicit choice, or a table on a terminal and JSON when piped.
    pub fn resolve(choice: Option<Format>) -> Format {
        choice.unwrap_or_else(|| {
            if std::io::stdout().is_terminal() {
                Format::Human
            } else {
                Format::Json
            }
        })
    }
}

/// Print rows as a table or as a pretty JSON array.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: Format) -> anyhow::Result<()> {
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(rows)?,
        Format::Human if rows.is_empty() => "No types.".to_string(),
        Format::Human => Table::new(rows).to_string(),
    };
    println!("{}", rendered);
    Ok(())
}
