use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use super::helpers::{load_config, load_schema, parse_header};

/// Generate Rust selection code from a schema.
///
/// Examples:
///   graphsel generate --schema schema.graphql --output src/graphql.rs
///   graphsel generate --schema https://api.example.com/graphql --header "Authorization: Bearer $TOKEN"
///   graphsel generate --schema schema.json --output src/graphql.rs --check
#[derive(Debug, Args)]
pub struct GenerateCmd {
    /// SDL file (.graphql), introspection result (.json), or endpoint URL.
    #[arg(long)]
    schema: String,
    /// File to write. Prints to stdout if omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Config file (defaults to ./graphsel.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path generated code uses to reach the runtime (overrides the config).
    #[arg(long)]
    runtime_crate: Option<String>,
    /// Header sent when introspecting an endpoint, as `Name: value`. Repeatable.
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
    /// Fail if the output file is missing or differs from freshly generated code.
    #[arg(long, requires = "output")]
    check: bool,
}

pub fn run(cmd: GenerateCmd) -> Result<()> {
    let config = load_config(cmd.config.as_deref(), cmd.runtime_crate)?;
    let schema = load_schema(&cmd.schema, &cmd.headers)?;
    tracing::debug!(types = schema.types.len(), source = %cmd.schema, "loaded schema");

    let code = graphsel_codegen::generate(&schema, &config)
        .with_context(|| format!("could not generate code for {}", cmd.schema))?;

    let Some(output) = cmd.output else {
        print!("{}", code);
        return Ok(());
    };

    if cmd.check {
        let existing = std::fs::read_to_string(&output).unwrap_or_default();
        if existing != code {
            bail!(
                "{} is out of date; rerun `graphsel generate` without --check",
                output.display()
            );
        }
        eprintln!("{} {} is up to date", "✓".green(), output.display());
        return Ok(());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    std::fs::write(&output, &code)
        .with_context(|| format!("could not write {}", output.display()))?;
    eprintln!(
        "{} wrote {} ({} lines)",
        "✓".green(),
        output.display(),
        code.lines().count()
    );
    Ok(())
}
