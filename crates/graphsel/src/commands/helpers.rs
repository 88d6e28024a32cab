use std::path::Path;

use anyhow::{Context, Result};
use graphsel_codegen::config::DEFAULT_RUNTIME_CRATE;
use graphsel_codegen::{fetch_schema, parser, CodegenConfig, Schema};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "graphsel.toml";

/// Load a schema from an SDL file, an introspection JSON file, or a live
/// endpoint (`http://` / `https://`).
pub fn load_schema(source: &str, headers: &[(String, String)]) -> Result<Schema> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_schema::fetch(source, headers)
            .with_context(|| format!("could not introspect {}", source));
    }

    let text = std::fs::read_to_string(source)
        .with_context(|| format!("could not read schema file {}", source))?;
    if Path::new(source)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", source))?;
        return Schema::from_introspection(&value)
            .with_context(|| format!("{} is not an introspection result", source));
    }
    Ok(parser::parse(&text))
}

/// Resolve the code generation config: an explicit `--config` must exist,
/// otherwise `graphsel.toml` is used when present. `--runtime-crate` wins
/// over the file.
pub fn load_config(path: Option<&Path>, runtime_crate: Option<String>) -> Result<CodegenConfig> {
    let mut config = match path {
        Some(path) => CodegenConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            tracing::debug!(path = DEFAULT_CONFIG_FILE, "using config from working directory");
            CodegenConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CodegenConfig::default(),
    };
    if runtime_crate.is_some() {
        config.runtime_crate = runtime_crate;
    }
    config.check()?;
    tracing::debug!(
        runtime_crate = config.runtime_crate.as_deref().unwrap_or(DEFAULT_RUNTIME_CRATE),
        scalars = config.scalars.len(),
        "resolved config"
    );
    Ok(config)
}

/// Parse a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{}`", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in `{}`", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
