use graphsel_codegen::config::DEFAULT_RUNTIME_CRATE;

use super::helpers::DEFAULT_CONFIG_FILE;

/// Print a compact command reference.
pub fn run() {
    let config_hint = if std::path::Path::new(DEFAULT_CONFIG_FILE).is_file() {
        " (found)"
    } else {
        ""
    };

    print!(
        r#"graphsel — type-safe GraphQL selections for Rust

COMMANDS:
  graphsel generate --schema <SOURCE>              Generate selection code
    [--output FILE]                                Write to FILE instead of stdout
    [--config FILE]                                Scalar mappings and runtime path
    [--runtime-crate PATH]                         Runtime path in generated code
    [--header "Name: value"]                       Sent when introspecting a URL
    [--check]                                      Fail if FILE is stale (needs --output)
  graphsel types --schema <SOURCE>                 List named types and their modules
  graphsel usage                                   This reference

SCHEMA SOURCES:
  schema.graphql                                   SDL document
  schema.json                                      Introspection result
  https://host/graphql                             Live endpoint (introspected)

CONFIG ({config_file}{config_hint}):
  runtime_crate = "{runtime}"
  [scalars]
  DateTime = "chrono::DateTime<chrono::Utc>"       Unmapped scalars decode as serde_json::Value

GLOBAL OPTIONS:
  --format human|json                              Listing format (auto-detected)

LOGGING:
  RUST_LOG=graphsel_codegen=debug                  Generation diagnostics on stderr
"#,
        config_file = DEFAULT_CONFIG_FILE,
        config_hint = config_hint,
        runtime = DEFAULT_RUNTIME_CRATE,
    );
}
