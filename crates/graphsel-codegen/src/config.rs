//! `graphsel.toml`: how custom scalars map to Rust and where the runtime lives.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_RUNTIME_CRATE: &str = "::graphsel_sdk";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("scalar `{scalar}` maps to `{rust_type}`, which is not a Rust type")]
    InvalidScalarType { scalar: String, rust_type: String },
    #[error("`{0}` is not a valid path for the runtime crate")]
    InvalidRuntimeCrate(String),
}

/// Code generation settings.
///
/// ```toml
/// runtime_crate = "::graphsel_sdk"
///
/// [scalars]
/// DateTime = "chrono::DateTime<chrono::Utc>"
/// Cursor = "crate::Cursor"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    /// Path generated code uses to reach the selection runtime.
    pub runtime_crate: Option<String>,
    /// GraphQL custom scalar name to Rust type. Unmapped custom scalars
    /// decode as `serde_json::Value`.
    #[serde(default)]
    pub scalars: BTreeMap<String, String>,
}

impl CodegenConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Check every configured path parses as Rust.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.runtime_path()?;
        for scalar in self.scalars.keys() {
            self.scalar_type(scalar)?;
        }
        Ok(())
    }

    pub fn runtime_path(&self) -> Result<syn::Path, ConfigError> {
        let raw = self
            .runtime_crate
            .as_deref()
            .unwrap_or(DEFAULT_RUNTIME_CRATE);
        syn::parse_str(raw).map_err(|_| ConfigError::InvalidRuntimeCrate(raw.to_string()))
    }

    /// The configured Rust type for a custom scalar, if any.
    pub fn scalar_type(&self, scalar: &str) -> Result<Option<syn::Type>, ConfigError> {
        let Some(rust_type) = self.scalars.get(scalar) else {
            return Ok(None);
        };
        syn::parse_str(rust_type)
            .map(Some)
            .map_err(|_| ConfigError::InvalidScalarType {
                scalar: scalar.to_string(),
                rust_type: rust_type.clone(),
            })
    }
}
