//! Schema-driven code generation for graphsel.
//!
//! Load a [`Schema`] (SDL via [`parser::parse`], introspection JSON via
//! [`Schema::from_introspection`], or a live endpoint via
//! [`fetch_schema::fetch`]) and turn it into Rust source with [`generate`].

pub mod config;
pub mod emit;
pub mod fetch_schema;
pub mod format;
pub mod introspection;
pub mod merge;
pub mod parser;
pub mod schema;

pub use config::{CodegenConfig, ConfigError};
pub use emit::{emit, generate, render, EmittedType, GenerateError, TypeModule};
pub use merge::{merge_fields, possible_objects, MergedField};
pub use schema::{Schema, SchemaError};
