use anyhow::Result;
use clap::Args;
use graphsel_codegen::schema::{NamedType, Schema, TypeKind};
use graphsel_codegen::{possible_objects, TypeModule};
use serde::Serialize;
use tabled::Tabled;

use super::helpers::{load_schema, parse_header};
use crate::output::{self, Format};

/// List the named types of a schema.
///
/// Examples:
///   graphsel types --schema schema.graphql
///   graphsel types --schema schema.json --format json
#[derive(Debug, Args)]
pub struct TypesCmd {
    /// SDL file (.graphql), introspection result (.json), or endpoint URL.
    #[arg(long)]
    schema: String,
    /// Header sent when introspecting an endpoint, as `Name: value`. Repeatable.
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct TypeRow {
    pub name: String,
    pub kind: String,
    /// Module of the generated file the type lands in.
    pub module: String,
    /// Fields, values, or possible types, depending on the kind.
    pub members: String,
}

pub fn run(cmd: TypesCmd, format: Format) -> Result<()> {
    let schema = load_schema(&cmd.schema, &cmd.headers)?;
    let rows = schema
        .types
        .iter()
        .filter(|ty| !Schema::is_builtin_scalar(&ty.name))
        .map(|ty| row(&schema, ty))
        .collect::<Result<Vec<_>>>()?;
    output::print_rows(&rows, format)
}

fn row(schema: &Schema, ty: &NamedType) -> Result<TypeRow> {
    let members: Vec<String> = match &ty.kind {
        TypeKind::Scalar => Vec::new(),
        TypeKind::Enum { values } => values.iter().map(|v| v.name.clone()).collect(),
        TypeKind::Object { fields, .. } => fields.iter().map(|f| f.name.clone()).collect(),
        TypeKind::InputObject { input_fields } => {
            input_fields.iter().map(|f| f.name.clone()).collect()
        }
        TypeKind::Interface { .. } | TypeKind::Union { .. } => possible_objects(schema, ty)?
            .iter()
            .map(|o| o.name.clone())
            .collect(),
    };
    Ok(TypeRow {
        name: ty.name.clone(),
        kind: ty.kind_name().to_string(),
        module: TypeModule::of(&ty.kind).name().to_string(),
        members: members.join(", "),
    })
}
