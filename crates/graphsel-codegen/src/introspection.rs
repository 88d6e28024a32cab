//! Build a [`Schema`] from an introspection query result.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{EnumValue, Field, InputValue, NamedType, Schema, TypeKind, TypeRef};

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("no `__schema` object in introspection result")]
    MissingSchema,
    #[error("malformed introspection result: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("type reference of kind {kind} has no {missing}")]
    BadTypeRef { kind: String, missing: &'static str },
    #[error("unsupported type kind `{kind}` for `{name}`")]
    UnsupportedKind { kind: String, name: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawRootType>,
    mutation_type: Option<RawRootType>,
    subscription_type: Option<RawRootType>,
    types: Vec<RawType>,
}

#[derive(Deserialize)]
struct RawRootType {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: String,
    name: String,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawTypeRef>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawTypeRef>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    default_value: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

impl RawTypeRef {
    fn convert(self) -> Result<TypeRef, IntrospectionError> {
        match self.kind.as_str() {
            "NON_NULL" | "LIST" => {
                let inner = self
                    .of_type
                    .ok_or_else(|| IntrospectionError::BadTypeRef {
                        kind: self.kind.clone(),
                        missing: "ofType",
                    })?
                    .convert()?;
                Ok(if self.kind == "LIST" {
                    TypeRef::list(inner)
                } else {
                    TypeRef::non_null(inner)
                })
            }
            _ => self
                .name
                .map(TypeRef::Named)
                .ok_or(IntrospectionError::BadTypeRef {
                    kind: self.kind.clone(),
                    missing: "name",
                }),
        }
    }

    fn into_name(self) -> Option<String> {
        self.name
    }
}

impl Schema {
    /// Accepts `{"data": {"__schema": ...}}`, `{"__schema": ...}` or the
    /// bare schema object. Introspection types (`__Type`, ...) are dropped.
    pub fn from_introspection(value: &Value) -> Result<Schema, IntrospectionError> {
        let raw = value
            .pointer("/data/__schema")
            .or_else(|| value.get("__schema"))
            .or_else(|| value.get("types").map(|_| value))
            .ok_or(IntrospectionError::MissingSchema)?;
        let raw: RawSchema = serde_json::from_value(raw.clone())?;

        let mut types = Vec::new();
        for ty in raw.types {
            if ty.name.starts_with("__") {
                continue;
            }
            if ty.kind == "SCALAR" && Schema::is_builtin_scalar(&ty.name) {
                continue;
            }
            types.push(convert_type(ty)?);
        }

        Ok(Schema {
            query_type: raw.query_type.map(|t| t.name),
            mutation_type: raw.mutation_type.map(|t| t.name),
            subscription_type: raw.subscription_type.map(|t| t.name),
            types,
        })
    }
}

fn convert_type(ty: RawType) -> Result<NamedType, IntrospectionError> {
    let kind = match ty.kind.as_str() {
        "SCALAR" => TypeKind::Scalar,
        "ENUM" => TypeKind::Enum {
            values: ty
                .enum_values
                .unwrap_or_default()
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    description: v.description,
                    is_deprecated: v.is_deprecated,
                })
                .collect(),
        },
        "OBJECT" => TypeKind::Object {
            fields: convert_fields(ty.fields)?,
            interfaces: names(ty.interfaces),
        },
        "INTERFACE" => TypeKind::Interface {
            fields: convert_fields(ty.fields)?,
            possible_types: names(ty.possible_types),
        },
        "UNION" => TypeKind::Union {
            possible_types: names(ty.possible_types),
        },
        "INPUT_OBJECT" => TypeKind::InputObject {
            input_fields: convert_inputs(ty.input_fields.unwrap_or_default())?,
        },
        other => {
            return Err(IntrospectionError::UnsupportedKind {
                kind: other.to_string(),
                name: ty.name,
            })
        }
    };
    Ok(NamedType {
        name: ty.name,
        description: ty.description.filter(|d| !d.is_empty()),
        kind,
    })
}

fn names(refs: Option<Vec<RawTypeRef>>) -> Vec<String> {
    refs.unwrap_or_default()
        .into_iter()
        .filter_map(RawTypeRef::into_name)
        .collect()
}

fn convert_fields(fields: Option<Vec<RawField>>) -> Result<Vec<Field>, IntrospectionError> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| {
            Ok(Field {
                name: f.name,
                description: f.description.filter(|d| !d.is_empty()),
                arguments: convert_inputs(f.args)?,
                ty: f.ty.convert()?,
                deprecation_reason: f.deprecation_reason,
                is_deprecated: f.is_deprecated,
            })
        })
        .collect()
}

fn convert_inputs(inputs: Vec<RawInputValue>) -> Result<Vec<InputValue>, IntrospectionError> {
    inputs
        .into_iter()
        .map(|i| {
            Ok(InputValue {
                name: i.name,
                description: i.description.filter(|d| !d.is_empty()),
                ty: i.ty.convert()?,
                default_value: i.default_value,
            })
        })
        .collect()
}
