//! In-memory GraphQL schema model.
//!
//! Types are kept in schema order; code generation walks them in that order
//! so identical schemas produce identical output.

use std::collections::HashSet;
use thiserror::Error;

/// Built-in GraphQL scalar names.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// A GraphQL type reference (NamedType, List, NonNull wrapping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Get the base (innermost) named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) => inner.base_name(),
            TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// The reference with an outer `NonNull` removed.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner,
            other => other,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), TypeRef::List(_))
    }

    fn has_double_non_null(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::List(inner) => inner.has_double_non_null(),
            TypeRef::NonNull(inner) => inner.is_non_null() || inner.has_double_non_null(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// A field argument or input-object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

/// An output field of an object or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    pub deprecation_reason: Option<String>,
    pub is_deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
}

/// Kind-specific payload of a named type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Scalar,
    Enum {
        values: Vec<EnumValue>,
    },
    Object {
        fields: Vec<Field>,
        interfaces: Vec<String>,
    },
    Interface {
        fields: Vec<Field>,
        possible_types: Vec<String>,
    },
    Union {
        possible_types: Vec<String>,
    },
    InputObject {
        input_fields: Vec<InputValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
}

impl NamedType {
    /// Output fields of objects and interfaces; empty for other kinds.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            TypeKind::Object { fields, .. } | TypeKind::Interface { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object { .. })
    }

    pub fn is_polymorphic(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Interface { .. } | TypeKind::Union { .. }
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Scalar => "scalar",
            TypeKind::Enum { .. } => "enum",
            TypeKind::Object { .. } => "object",
            TypeKind::Interface { .. } => "interface",
            TypeKind::Union { .. } => "union",
            TypeKind::InputObject { .. } => "input object",
        }
    }
}

/// Schema inconsistencies found by [`Schema::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type `{owner}` references unknown type `{name}`")]
    UnknownType { owner: String, name: String },
    #[error("type `{name}` is defined more than once")]
    DuplicateType { name: String },
    #[error("`{owner}.{field}` wraps a non-null type in another non-null")]
    DoubleNonNull { owner: String, field: String },
    #[error("possible type `{name}` of `{owner}` is not an object type")]
    PossibleTypeNotObject { owner: String, name: String },
    #[error("`{owner}` implements `{name}`, which is not an interface")]
    NotAnInterface { owner: String, name: String },
    #[error("enum `{name}` has no values")]
    EmptyEnum { name: String },
    #[error("root operation type `{name}` is not an object type")]
    InvalidRootType { name: String },
}

/// A complete schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    pub types: Vec<NamedType>,
}

impl Schema {
    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Object types, in schema order.
    pub fn objects(&self) -> impl Iterator<Item = &NamedType> {
        self.types.iter().filter(|t| t.is_object())
    }

    pub fn is_builtin_scalar(name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name)
    }

    /// Whether `name` is a scalar or enum (a leaf of a selection).
    pub fn is_leaf(&self, name: &str) -> bool {
        if Self::is_builtin_scalar(name) {
            return true;
        }
        matches!(
            self.get(name).map(|t| &t.kind),
            Some(TypeKind::Scalar | TypeKind::Enum { .. })
        )
    }

    /// Names of the concrete types a union or interface can resolve to.
    ///
    /// Unions list them explicitly. Interfaces use the listed possible types
    /// when the schema carries them (introspection does), and otherwise every
    /// object declaring the interface, in schema order.
    pub fn possible_types<'a>(&'a self, ty: &'a NamedType) -> Vec<&'a str> {
        match &ty.kind {
            TypeKind::Union { possible_types } => {
                possible_types.iter().map(String::as_str).collect()
            }
            TypeKind::Interface { possible_types, .. } if !possible_types.is_empty() => {
                possible_types.iter().map(String::as_str).collect()
            }
            TypeKind::Interface { .. } => self
                .types
                .iter()
                .filter(|t| match &t.kind {
                    TypeKind::Object { interfaces, .. } => interfaces.contains(&ty.name),
                    _ => false,
                })
                .map(|t| t.name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Check the invariants code generation relies on.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for ty in &self.types {
            if !seen.insert(ty.name.as_str()) {
                return Err(SchemaError::DuplicateType {
                    name: ty.name.clone(),
                });
            }
        }

        for root in [&self.query_type, &self.mutation_type, &self.subscription_type]
            .into_iter()
            .flatten()
        {
            if !self.get(root).is_some_and(NamedType::is_object) {
                return Err(SchemaError::InvalidRootType { name: root.clone() });
            }
        }

        for ty in &self.types {
            match &ty.kind {
                TypeKind::Scalar => {}
                TypeKind::Enum { values } => {
                    if values.is_empty() {
                        return Err(SchemaError::EmptyEnum {
                            name: ty.name.clone(),
                        });
                    }
                }
                TypeKind::Object { fields, interfaces } => {
                    self.check_fields(&ty.name, fields)?;
                    for iface in interfaces {
                        match self.get(iface) {
                            Some(NamedType {
                                kind: TypeKind::Interface { .. },
                                ..
                            }) => {}
                            Some(_) => {
                                return Err(SchemaError::NotAnInterface {
                                    owner: ty.name.clone(),
                                    name: iface.clone(),
                                })
                            }
                            None => return Err(self.unknown(&ty.name, iface)),
                        }
                    }
                }
                TypeKind::Interface {
                    fields,
                    possible_types,
                } => {
                    self.check_fields(&ty.name, fields)?;
                    self.check_possible_types(&ty.name, possible_types)?;
                }
                TypeKind::Union { possible_types } => {
                    self.check_possible_types(&ty.name, possible_types)?;
                }
                TypeKind::InputObject { input_fields } => {
                    self.check_inputs(&ty.name, input_fields)?;
                }
            }
        }
        Ok(())
    }

    fn unknown(&self, owner: &str, name: &str) -> SchemaError {
        SchemaError::UnknownType {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    fn check_type_ref(&self, owner: &str, field: &str, ty: &TypeRef) -> Result<(), SchemaError> {
        if ty.has_double_non_null() {
            return Err(SchemaError::DoubleNonNull {
                owner: owner.to_string(),
                field: field.to_string(),
            });
        }
        let base = ty.base_name();
        if Self::is_builtin_scalar(base) || self.get(base).is_some() {
            Ok(())
        } else {
            Err(self.unknown(owner, base))
        }
    }

    fn check_fields(&self, owner: &str, fields: &[Field]) -> Result<(), SchemaError> {
        for field in fields {
            self.check_type_ref(owner, &field.name, &field.ty)?;
            self.check_inputs(owner, &field.arguments)?;
        }
        Ok(())
    }

    fn check_inputs(&self, owner: &str, inputs: &[InputValue]) -> Result<(), SchemaError> {
        for input in inputs {
            self.check_type_ref(owner, &input.name, &input.ty)?;
        }
        Ok(())
    }

    fn check_possible_types(&self, owner: &str, names: &[String]) -> Result<(), SchemaError> {
        for name in names {
            match self.get(name) {
                Some(t) if t.is_object() => {}
                Some(_) => {
                    return Err(SchemaError::PossibleTypeNotObject {
                        owner: owner.to_string(),
                        name: name.clone(),
                    })
                }
                None => return Err(self.unknown(owner, name)),
            }
        }
        Ok(())
    }
}
