//! Schema to Rust source.
//!
//! [`emit`] is a pure function of the schema and config: one
//! [`EmittedType`] per named type, in schema order. [`render`] groups them
//! into one module per kind and [`generate`] runs the whole pipeline.

mod enums;
mod input;
pub(crate) mod naming;
mod object;
mod polymorphic;
mod scalar;
mod types;

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use thiserror::Error;

use crate::config::{CodegenConfig, ConfigError};
use crate::format::format_tokens;
use crate::schema::{NamedType, Schema, SchemaError, TypeKind};
use naming::ident;

/// Header written at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by graphsel. DO NOT EDIT.\n\n";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("`{name}` is generated twice in module `{module}`")]
    NameCollision { module: &'static str, name: String },
    #[error("generated code does not parse: {0}")]
    Format(#[from] syn::Error),
}

/// The generated module a named type lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeModule {
    Scalars,
    Enums,
    Inputs,
    Objects,
    Interfaces,
    Unions,
}

impl TypeModule {
    pub const ALL: [TypeModule; 6] = [
        TypeModule::Scalars,
        TypeModule::Enums,
        TypeModule::Inputs,
        TypeModule::Objects,
        TypeModule::Interfaces,
        TypeModule::Unions,
    ];

    /// The module a type of this kind is generated into.
    pub fn of(kind: &TypeKind) -> TypeModule {
        match kind {
            TypeKind::Scalar => TypeModule::Scalars,
            TypeKind::Enum { .. } => TypeModule::Enums,
            TypeKind::InputObject { .. } => TypeModule::Inputs,
            TypeKind::Object { .. } => TypeModule::Objects,
            TypeKind::Interface { .. } => TypeModule::Interfaces,
            TypeKind::Union { .. } => TypeModule::Unions,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeModule::Scalars => "scalars",
            TypeModule::Enums => "enums",
            TypeModule::Inputs => "inputs",
            TypeModule::Objects => "objects",
            TypeModule::Interfaces => "interfaces",
            TypeModule::Unions => "unions",
        }
    }

    pub(crate) fn ident(self) -> proc_macro2::Ident {
        ident(self.name())
    }
}

/// Generated items for one named type.
#[derive(Debug, Clone)]
pub struct EmittedType {
    pub name: String,
    pub module: TypeModule,
    pub tokens: TokenStream,
}

impl EmittedType {
    /// Unformatted source text.
    pub fn source(&self) -> String {
        self.tokens.to_string()
    }
}

/// Shared state of one generation run.
pub(crate) struct Emitter<'s> {
    pub schema: &'s Schema,
    pub config: &'s CodegenConfig,
    pub rt: syn::Path,
}

impl<'s> Emitter<'s> {
    pub(crate) fn new(schema: &'s Schema, config: &'s CodegenConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            schema,
            config,
            rt: config.runtime_path()?,
        })
    }

    fn emit_type(&self, ty: &NamedType) -> Result<Option<EmittedType>, GenerateError> {
        if Schema::is_builtin_scalar(&ty.name) {
            return Ok(None);
        }
        let module = TypeModule::of(&ty.kind);
        let tokens = match &ty.kind {
            TypeKind::Scalar => self.emit_scalar(ty)?,
            TypeKind::Enum { values } => self.emit_enum(ty, values)?,
            TypeKind::InputObject { input_fields } => self.emit_input(ty, input_fields),
            TypeKind::Object { fields, .. } => self.emit_object(ty, fields),
            TypeKind::Interface { fields, .. } => self.emit_polymorphic(ty, fields)?,
            TypeKind::Union { .. } => self.emit_polymorphic(ty, &[])?,
        };
        tracing::trace!(type_name = %ty.name, module = module.name(), "emitted type");
        Ok(Some(EmittedType {
            name: ty.name.clone(),
            module,
            tokens,
        }))
    }
}

/// Emit every named type of `schema`, in schema order. Built-in scalars map
/// to Rust primitives and produce nothing.
pub fn emit(schema: &Schema, config: &CodegenConfig) -> Result<Vec<EmittedType>, GenerateError> {
    let emitter = Emitter::new(schema, config)?;
    let mut emitted = Vec::with_capacity(schema.types.len());
    for ty in &schema.types {
        if let Some(item) = emitter.emit_type(ty)? {
            emitted.push(item);
        }
    }
    check_collisions(&emitted)?;
    Ok(emitted)
}

// Every item a type generates, by the Rust names it introduces.
fn check_collisions(emitted: &[EmittedType]) -> Result<(), GenerateError> {
    let mut seen = BTreeSet::new();
    for item in emitted {
        let names = match item.module {
            TypeModule::Scalars | TypeModule::Enums | TypeModule::Inputs => {
                vec![item.name.clone()]
            }
            TypeModule::Objects => vec![item.name.clone(), format!("{}Fields", item.name)],
            TypeModule::Interfaces | TypeModule::Unions => vec![
                item.name.clone(),
                format!("{}Fields", item.name),
                format!("{}Typename", item.name),
            ],
        };
        for name in names {
            if !seen.insert((item.module, name.clone())) {
                return Err(GenerateError::NameCollision {
                    module: item.module.name(),
                    name,
                });
            }
        }
    }
    Ok(())
}

/// Assemble emitted types into one file, a module per kind.
pub fn render(emitted: &[EmittedType]) -> TokenStream {
    let modules = TypeModule::ALL.iter().filter_map(|module| {
        let items: Vec<&TokenStream> = emitted
            .iter()
            .filter(|e| e.module == *module)
            .map(|e| &e.tokens)
            .collect();
        if items.is_empty() {
            return None;
        }
        let module = module.ident();
        Some(quote! {
            #[allow(non_camel_case_types, non_snake_case, clippy::all)]
            pub mod #module {
                #(#items)*
            }
        })
    });
    quote! { #(#modules)* }
}

/// Validate, emit, render and format `schema`.
pub fn generate(schema: &Schema, config: &CodegenConfig) -> Result<String, GenerateError> {
    schema.validate()?;
    let emitted = emit(schema, config)?;
    tracing::debug!(types = emitted.len(), "rendering generated code");
    let formatted = format_tokens(render(&emitted))?;
    Ok(format!("{}{}", GENERATED_HEADER, formatted))
}
