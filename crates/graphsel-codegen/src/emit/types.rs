//! Rust types for schema type references.
//!
//! Nullability maps to `Option` and lists to `Vec`, outermost first:
//! `[Episode!]` is `Option<Vec<Episode>>`, `[Episode]!` is
//! `Vec<Option<Episode>>`. Wire markers for composite fields follow the same
//! nesting so `Selection::list` and `Selection::nullable` line up with them.

use proc_macro2::TokenStream;
use quote::quote;

use super::naming::ident;
use super::{Emitter, TypeModule};
use crate::schema::{Schema, TypeRef};

impl Emitter<'_> {
    /// The module a named type is emitted into. Built-in scalars have none.
    pub(crate) fn module_of(&self, name: &str) -> Option<TypeModule> {
        let ty = self.schema.get(name)?;
        if Schema::is_builtin_scalar(name) {
            return None;
        }
        Some(TypeModule::of(&ty.kind))
    }

    /// Path to a named type from inside any generated module.
    pub(crate) fn named_path(&self, name: &str) -> TokenStream {
        match name {
            "ID" | "String" => return quote! { ::std::string::String },
            "Int" => return quote! { i32 },
            "Float" => return quote! { f64 },
            "Boolean" => return quote! { bool },
            _ => {}
        }
        let type_ident = ident(name);
        match self.module_of(name) {
            Some(module) => {
                let module = module.ident();
                quote! { super::#module::#type_ident }
            }
            None => quote! { #type_ident },
        }
    }

    /// The Rust type of a value shaped like `ty`, with `base` at the leaf.
    pub(crate) fn wrap(&self, ty: &TypeRef, base: &TokenStream) -> TokenStream {
        match ty {
            TypeRef::NonNull(inner) => self.wrap_non_null(inner, base),
            other => {
                let inner = self.wrap_non_null(other, base);
                quote! { ::std::option::Option<#inner> }
            }
        }
    }

    /// Like [`wrap`](Self::wrap) with the outermost nullability dropped.
    pub(crate) fn wrap_non_null(&self, ty: &TypeRef, base: &TokenStream) -> TokenStream {
        match ty {
            TypeRef::Named(_) => base.clone(),
            TypeRef::List(inner) => {
                let item = self.wrap(inner, base);
                quote! { ::std::vec::Vec<#item> }
            }
            TypeRef::NonNull(inner) => self.wrap_non_null(inner, base),
        }
    }

    /// Decoded type of a leaf field, or the wire marker of a composite one.
    pub(crate) fn field_type(&self, ty: &TypeRef) -> TokenStream {
        self.wrap(ty, &self.named_path(ty.base_name()))
    }
}
