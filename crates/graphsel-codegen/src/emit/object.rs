use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::naming::{
    deprecation_tokens, doc_comment_tokens, ident, snake, NameScope, RESERVED_ACCESSORS,
};
use super::Emitter;
use crate::schema::{Field, NamedType};

/// Trait method declarations and their implementations, in field order.
#[derive(Default)]
pub(crate) struct Accessors {
    pub signatures: Vec<TokenStream>,
    pub bodies: Vec<TokenStream>,
}

impl Emitter<'_> {
    /// An object: a unit `Wire` marker and a `<Name>Fields` trait with one
    /// accessor per field, implemented for selection sets over the marker.
    pub(crate) fn emit_object(&self, ty: &NamedType, fields: &[Field]) -> TokenStream {
        let rt = &self.rt;
        let name = ident(&ty.name);
        let trait_name = format_ident!("{}Fields", name);
        let doc = doc_comment_tokens(ty.description.as_deref());

        let operation = self.operation_kind(&ty.name).map(|kind| {
            quote! {
                impl #rt::Operation for #name {
                    const KIND: #rt::OperationKind = #rt::OperationKind::#kind;
                }
            }
        });

        let mut scope = NameScope::reserving(RESERVED_ACCESSORS);
        let Accessors { signatures, bodies } = self.field_accessors(fields, &mut scope);
        let trait_doc = format!(" Field accessors for selections on [`{}`].", ty.name);

        quote! {
            #doc
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct #name;

            impl #rt::Wire for #name {}

            #operation

            #[doc = #trait_doc]
            pub trait #trait_name {
                #(#signatures)*
            }

            #[allow(deprecated)]
            impl<T> #trait_name for #rt::SelectionSet<'_, T, #name> {
                #(#bodies)*
            }
        }
    }

    fn operation_kind(&self, name: &str) -> Option<Ident> {
        let schema = self.schema;
        let kind = if schema.query_type.as_deref() == Some(name) {
            "Query"
        } else if schema.mutation_type.as_deref() == Some(name) {
            "Mutation"
        } else if schema.subscription_type.as_deref() == Some(name) {
            "Subscription"
        } else {
            return None;
        };
        Some(format_ident!("{}", kind))
    }

    /// Accessors for `fields`. Leaves decode directly; composites take the
    /// nested selection to run against the field's payload.
    pub(crate) fn field_accessors(&self, fields: &[Field], scope: &mut NameScope) -> Accessors {
        let rt = &self.rt;
        let mut out = Accessors::default();

        for field in fields {
            let method = ident(&scope.claim(snake(&field.name)));
            let key = field.name.as_str();
            let doc = doc_comment_tokens(field.description.as_deref());
            let deprecated =
                deprecation_tokens(field.is_deprecated, field.deprecation_reason.as_deref());

            let mut params = NameScope::reserving(&["selection", "arguments"]);
            let mut param_defs = Vec::new();
            let mut pushes = Vec::new();
            for arg in &field.arguments {
                let param = ident(&params.claim(snake(&arg.name)));
                let arg_type = self.field_type(&arg.ty);
                let arg_name = arg.name.as_str();
                param_defs.push(quote! { #param: #arg_type });
                pushes.push(if arg.ty.is_non_null() {
                    quote! { arguments.push(#rt::Argument::new(#arg_name, #param)); }
                } else {
                    quote! {
                        if let ::std::option::Option::Some(value) = #param {
                            arguments.push(#rt::Argument::new(#arg_name, value));
                        }
                    }
                });
            }
            let arguments = if pushes.is_empty() {
                quote! { let arguments = ::std::vec::Vec::new(); }
            } else {
                quote! {
                    let mut arguments = ::std::vec::Vec::new();
                    #(#pushes)*
                }
            };

            let field_type = self.field_type(&field.ty);
            if self.schema.is_leaf(field.ty.base_name()) {
                let signature = quote! {
                    fn #method(&mut self #(, #param_defs)*)
                        -> ::std::result::Result<#field_type, #rt::DecodeError>
                };
                out.signatures.push(quote! {
                    #doc
                    #deprecated
                    #signature;
                });
                out.bodies.push(quote! {
                    #signature {
                        #arguments
                        self.select(#rt::GraphQLField::leaf(#key, arguments));
                        self.decode_leaf(#key)
                    }
                });
            } else {
                let signature = quote! {
                    fn #method<U>(
                        &mut self,
                        #(#param_defs,)*
                        selection: #rt::Selection<U, #field_type>,
                    ) -> ::std::result::Result<U, #rt::DecodeError>
                };
                out.signatures.push(quote! {
                    #doc
                    #deprecated
                    #signature;
                });
                out.bodies.push(quote! {
                    #signature {
                        #arguments
                        self.select(#rt::GraphQLField::composite(
                            #key,
                            arguments,
                            selection.fields().to_vec(),
                        ));
                        self.decode_composite(#key, &selection)
                    }
                });
            }
        }
        out
    }
}
