//! Unions and interfaces.
//!
//! A polymorphic type `T` becomes:
//!
//! - `TTypename`, the closed set of possible types, parsed from `__typename`;
//! - `T`, the merged holder: the discriminator plus one `Option` slot per
//!   merged leaf field, filled only for fields the resolved type declares
//!   and required where it declares them non-null.
//!   The holder is also the `Wire` marker for fields returning `T`;
//! - `TFields`, implemented for selection sets over `T`: `on(..)` takes one
//!   selection per possible type and dispatches on the discriminator,
//!   `on_<type>(..)` decodes a single type's fragment, `merged()` decodes the
//!   holder. Interfaces also get accessors for their own fields.
//!
//! Composite fields are not merged into the holder: they need a nested
//! selection, which the per-type fragments already provide. Leaf fields
//! with required arguments are left out for the same reason.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::naming::{doc_comment_tokens, ident, snake, NameScope, RESERVED_ACCESSORS};
use super::object::Accessors;
use super::{Emitter, GenerateError};
use crate::merge::{merge_fields, possible_objects, MergedField};
use crate::schema::{Field, NamedType};

/// A merged leaf field as stored on the holder.
struct Slot<'s> {
    ident: Ident,
    merged: MergedField<'s>,
}

impl Emitter<'_> {
    pub(crate) fn emit_polymorphic(
        &self,
        ty: &NamedType,
        own_fields: &[Field],
    ) -> Result<TokenStream, GenerateError> {
        let rt = &self.rt;
        let schema = self.schema;
        let name = ident(&ty.name);
        let type_name = ty.name.as_str();
        let typename_enum = format_ident!("{}Typename", name);
        let trait_name = format_ident!("{}Fields", name);
        let doc = doc_comment_tokens(ty.description.as_deref());

        let objects = possible_objects(schema, ty)?;
        let merged = merge_fields(schema, ty)?;

        let variants: Vec<Ident> = objects.iter().map(|o| ident(&o.name)).collect();
        let raw: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();

        let mut slot_scope = NameScope::reserving(&["typename"]);
        let slots: Vec<Slot<'_>> = merged
            .into_iter()
            .filter(|m| schema.is_leaf(m.field.ty.base_name()) && !has_required_arguments(m.field))
            .map(|merged| Slot {
                ident: ident(&slot_scope.claim(snake(merged.name()))),
                merged,
            })
            .collect();

        let slot_defs = slots.iter().map(|slot| {
            let slot_ident = &slot.ident;
            let field = slot.merged.field;
            let inner = self.wrap_non_null(&field.ty, &self.named_path(field.ty.base_name()));
            let slot_doc = format!(
                " `{}`, declared by {}.",
                field.name,
                slot.merged.declared_by.join(", ")
            );
            quote! {
                #[doc = #slot_doc]
                pub #slot_ident: ::std::option::Option<#inner>
            }
        });

        let holder_doc = if doc.is_empty() {
            let text = format!(
                " Fields merged across the possible types of `{}`.",
                type_name
            );
            quote! { #[doc = #text] }
        } else {
            doc.clone()
        };

        let discriminator = quote! {
            /// Concrete types this value can resolve to.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum #typename_enum {
                #(#variants,)*
            }

            impl #rt::Discriminator for #typename_enum {
                const TYPE_NAME: &'static str = #type_name;

                fn from_typename(typename: &str) -> ::std::option::Option<Self> {
                    match typename {
                        #(#raw => ::std::option::Option::Some(Self::#variants),)*
                        _ => ::std::option::Option::None,
                    }
                }

                fn typename(&self) -> &'static str {
                    match *self {
                        #(Self::#variants => #raw,)*
                    }
                }
            }
        };

        let selection_fn = (!objects.is_empty()).then(|| {
            quote! {
                /// Selection decoding every merged leaf field.
                pub fn selection() -> #rt::Selection<#name, #name> {
                    #rt::Selection::new(|set| set.merged())
                }
            }
        });

        let holder = quote! {
            #holder_doc
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name {
                pub typename: #typename_enum,
                #(#slot_defs,)*
            }

            impl #rt::Wire for #name {}

            impl #name {
                pub const POSSIBLE_TYPES: &'static [&'static str] = &[#(#raw),*];

                #selection_fn
            }
        };

        let mut reserved: Vec<&str> = RESERVED_ACCESSORS.to_vec();
        if !objects.is_empty() {
            reserved.extend(["on", "typename", "merged"]);
        }
        let mut scope = NameScope::reserving(&reserved);
        let mut accessors = Accessors::default();
        if !objects.is_empty() {
            self.dispatch_methods(ty, &objects, &slots, &mut scope, &mut accessors);
        }
        let own = self.field_accessors(own_fields, &mut scope);
        accessors.signatures.extend(own.signatures);
        accessors.bodies.extend(own.bodies);

        let fields_trait = (!accessors.signatures.is_empty()).then(|| {
            let Accessors { signatures, bodies } = accessors;
            let trait_doc = format!(" Field accessors for selections on [`{}`].", type_name);
            quote! {
                #[doc = #trait_doc]
                pub trait #trait_name {
                    #(#signatures)*
                }

                #[allow(deprecated)]
                impl<T> #trait_name for #rt::SelectionSet<'_, T, #name> {
                    #(#bodies)*
                }
            }
        });

        Ok(quote! {
            #discriminator
            #holder
            #fields_trait
        })
    }

    /// `on`, `on_<type>`, `typename` and `merged`.
    fn dispatch_methods(
        &self,
        ty: &NamedType,
        objects: &[&NamedType],
        slots: &[Slot<'_>],
        scope: &mut NameScope,
        out: &mut Accessors,
    ) {
        let rt = &self.rt;
        let name = ident(&ty.name);
        let typename_enum = format_ident!("{}Typename", name);
        let variants: Vec<Ident> = objects.iter().map(|o| ident(&o.name)).collect();
        let raw: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        let wires: Vec<TokenStream> = objects.iter().map(|o| self.named_path(&o.name)).collect();
        let first = &variants[0];

        // on(..)
        let mut params = NameScope::default();
        let param_idents: Vec<Ident> = objects
            .iter()
            .map(|o| ident(&params.claim(snake(&o.name))))
            .collect();
        let first_param = &param_idents[0];
        let signature = quote! {
            fn on<U>(
                &mut self,
                #(#param_idents: #rt::Selection<U, #wires>,)*
            ) -> ::std::result::Result<U, #rt::DecodeError>
        };
        out.signatures.push(quote! {
            /// Decode through the selection matching the resolved type.
            /// Every possible type must be handled.
            #signature;
        });
        out.bodies.push(quote! {
            #signature {
                self.select(#rt::GraphQLField::typename());
                #(self.select(#rt::GraphQLField::fragment(#raw, #param_idents.fields().to_vec()));)*
                match self.discriminator::<#typename_enum>()? {
                    ::std::option::Option::None => #first_param.mock(),
                    #(::std::option::Option::Some(#typename_enum::#variants) => {
                        self.decode_fragment(&#param_idents)
                    })*
                }
            }
        });

        // on_<type>(..)
        for ((object, variant), wire) in objects.iter().zip(&variants).zip(&wires) {
            let method = ident(&scope.claim(format!("on_{}", snake(&object.name))));
            let raw = object.name.as_str();
            let doc = format!(
                " Decode `selection` if the value is a `{}`, `None` otherwise.",
                raw
            );
            let signature = quote! {
                fn #method<U>(
                    &mut self,
                    selection: #rt::Selection<U, #wire>,
                ) -> ::std::result::Result<::std::option::Option<U>, #rt::DecodeError>
            };
            out.signatures.push(quote! {
                #[doc = #doc]
                #signature;
            });
            out.bodies.push(quote! {
                #signature {
                    self.select(#rt::GraphQLField::typename());
                    self.select(#rt::GraphQLField::fragment(#raw, selection.fields().to_vec()));
                    match self.discriminator::<#typename_enum>()? {
                        ::std::option::Option::Some(#typename_enum::#variant) => {
                            self.decode_fragment(&selection).map(::std::option::Option::Some)
                        }
                        _ => ::std::result::Result::Ok(::std::option::Option::None),
                    }
                }
            });
        }

        // typename()
        let signature = quote! {
            fn typename(&mut self) -> ::std::result::Result<#typename_enum, #rt::DecodeError>
        };
        out.signatures.push(quote! {
            /// The resolved concrete type.
            #signature;
        });
        out.bodies.push(quote! {
            #signature {
                self.select(#rt::GraphQLField::typename());
                ::std::result::Result::Ok(
                    self.discriminator::<#typename_enum>()?
                        .unwrap_or(#typename_enum::#first),
                )
            }
        });

        // merged()
        let fragments = objects.iter().filter_map(|object| {
            let keys: Vec<&str> = slots
                .iter()
                .filter(|s| declared_leaf(self, object, s).is_some())
                .map(|s| s.merged.name())
                .collect();
            if keys.is_empty() {
                return None;
            }
            let raw = object.name.as_str();
            Some(quote! {
                self.select(#rt::GraphQLField::fragment(#raw, vec![
                    #(#rt::GraphQLField::leaf(#keys, ::std::vec::Vec::new()),)*
                ]));
            })
        });
        let slot_idents: Vec<&Ident> = slots.iter().map(|s| &s.ident).collect();
        let arms = objects.iter().zip(&variants).map(|(object, variant)| {
            let values = slots.iter().map(|s| {
                let slot_ident = &s.ident;
                let key = s.merged.name();
                match declared_leaf(self, object, s) {
                    // The resolved type's own nullability decides whether
                    // a missing value is an error.
                    Some(own) if own.ty.is_non_null() => {
                        let merged = s.merged.field;
                        let inner =
                            self.wrap_non_null(&merged.ty, &self.named_path(merged.ty.base_name()));
                        quote! {
                            #slot_ident: self
                                .decode_leaf::<#inner>(#key)
                                .map(::std::option::Option::Some)?
                        }
                    }
                    Some(_) => quote! { #slot_ident: self.decode_optional(#key)? },
                    None => quote! { #slot_ident: ::std::option::Option::None },
                }
            });
            quote! {
                #typename_enum::#variant => #name {
                    typename,
                    #(#values,)*
                }
            }
        });
        let signature = quote! {
            fn merged(&mut self) -> ::std::result::Result<#name, #rt::DecodeError>
        };
        out.signatures.push(quote! {
            /// Decode the merged holder. Slots the resolved type does not
            /// declare stay `None`.
            #signature;
        });
        out.bodies.push(quote! {
            #signature {
                self.select(#rt::GraphQLField::typename());
                #(#fragments)*
                let typename = match self.discriminator::<#typename_enum>()? {
                    ::std::option::Option::Some(typename) => typename,
                    ::std::option::Option::None => {
                        return ::std::result::Result::Ok(#name {
                            typename: #typename_enum::#first,
                            #(#slot_idents: ::std::option::Option::None,)*
                        })
                    }
                };
                ::std::result::Result::Ok(match typename {
                    #(#arms,)*
                })
            }
        });
    }
}

fn has_required_arguments(field: &Field) -> bool {
    field
        .arguments
        .iter()
        .any(|a| a.ty.is_non_null() && a.default_value.is_none())
}

/// `object`'s own declaration of the slot's field, if it declares it as a
/// leaf.
fn declared_leaf<'o>(
    emitter: &Emitter<'_>,
    object: &'o NamedType,
    slot: &Slot<'_>,
) -> Option<&'o Field> {
    if !slot.merged.declared_by.contains(&object.name.as_str()) {
        return None;
    }
    object
        .fields()
        .iter()
        .find(|f| f.name == slot.merged.name())
        .filter(|f| emitter.schema.is_leaf(f.ty.base_name()) && !has_required_arguments(f))
}
