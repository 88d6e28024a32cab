use proc_macro2::TokenStream;
use quote::quote;

use super::naming::{doc_comment_tokens, ident, snake, NameScope};
use super::Emitter;
use crate::schema::{InputValue, NamedType, TypeKind, TypeRef};

impl Emitter<'_> {
    /// An input object: a plain struct plus its GraphQL literal conversion.
    pub(crate) fn emit_input(&self, ty: &NamedType, input_fields: &[InputValue]) -> TokenStream {
        let rt = &self.rt;
        let name = ident(&ty.name);
        let doc = doc_comment_tokens(ty.description.as_deref());

        let mut scope = NameScope::default();
        let mut defs = Vec::new();
        let mut pushes = Vec::new();
        for input in input_fields {
            let field = ident(&scope.claim(snake(&input.name)));
            let field_doc = doc_comment_tokens(input.description.as_deref());
            let rust_type = self.input_field_type(&ty.name, &input.ty);
            defs.push(quote! {
                #field_doc
                pub #field: #rust_type
            });

            let key = input.name.as_str();
            pushes.push(if input.ty.is_non_null() {
                quote! {
                    fields.push((#key.to_string(), #rt::IntoArgument::into_argument(self.#field)));
                }
            } else {
                quote! {
                    if let ::std::option::Option::Some(value) = self.#field {
                        fields.push((#key.to_string(), #rt::IntoArgument::into_argument(value)));
                    }
                }
            });
        }

        let capacity = input_fields.len();
        quote! {
            #doc
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name {
                #(#defs,)*
            }

            impl #rt::IntoArgument for #name {
                fn into_argument(self) -> #rt::ArgumentValue {
                    let mut fields = ::std::vec::Vec::with_capacity(#capacity);
                    #(#pushes)*
                    #rt::ArgumentValue::Object(fields)
                }
            }
        }
    }

    /// Field type inside input object `owner`, boxing references that lead
    /// back to `owner` without passing through a list.
    fn input_field_type(&self, owner: &str, ty: &TypeRef) -> TokenStream {
        let base = self.named_path(ty.base_name());
        let base = if !ty_has_list(ty) && self.reaches_input(ty.base_name(), owner, &mut Vec::new())
        {
            quote! { ::std::boxed::Box<#base> }
        } else {
            base
        };
        self.wrap(ty, &base)
    }

    fn reaches_input<'s>(&'s self, from: &'s str, target: &str, seen: &mut Vec<&'s str>) -> bool {
        if from == target {
            return true;
        }
        if seen.contains(&from) {
            return false;
        }
        seen.push(from);
        let Some(TypeKind::InputObject { input_fields }) = self.schema.get(from).map(|t| &t.kind)
        else {
            return false;
        };
        input_fields
            .iter()
            .filter(|f| !ty_has_list(&f.ty))
            .any(|f| self.reaches_input(f.ty.base_name(), target, seen))
    }
}

fn ty_has_list(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Named(_) => false,
        TypeRef::List(_) => true,
        TypeRef::NonNull(inner) => ty_has_list(inner),
    }
}
