use proc_macro2::TokenStream;
use quote::quote;

use super::naming::{doc_comment_tokens, ident, upper_camel, NameScope};
use super::{Emitter, GenerateError};
use crate::schema::{EnumValue, NamedType, SchemaError};

impl Emitter<'_> {
    /// A closed Rust enum. Values outside the declared set fail to decode.
    pub(crate) fn emit_enum(
        &self,
        ty: &NamedType,
        values: &[EnumValue],
    ) -> Result<TokenStream, GenerateError> {
        if values.is_empty() {
            return Err(SchemaError::EmptyEnum {
                name: ty.name.clone(),
            }
            .into());
        }

        let rt = &self.rt;
        let name = ident(&ty.name);
        let type_name = ty.name.as_str();
        let doc = doc_comment_tokens(ty.description.as_deref());

        let mut scope = NameScope::default();
        let variants: Vec<_> = values
            .iter()
            .map(|v| ident(&scope.claim(upper_camel(&v.name))))
            .collect();
        let raw: Vec<&str> = values.iter().map(|v| v.name.as_str()).collect();

        let defs = values.iter().zip(&variants).map(|(value, variant)| {
            let doc = doc_comment_tokens(value.description.as_deref());
            let deprecated = value
                .is_deprecated
                .then(|| quote! { #[deprecated] });
            quote! { #doc #deprecated #variant }
        });
        let first = &variants[0];

        Ok(quote! {
            #doc
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            #[allow(deprecated)]
            pub enum #name {
                #(#defs,)*
            }

            #[allow(deprecated)]
            impl #name {
                pub const VALUES: &'static [#name] = &[#(#name::#variants),*];

                /// The value as it appears in GraphQL.
                pub fn as_str(&self) -> &'static str {
                    match self {
                        #(#name::#variants => #raw,)*
                    }
                }
            }

            #[allow(deprecated)]
            impl #rt::LeafValue for #name {
                fn decode(
                    value: &#rt::__private::serde_json::Value,
                ) -> ::std::result::Result<Self, #rt::DecodeError> {
                    let raw = <::std::string::String as #rt::LeafValue>::decode(value)?;
                    match raw.as_str() {
                        #(#raw => ::std::result::Result::Ok(#name::#variants),)*
                        _ => ::std::result::Result::Err(#rt::DecodeError::UnknownEnumValue {
                            enum_name: #type_name.to_string(),
                            value: raw,
                        }),
                    }
                }

                fn mock() -> Self {
                    #name::#first
                }
            }

            impl #rt::IntoArgument for #name {
                fn into_argument(self) -> #rt::ArgumentValue {
                    #rt::ArgumentValue::Enum(self.as_str().to_string())
                }
            }

            impl ::std::fmt::Display for #name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        })
    }
}
