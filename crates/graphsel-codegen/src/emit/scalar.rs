use proc_macro2::TokenStream;
use quote::quote;

use super::naming::{doc_comment_tokens, ident};
use super::{Emitter, GenerateError};
use crate::schema::NamedType;

impl Emitter<'_> {
    /// A custom scalar becomes an alias for its configured Rust type, or for
    /// raw JSON when unmapped.
    pub(crate) fn emit_scalar(&self, ty: &NamedType) -> Result<TokenStream, GenerateError> {
        let name = ident(&ty.name);
        let doc = doc_comment_tokens(ty.description.as_deref());
        let rt = &self.rt;
        let target = match self.config.scalar_type(&ty.name)? {
            Some(rust_type) => quote! { #rust_type },
            None => quote! { #rt::__private::serde_json::Value },
        };
        Ok(quote! {
            #doc
            pub type #name = #target;
        })
    }
}
