//! Pretty-printing of generated token streams.

use proc_macro2::TokenStream;

/// Parse `tokens` as a file and print it with prettyplease.
pub fn format_tokens(tokens: TokenStream) -> Result<String, syn::Error> {
    let file: syn::File = syn::parse2(tokens)?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn formats_items() {
        let out = format_tokens(quote! { pub struct   Human ; impl Human{} }).unwrap();
        assert!(out.starts_with("pub struct Human;\n"));
        assert!(out.contains("impl Human {}"));
    }

    #[test]
    fn rejects_non_items() {
        assert!(format_tokens(quote! { let x = 1; }).is_err());
    }
}
