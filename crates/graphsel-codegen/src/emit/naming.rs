//! Rust identifiers and doc attributes for schema names.

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

/// Rust keywords that need the r# prefix when used as identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof", "unsized",
    "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be raw identifiers; these get a trailing underscore.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// `SelectionSet` inherent methods. Inherent methods shadow trait methods of
/// the same name, so generated accessors must avoid them.
pub const RESERVED_ACCESSORS: &[&str] = &[
    "select",
    "select_all",
    "fields",
    "response",
    "is_pending",
    "decode_leaf",
    "decode_optional",
    "decode_composite",
    "decode_fragment",
    "discriminator",
];

/// Make a name usable as a Rust identifier.
pub fn ident(name: &str) -> Ident {
    if NON_RAW_KEYWORDS.contains(&name) {
        Ident::new(&format!("{}_", name), Span::call_site())
    } else if RUST_KEYWORDS.contains(&name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// Snake-case function, field or parameter name for a GraphQL name.
pub fn snake(name: &str) -> String {
    identifier_start(name.to_snake_case())
}

/// Upper-camel-case variant name for a GraphQL enum value.
pub fn upper_camel(name: &str) -> String {
    identifier_start(name.to_upper_camel_case())
}

// Case conversion drops leading underscores, which can leave a digit first.
fn identifier_start(converted: String) -> String {
    match converted.chars().next() {
        None => "_unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", converted),
        Some(_) => converted,
    }
}

/// Hands out names that are unique within one Rust namespace (a struct's
/// fields, a trait's methods, an enum's variants, a function's parameters).
#[derive(Debug, Default)]
pub struct NameScope {
    taken: Vec<String>,
}

impl NameScope {
    pub fn reserving(names: &[&str]) -> Self {
        Self {
            taken: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// `wanted`, or `wanted` with underscores appended until it is free.
    pub fn claim(&mut self, wanted: String) -> String {
        let mut name = wanted;
        while self.taken.contains(&name) {
            name.push('_');
        }
        self.taken.push(name.clone());
        name
    }
}

/// Emit `/// ...` doc comment tokens from an optional description string.
/// Multi-line descriptions produce multiple `/// ` lines.
pub fn doc_comment_tokens(description: Option<&str>) -> TokenStream {
    let Some(desc) = description else {
        return TokenStream::new();
    };
    let sanitized = sanitize_doc(desc);
    let lines: Vec<TokenStream> = sanitized
        .lines()
        .map(|line| {
            let text = format!(" {}", line);
            quote! { #[doc = #text] }
        })
        .collect();
    quote! { #(#lines)* }
}

/// `#[deprecated]` for a deprecated schema element.
pub fn deprecation_tokens(is_deprecated: bool, reason: Option<&str>) -> TokenStream {
    match (is_deprecated, reason) {
        (false, _) => TokenStream::new(),
        (true, Some(reason)) => quote! { #[deprecated(note = #reason)] },
        (true, None) => quote! { #[deprecated] },
    }
}

/// Sanitize a GraphQL description for use as a Rust doc comment.
///
/// - `[Foo]` bracket tags that rustdoc would read as intra-doc links become
///   backtick-quoted text.
/// - Bare `https://` URLs are wrapped in angle brackets.
fn sanitize_doc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if chars[i] == '[' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == ']') {
                let close = i + 1 + close;
                let inner: String = chars[i + 1..close].iter().collect();
                // Markdown links (`[text](url)`) stay as they are.
                let is_md_link = close + 1 < len && chars[close + 1] == '(';
                if !is_md_link && !inner.is_empty() {
                    out.push('`');
                    out.push_str(&inner);
                    out.push('`');
                    i = close + 1;
                    continue;
                }
            }
            out.push('[');
            i += 1;
        } else if chars[i..].starts_with(&['h', 't', 't', 'p', 's', ':', '/', '/']) {
            let already_bracketed = i > 0 && chars[i - 1] == '<';
            let url_end = chars[i..]
                .iter()
                .position(|&c| c.is_whitespace() || matches!(c, ')' | ',' | '>' | '\''))
                .map(|p| i + p)
                .unwrap_or(len);
            let url: String = chars[i..url_end].iter().collect();
            if already_bracketed {
                out.push_str(&url);
            } else {
                out.push('<');
                out.push_str(&url);
                out.push('>');
            }
            i = url_end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}
