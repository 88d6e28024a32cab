//! Type-safe GraphQL selections.
//!
//! A [`Selection`] is built from a single decode function. Running it
//! without data collects the fields to request; running it with a response
//! payload decodes that payload. Code generated by `graphsel-codegen` adds
//! typed field accessors on [`SelectionSet`] for every schema type.

pub mod client;
pub mod document;
pub mod error;
pub mod field;
pub mod leaf;
pub mod selection;

pub use client::Client;
pub use document::{Operation, OperationKind};
pub use error::{ClientError, DecodeError, GraphQLError};
pub use field::{Argument, ArgumentValue, GraphQLField, IntoArgument, TYPENAME};
pub use leaf::LeafValue;
pub use selection::{Discriminator, Response, Selection, SelectionSet, Wire};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
