//! Query documents for selections on root operation types.

use crate::field::render_selection;
use crate::selection::{Selection, Wire};

/// The kind of root operation a wire type represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// Implemented by generated root types (`Query`, `Mutation`, ...).
pub trait Operation: Wire {
    const KIND: OperationKind;
}

impl<T, W: Operation> Selection<T, W> {
    /// Render the full operation document, e.g. `query Hero { hero { id } }`.
    pub fn document(&self, operation_name: Option<&str>) -> String {
        let keyword = W::KIND.keyword();
        let selection = render_selection(self.fields());
        match operation_name {
            Some(name) => format!("{} {} {}", keyword, name, selection),
            None => format!("{} {}", keyword, selection),
        }
    }
}
