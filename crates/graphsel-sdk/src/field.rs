//! Requested fields and their query-document rendering.
//!
//! A [`GraphQLField`] is one entry of a selection: a leaf, a composite field
//! with a nested selection, or an inline fragment on a concrete type.
//! Rendering preserves insertion order.

use serde_json::Value;

/// The reserved meta-field identifying the concrete type of a payload.
pub const TYPENAME: &str = "__typename";

/// A GraphQL input literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Enum literals render bare (`NEWHOPE`, not `"NEWHOPE"`).
    Enum(String),
    List(Vec<ArgumentValue>),
    Object(Vec<(String, ArgumentValue)>),
}

impl ArgumentValue {
    /// Convert an arbitrary JSON value into a literal. Object keys keep
    /// their JSON order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as GraphQL literal syntax.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => {
                let s = f.to_string();
                if s.contains(['.', 'e', 'E']) || !f.is_finite() {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
            // JSON string escaping is valid GraphQL string escaping.
            Self::String(s) => Value::String(s.clone()).to_string(),
            Self::Enum(name) => name.clone(),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Self::render).collect();
                format!("[{}]", items.join(", "))
            }
            Self::Object(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.render()))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
        }
    }
}

/// Conversion of Rust values into GraphQL input literals.
///
/// Generated enums and input objects implement this; so do the built-in
/// scalar mappings.
pub trait IntoArgument {
    fn into_argument(self) -> ArgumentValue;
}

impl IntoArgument for ArgumentValue {
    fn into_argument(self) -> ArgumentValue {
        self
    }
}

impl IntoArgument for String {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::String(self)
    }
}

impl IntoArgument for &str {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::String(self.to_string())
    }
}

impl IntoArgument for bool {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::Boolean(self)
    }
}

impl IntoArgument for i32 {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::Int(self.into())
    }
}

impl IntoArgument for i64 {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::Int(self)
    }
}

impl IntoArgument for f64 {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::Float(self)
    }
}

impl IntoArgument for Value {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::from_json(&self)
    }
}

impl IntoArgument for chrono::DateTime<chrono::Utc> {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::String(self.to_rfc3339())
    }
}

impl<T: IntoArgument> IntoArgument for Option<T> {
    fn into_argument(self) -> ArgumentValue {
        match self {
            Some(value) => value.into_argument(),
            None => ArgumentValue::Null,
        }
    }
}

impl<T: IntoArgument> IntoArgument for Vec<T> {
    fn into_argument(self) -> ArgumentValue {
        ArgumentValue::List(self.into_iter().map(IntoArgument::into_argument).collect())
    }
}

impl<T: IntoArgument> IntoArgument for Box<T> {
    fn into_argument(self) -> ArgumentValue {
        (*self).into_argument()
    }
}

/// A resolved field argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: ArgumentValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl IntoArgument) -> Self {
        Self {
            name: name.into(),
            value: value.into_argument(),
        }
    }
}

/// One requested field of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQLField {
    Leaf {
        name: String,
        arguments: Vec<Argument>,
    },
    Composite {
        name: String,
        arguments: Vec<Argument>,
        selection: Vec<GraphQLField>,
    },
    Fragment {
        type_name: String,
        selection: Vec<GraphQLField>,
    },
}

impl GraphQLField {
    pub fn leaf(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self::Leaf {
            name: name.into(),
            arguments,
        }
    }

    pub fn composite(
        name: impl Into<String>,
        arguments: Vec<Argument>,
        selection: Vec<GraphQLField>,
    ) -> Self {
        Self::Composite {
            name: name.into(),
            arguments,
            selection,
        }
    }

    pub fn fragment(type_name: impl Into<String>, selection: Vec<GraphQLField>) -> Self {
        Self::Fragment {
            type_name: type_name.into(),
            selection,
        }
    }

    /// The `__typename` discriminator leaf.
    pub fn typename() -> Self {
        Self::leaf(TYPENAME, Vec::new())
    }

    /// Response key for this field. Fragments have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Leaf { name, .. } | Self::Composite { name, .. } => Some(name),
            Self::Fragment { .. } => None,
        }
    }

    /// Render this field as query-document text.
    pub fn render(&self) -> String {
        match self {
            Self::Leaf { name, arguments } => {
                format!("{}{}", name, render_arguments(arguments))
            }
            Self::Composite {
                name,
                arguments,
                selection,
            } => format!(
                "{}{} {}",
                name,
                render_arguments(arguments),
                render_selection(selection)
            ),
            Self::Fragment {
                type_name,
                selection,
            } => format!("... on {} {}", type_name, render_selection(selection)),
        }
    }
}

fn render_arguments(arguments: &[Argument]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = arguments
        .iter()
        .map(|a| format!("{}: {}", a.name, a.value.render()))
        .collect();
    format!("({})", rendered.join(", "))
}

/// Render a field list as a `{ ... }` block.
pub fn render_selection(fields: &[GraphQLField]) -> String {
    let rendered: Vec<String> = fields.iter().map(GraphQLField::render).collect();
    format!("{{ {} }}", rendered.join(" "))
}
