//! Selections: one decode function that both requests fields and decodes them.
//!
//! A [`Selection`] runs its decode function once at construction against a
//! pending [`SelectionSet`]. Every `select` call made along the way is recorded,
//! and that list becomes the query fragment. Decoding a response runs the
//! *same* function again against a resolved set, so the requested fields and
//! the decode path cannot drift apart.
//!
//! The `W` parameter is compile-time only: generated code implements field
//! accessors on `SelectionSet<'_, T, W>` for a specific `W`, so a selection
//! built for one wire shape cannot be passed where another is expected.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DecodeError;
use crate::field::{render_selection, GraphQLField, TYPENAME};
use crate::leaf::LeafValue;

/// Marker for the wire shape a selection decodes from.
///
/// Generated object, interface and union types implement this; lists and
/// nullable positions wrap them in `Vec` and `Option`.
pub trait Wire: 'static {}

impl Wire for () {}
impl<W: Wire> Wire for Vec<W> {}
impl<W: Wire> Wire for Option<W> {}

/// The closed set of concrete types a union or interface payload can be.
pub trait Discriminator: Sized {
    /// Name of the polymorphic type, for error reporting.
    const TYPE_NAME: &'static str;

    fn from_typename(typename: &str) -> Option<Self>;

    fn typename(&self) -> &'static str;
}

/// What a [`SelectionSet`] is currently looking at.
#[derive(Debug, Clone, Copy)]
pub enum Response<'a> {
    /// No data yet; accessors hand out placeholders.
    Pending,
    /// Decoding this payload.
    Resolved(&'a Value),
}

static NULL: Value = Value::Null;

/// The container a decode function runs against.
pub struct SelectionSet<'a, T, W> {
    fields: Vec<GraphQLField>,
    response: Response<'a>,
    _marker: PhantomData<fn() -> (T, W)>,
}

impl<'a, T, W> SelectionSet<'a, T, W> {
    fn pending() -> Self {
        Self {
            fields: Vec::new(),
            response: Response::Pending,
            _marker: PhantomData,
        }
    }

    fn resolved(data: &'a Value) -> Self {
        Self {
            fields: Vec::new(),
            response: Response::Resolved(data),
            _marker: PhantomData,
        }
    }

    /// Append a field to the selection.
    pub fn select(&mut self, field: GraphQLField) {
        self.fields.push(field);
    }

    /// Append several fields, in order.
    pub fn select_all(&mut self, fields: impl IntoIterator<Item = GraphQLField>) {
        self.fields.extend(fields);
    }

    pub fn fields(&self) -> &[GraphQLField] {
        &self.fields
    }

    pub fn response(&self) -> Response<'a> {
        self.response
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.response, Response::Pending)
    }

    /// Decode the leaf at `key`, or hand out its mock while pending.
    pub fn decode_leaf<V: LeafValue>(&self, key: &str) -> Result<V, DecodeError> {
        match self.response {
            Response::Pending => Ok(V::mock()),
            Response::Resolved(data) => {
                let value = field_value(data, key)?;
                V::decode(value).map_err(|e| e.within(key))
            }
        }
    }

    /// Decode the leaf at `key`, treating an absent key like `null`.
    pub fn decode_optional<V: LeafValue>(&self, key: &str) -> Result<Option<V>, DecodeError> {
        self.decode_leaf::<Option<V>>(key)
    }

    /// Decode the sub-payload at `key` through a nested selection.
    pub fn decode_composite<U, V>(
        &self,
        key: &str,
        selection: &Selection<U, V>,
    ) -> Result<U, DecodeError> {
        match self.response {
            Response::Pending => selection.mock(),
            Response::Resolved(data) => {
                let value = field_value(data, key)?;
                selection.decode(value).map_err(|e| e.within(key))
            }
        }
    }

    /// Decode the current payload through a fragment's selection. Inline
    /// fragment fields live in the same JSON object as the enclosing type.
    pub fn decode_fragment<U, V>(&self, selection: &Selection<U, V>) -> Result<U, DecodeError> {
        match self.response {
            Response::Pending => selection.mock(),
            Response::Resolved(data) => selection.decode(data),
        }
    }

    /// Read `__typename` from the payload. `None` while pending.
    pub fn discriminator<K: Discriminator>(&self) -> Result<Option<K>, DecodeError> {
        let Response::Resolved(data) = self.response else {
            return Ok(None);
        };
        let value = field_value(data, TYPENAME)?;
        let typename = String::decode(value).map_err(|e| e.within(TYPENAME))?;
        K::from_typename(&typename)
            .map(Some)
            .ok_or_else(|| DecodeError::UnknownPossibleType {
                type_name: K::TYPE_NAME.to_string(),
                typename,
            })
    }
}

fn field_value<'v>(data: &'v Value, key: &str) -> Result<&'v Value, DecodeError> {
    match data {
        Value::Object(map) => Ok(map.get(key).unwrap_or(&NULL)),
        Value::Null => Err(DecodeError::MissingValue),
        other => Err(DecodeError::mismatch("object", other)),
    }
}

type Decoder<T, W> =
    dyn for<'a> Fn(&mut SelectionSet<'a, T, W>) -> Result<T, DecodeError> + Send + Sync;

/// A requested fragment paired with the function that decodes it.
pub struct Selection<T, W> {
    fields: Vec<GraphQLField>,
    decoder: Arc<Decoder<T, W>>,
}

impl<T, W> Clone for Selection<T, W> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<T, W> std::fmt::Debug for Selection<T, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<T, W> Selection<T, W> {
    /// Build a selection from its decode function, probing it once to
    /// collect the requested fields.
    pub fn new<F>(decoder: F) -> Self
    where
        F: for<'a> Fn(&mut SelectionSet<'a, T, W>) -> Result<T, DecodeError>
            + Send
            + Sync
            + 'static,
    {
        let decoder: Arc<Decoder<T, W>> = Arc::new(decoder);
        let mut probe = SelectionSet::pending();
        if let Err(err) = (*decoder)(&mut probe) {
            tracing::warn!(error = %err, "selection decoder failed while probing fields");
        }
        Self {
            fields: probe.fields,
            decoder,
        }
    }

    /// The fields this selection requests, in order.
    pub fn fields(&self) -> &[GraphQLField] {
        &self.fields
    }

    /// Render the requested fields as a `{ ... }` block.
    pub fn render(&self) -> String {
        render_selection(&self.fields)
    }

    /// Decode a response payload.
    pub fn decode(&self, data: &Value) -> Result<T, DecodeError> {
        let mut set = SelectionSet::resolved(data);
        let result = (*self.decoder)(&mut set);
        if cfg!(debug_assertions) && set.fields != self.fields {
            tracing::warn!(
                probed = %render_selection(&self.fields),
                decoded = %render_selection(&set.fields),
                "selection requested different fields while decoding"
            );
        }
        result
    }

    /// The placeholder value produced while no response is available.
    pub fn mock(&self) -> Result<T, DecodeError> {
        let mut set = SelectionSet::pending();
        (*self.decoder)(&mut set)
    }
}

impl<T: 'static, W: Wire> Selection<T, W> {
    /// Lift into a selection over a list of `W`.
    pub fn list(self) -> Selection<Vec<T>, Vec<W>> {
        Selection::new(move |set| {
            set.select_all(self.fields.iter().cloned());
            match set.response() {
                Response::Resolved(Value::Array(items)) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.decode(item).map_err(|e| e.within(i.to_string())))
                    .collect(),
                Response::Resolved(Value::Null) => Err(DecodeError::MissingValue),
                Response::Resolved(other) => Err(DecodeError::mismatch("list", other)),
                Response::Pending => Ok(Vec::new()),
            }
        })
    }

    /// Lift into a selection over a nullable `W`.
    pub fn nullable(self) -> Selection<Option<T>, Option<W>> {
        Selection::new(move |set| {
            set.select_all(self.fields.iter().cloned());
            match set.response() {
                Response::Resolved(Value::Null) => Ok(None),
                Response::Resolved(data) => self.decode(data).map(Some),
                Response::Pending => Ok(None),
            }
        })
    }

    /// Decode a nullable `W` into a non-null result, failing on `null`.
    pub fn non_null_or_fail(self) -> Selection<T, Option<W>> {
        Selection::new(move |set| {
            set.select_all(self.fields.iter().cloned());
            match set.response() {
                Response::Resolved(Value::Null) => Err(DecodeError::MissingValue),
                Response::Resolved(data) => self.decode(data),
                Response::Pending => self.mock(),
            }
        })
    }
}

impl<W: Wire> Selection<(), W> {
    /// Request only the type's identity; decodes to `()`.
    pub fn empty() -> Self {
        Selection::new(|set| {
            set.select(GraphQLField::typename());
            Ok(())
        })
    }
}
