// Response wrapper types
//
// `GenericResponse` is the minimal identified wrapper every non-CRUD action
// resolves with. `Pagination` + `ResourceList` model list envelopes; the
// wire uses camelCase meta keys and we keep a flattened catch-all because
// the API adds envelope fields (cursors, hints) without notice.

use std::ops::Deref;
use std::slice::Iter;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Fallback identifier field checked when the bound field is absent.
const REQUEST_UUID: &str = "request_uuid";

/// Render a scalar JSON value as an entity identifier.
///
/// Identifiers are strings on the wire, but a handful of endpoints return
/// numeric keys; anything non-scalar is not an identifier.
pub(crate) fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// An arbitrary response payload lifted into an identified object.
///
/// Construction extracts the primary identifier: the bound identifier field
/// if the payload carries it, else a field literally named `request_uuid`,
/// else no id. Every other field is kept as-is. Immutable after
/// construction -- a response is not fallible and is never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericResponse {
    id: Option<String>,
    fields: Map<String, Value>,
}

impl GenericResponse {
    /// Wrap a raw field map, keying `id` by `id_field` when provided.
    pub fn new(fields: Map<String, Value>, id_field: Option<&str>) -> Self {
        let id = match id_field {
            Some(field) if fields.contains_key(field) => {
                fields.get(field).and_then(value_as_id)
            }
            _ => fields.get(REQUEST_UUID).and_then(value_as_id),
        };
        Self { id, fields }
    }

    /// The extracted primary identifier, if any field supplied one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Look up a raw response field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All raw response fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the wrapper, yielding the raw field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl Serialize for GenericResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Pagination envelope on list responses.
///
/// Wire keys are camelCase (`totalCount`); unknown envelope fields land in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered page of resources plus the pagination envelope it arrived
/// with.
///
/// Dereferences to a slice, so indexing and iteration read like a plain
/// `Vec` while `meta` stays a first-class field instead of metadata smuggled
/// onto a bare sequence.
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    pub items: Vec<T>,
    pub meta: Pagination,
}

impl<T> ResourceList<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Deref for ResourceList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
