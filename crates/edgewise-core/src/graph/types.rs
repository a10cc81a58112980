//! Vertex and edge documents, document identifiers and traversal direction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Opaque key/value payload of a document.
pub type Document = Map<String, Value>;

/// Globally unique document identifier: `collection/key`.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::DocumentId;
///
/// let id: DocumentId = "persons/alice".parse().unwrap();
/// assert_eq!(id.collection(), "persons");
/// assert_eq!(id.key(), "alice");
/// assert_eq!(id.to_string(), "persons/alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId {
    collection: String,
    key: String,
}

impl DocumentId {
    /// Creates an id from its two segments.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDocumentId` if either segment is empty or the
    /// collection name contains a `/`.
    pub fn new(collection: &str, key: &str) -> Result<Self> {
        if collection.is_empty() || key.is_empty() || collection.contains('/') {
            return Err(Error::InvalidDocumentId(format!("{collection}/{key}")));
        }
        Ok(Self {
            collection: collection.to_string(),
            key: key.to_string(),
        })
    }

    /// Parses `reference` as a full id, or as a bare key inside
    /// `default_collection` when it carries no collection segment.
    ///
    /// ```rust
    /// use edgewise_core::graph::DocumentId;
    ///
    /// let id = DocumentId::resolve("A", "vertices").unwrap();
    /// assert_eq!(id.to_string(), "vertices/A");
    /// let id = DocumentId::resolve("other/B", "vertices").unwrap();
    /// assert_eq!(id.collection(), "other");
    /// ```
    pub fn resolve(reference: &str, default_collection: &str) -> Result<Self> {
        if reference.contains('/') {
            reference.parse()
        } else {
            Self::new(default_collection, reference)
        }
    }

    /// Returns the collection segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the key segment.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for DocumentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((collection, key)) => Self::new(collection, key),
            None => Err(Error::InvalidDocumentId(s.to_string())),
        }
    }
}

impl TryFrom<String> for DocumentId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

/// Which incident edges a traversal follows from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow edges whose `_from` is the current vertex.
    #[default]
    Outbound,
    /// Follow edges whose `_to` is the current vertex.
    Inbound,
    /// Follow edges in both directions.
    Any,
}

impl Direction {
    /// Returns the query-language spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
            Self::Any => "any",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "outbound" => Ok(Self::Outbound),
            "inbound" => Ok(Self::Inbound),
            "any" => Ok(Self::Any),
            other => Err(Error::InvalidArgument(format!(
                "direction must be one of outbound, inbound, any (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vertex document.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::{DocumentId, Vertex};
/// use serde_json::json;
///
/// let id = DocumentId::new("persons", "alice").unwrap();
/// let vertex = Vertex::new(id).with_property("name", json!("Alice"));
///
/// assert_eq!(vertex.attribute("_key"), Some(json!("alice")));
/// assert_eq!(vertex.attribute("name"), Some(json!("Alice")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(rename = "_id")]
    id: DocumentId,
    #[serde(flatten)]
    properties: Document,
}

impl Vertex {
    /// Creates a vertex without properties.
    #[must_use]
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            properties: Document::new(),
        }
    }

    /// Replaces the properties (builder pattern).
    ///
    /// System attributes (`_id`, `_key`) in `properties` are dropped; they are
    /// always derived from the id.
    #[must_use]
    pub fn with_properties(mut self, mut properties: Document) -> Self {
        strip_system_attributes(&mut properties);
        self.properties = properties;
        self
    }

    /// Sets a single property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.set_property(name, value);
        self
    }

    /// Returns the vertex id.
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the user properties.
    #[must_use]
    pub fn properties(&self) -> &Document {
        &self.properties
    }

    /// Returns a user property, if present.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Sets a user property. System attribute names are ignored.
    pub fn set_property(&mut self, name: &str, value: Value) {
        if !is_system_attribute(name) {
            self.properties.insert(name.to_string(), value);
        }
    }

    /// Returns an attribute including the system attributes `_id` and `_key`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "_id" => Some(Value::String(self.id.to_string())),
            "_key" => Some(Value::String(self.id.key().to_string())),
            _ => self.properties.get(name).cloned(),
        }
    }

    /// Renders the vertex as a query-language document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut doc = Document::with_capacity(self.properties.len() + 2);
        doc.insert("_id".to_string(), Value::String(self.id.to_string()));
        doc.insert("_key".to_string(), Value::String(self.id.key().to_string()));
        for (name, value) in &self.properties {
            doc.insert(name.clone(), value.clone());
        }
        Value::Object(doc)
    }
}

/// An edge document.
///
/// Edges are stored with a canonical `_from` → `_to` direction; the traversal
/// direction decides which endpoint is the neighbor.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::{DocumentId, Edge};
///
/// let edge = Edge::new(
///     "knows/ab".parse().unwrap(),
///     "persons/a".parse().unwrap(),
///     "persons/b".parse().unwrap(),
/// )
/// .with_label("likes");
///
/// assert_eq!(edge.label(), Some("likes"));
/// assert_eq!(edge.to().key(), "b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "_id")]
    id: DocumentId,
    #[serde(rename = "_from")]
    from: DocumentId,
    #[serde(rename = "_to")]
    to: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    properties: Document,
}

impl Edge {
    /// Creates an edge between two vertices.
    #[must_use]
    pub fn new(id: DocumentId, from: DocumentId, to: DocumentId) -> Self {
        Self {
            id,
            from,
            to,
            label: None,
            properties: Document::new(),
        }
    }

    /// Sets the edge label (builder pattern). Blank labels clear it.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        let trimmed = label.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Replaces the properties (builder pattern).
    #[must_use]
    pub fn with_properties(mut self, mut properties: Document) -> Self {
        strip_system_attributes(&mut properties);
        if let Some(Value::String(label)) = properties.remove("label") {
            self = self.with_label(&label);
        }
        self.properties = properties;
        self
    }

    /// Sets a single property (builder pattern).
    ///
    /// A string `label` sets the edge label, as in [`Self::with_properties`].
    #[must_use]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        if name == "label" {
            return match value {
                Value::String(label) => self.with_label(&label),
                _ => self,
            };
        }
        if !is_system_attribute(name) {
            self.properties.insert(name.to_string(), value);
        }
        self
    }

    /// Returns the edge id.
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the `_from` vertex id.
    #[must_use]
    pub fn from(&self) -> &DocumentId {
        &self.from
    }

    /// Returns the `_to` vertex id.
    #[must_use]
    pub fn to(&self) -> &DocumentId {
        &self.to
    }

    /// Returns the edge label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the user properties.
    #[must_use]
    pub fn properties(&self) -> &Document {
        &self.properties
    }

    /// Returns a user property, if present.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns true if `vertex` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, vertex: &DocumentId) -> bool {
        &self.from == vertex || &self.to == vertex
    }

    /// Returns the endpoint reached when leaving `vertex` along this edge.
    ///
    /// `Outbound` always yields `_to` and `Inbound` always yields `_from`.
    /// For `Any` the endpoint opposite `vertex` is returned; a self loop
    /// yields `vertex` itself.
    #[must_use]
    pub fn neighbor_of(&self, vertex: &DocumentId, direction: Direction) -> &DocumentId {
        match direction {
            Direction::Outbound => &self.to,
            Direction::Inbound => &self.from,
            Direction::Any => {
                if &self.from == vertex {
                    &self.to
                } else {
                    &self.from
                }
            }
        }
    }

    /// Returns an attribute including `_id`, `_key`, `_from`, `_to` and `label`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "_id" => Some(Value::String(self.id.to_string())),
            "_key" => Some(Value::String(self.id.key().to_string())),
            "_from" => Some(Value::String(self.from.to_string())),
            "_to" => Some(Value::String(self.to.to_string())),
            "label" => self.label.clone().map(Value::String),
            _ => self.properties.get(name).cloned(),
        }
    }

    /// Renders the edge as a query-language document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut doc = Document::with_capacity(self.properties.len() + 5);
        doc.insert("_id".to_string(), Value::String(self.id.to_string()));
        doc.insert("_key".to_string(), Value::String(self.id.key().to_string()));
        doc.insert("_from".to_string(), Value::String(self.from.to_string()));
        doc.insert("_to".to_string(), Value::String(self.to.to_string()));
        if let Some(label) = &self.label {
            doc.insert("label".to_string(), Value::String(label.clone()));
        }
        for (name, value) in &self.properties {
            doc.insert(name.clone(), value.clone());
        }
        Value::Object(doc)
    }
}

fn is_system_attribute(name: &str) -> bool {
    matches!(name, "_id" | "_key" | "_from" | "_to" | "_rev")
}

fn strip_system_attributes(properties: &mut Document) {
    properties.retain(|name, _| !is_system_attribute(name));
}
