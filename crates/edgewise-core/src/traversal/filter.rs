//! Vertex and edge filters applied during traversal.
//!
//! A vertex filter decides, per visited vertex, whether the vertex is emitted
//! (`exclude`) and whether it is expanded (`prune`). An edge filter decides
//! whether an incident edge is followed at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::{Document, Edge, Vertex};

/// Outcome of evaluating vertex filters for one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterDecision {
    /// Do not emit the vertex (it is still expanded).
    pub exclude: bool,
    /// Do not expand the vertex (it is still emitted).
    pub prune: bool,
}

impl FilterDecision {
    /// Emit and expand.
    pub const VISIT: Self = Self {
        exclude: false,
        prune: false,
    };
    /// Expand without emitting.
    pub const EXCLUDE: Self = Self {
        exclude: true,
        prune: false,
    };
    /// Emit without expanding.
    pub const PRUNE: Self = Self {
        exclude: false,
        prune: true,
    };

    /// Combines two decisions; a flag set by either side wins.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            exclude: self.exclude || other.exclude,
            prune: self.prune || other.prune,
        }
    }
}

/// What happens to a vertex that matches none of the filter examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexFilterMethod {
    /// Do not expand the vertex.
    Prune,
    /// Do not emit the vertex.
    Exclude,
}

impl std::str::FromStr for VertexFilterMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "prune" => Ok(Self::Prune),
            "exclude" => Ok(Self::Exclude),
            other => Err(Error::ConfigurationInvalid(format!(
                "vertexFilterMethod must be 'prune' or 'exclude' (got '{other}')"
            ))),
        }
    }
}

/// Custom vertex predicate: `(vertex, depth) -> decision`.
pub type VertexPredicate = Arc<dyn Fn(&Vertex, usize) -> FilterDecision + Send + Sync>;

/// Custom edge predicate: `edge -> follow?`.
pub type EdgePredicate = Arc<dyn Fn(&Edge) -> bool + Send + Sync>;

/// A vertex filter.
#[derive(Clone)]
pub enum VertexFilter {
    /// Vertices matching any example are visited normally; the others get
    /// `methods` applied.
    Examples {
        /// Example documents.
        examples: Vec<Document>,
        /// Methods applied to non-matching vertices.
        methods: Vec<VertexFilterMethod>,
    },
    /// Arbitrary predicate.
    Custom(VertexPredicate),
}

impl VertexFilter {
    /// Creates an example filter. An empty `methods` list means both
    /// `prune` and `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` if `examples` is empty.
    pub fn examples(examples: Vec<Document>, methods: Vec<VertexFilterMethod>) -> Result<Self> {
        if examples.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "filterVertices must be a non-empty list of examples".to_string(),
            ));
        }
        let methods = if methods.is_empty() {
            vec![VertexFilterMethod::Prune, VertexFilterMethod::Exclude]
        } else {
            methods
        };
        Ok(Self::Examples { examples, methods })
    }

    /// Wraps a custom predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Vertex, usize) -> FilterDecision + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluates the filter for a vertex reached at `depth`.
    #[must_use]
    pub fn evaluate(&self, vertex: &Vertex, depth: usize) -> FilterDecision {
        match self {
            Self::Examples { examples, methods } => {
                if matches_any(|name| vertex.attribute(name), examples) {
                    return FilterDecision::VISIT;
                }
                methods
                    .iter()
                    .fold(FilterDecision::VISIT, |decision, method| match method {
                        VertexFilterMethod::Prune => decision.merge(FilterDecision::PRUNE),
                        VertexFilterMethod::Exclude => decision.merge(FilterDecision::EXCLUDE),
                    })
            }
            Self::Custom(predicate) => predicate(vertex, depth),
        }
    }
}

impl fmt::Debug for VertexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Examples { examples, methods } => f
                .debug_struct("Examples")
                .field("examples", examples)
                .field("methods", methods)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// An edge filter. Edges rejected by a filter are never followed.
#[derive(Clone)]
pub enum EdgeFilter {
    /// Follow edges matching any of the examples.
    Examples(Vec<Document>),
    /// Follow edges whose label is in the list.
    Labels(Vec<String>),
    /// Arbitrary predicate.
    Custom(EdgePredicate),
}

impl EdgeFilter {
    /// Creates an example filter.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` if `examples` is empty.
    pub fn examples(examples: Vec<Document>) -> Result<Self> {
        if examples.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "followEdges must be a non-empty list of examples".to_string(),
            ));
        }
        Ok(Self::Examples(examples))
    }

    /// Creates a label filter.
    #[must_use]
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Labels(labels.into_iter().map(Into::into).collect())
    }

    /// Wraps a custom predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Edge) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns true if the edge may be followed.
    #[must_use]
    pub fn accepts(&self, edge: &Edge) -> bool {
        match self {
            Self::Examples(examples) => matches_any(|name| edge.attribute(name), examples),
            Self::Labels(labels) => edge
                .label()
                .is_some_and(|label| labels.iter().any(|l| l == label)),
            Self::Custom(predicate) => predicate(edge),
        }
    }
}

impl fmt::Debug for EdgeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Examples(examples) => f.debug_tuple("Examples").field(examples).finish(),
            Self::Labels(labels) => f.debug_tuple("Labels").field(labels).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Returns true if the document matches at least one example.
///
/// A document matches an example when every attribute of the example is
/// present on the document with an equal value. The empty example matches
/// everything; an empty example list matches nothing.
pub fn matches_any<F>(attribute: F, examples: &[Document]) -> bool
where
    F: Fn(&str) -> Option<Value>,
{
    examples.iter().any(|example| {
        example
            .iter()
            .all(|(name, expected)| attribute(name).as_ref() == Some(expected))
    })
}
