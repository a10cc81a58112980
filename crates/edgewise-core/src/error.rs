//! Error types for Edgewise.

use thiserror::Error;

/// Errors raised by the graph layer.
///
/// A missing vertex is not an error: graph functions degrade it to an empty
/// result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A referenced vertex or edge collection does not exist.
    #[error("Collection '{0}' not found")]
    CollectionNotFound(String),

    /// A collection with the same name already exists.
    #[error("Collection '{0}' already exists")]
    CollectionExists(String),

    /// A document with the same id already exists.
    #[error("Document '{0}' already exists")]
    DocumentExists(String),

    /// A document id is not of the form `collection/key`.
    #[error("Invalid document id '{0}': expected 'collection/key'")]
    InvalidDocumentId(String),

    /// An edge references an endpoint collection that does not exist.
    #[error("Edge '{0}' references a missing collection")]
    DanglingEdge(String),

    /// The traversal configuration is inconsistent or would not terminate.
    #[error("Invalid traversal configuration: {0}")]
    ConfigurationInvalid(String),

    /// `TRAVERSAL_TREE` requires global vertex uniqueness.
    #[error("TRAVERSAL_TREE requires uniqueness.vertices = \"global\"")]
    TreeUniquenessViolation,

    /// A function argument has the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Engine configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CollectionNotFound("thefox".to_string());
        assert_eq!(err.to_string(), "Collection 'thefox' not found");

        let err = Error::ConfigurationInvalid("minDepth > maxDepth".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid traversal configuration: minDepth > maxDepth"
        );
    }

    #[test]
    fn test_tree_violation_display() {
        assert!(Error::TreeUniquenessViolation
            .to_string()
            .contains("global"));
    }

    #[test]
    fn test_error_from_figment() {
        let err: Error = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
