//! Error type of the graph core.

use super::model::NodeId;

/// Errors raised at the edges of the graph core.
///
/// Numeric weight problems are never errors: they are coerced to the default weight.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
	/// An edge endpoint or edited node is not part of the graph.
	#[error("node {0} does not exist")]
	UnknownNode(NodeId),
	/// A required field of a manually entered connection was left blank.
	#[error("{0} is required")]
	MissingField(&'static str),
	/// A bulk import was requested with an empty table.
	#[error("add at least one connection before generating the graph")]
	NoRows,
	/// An embedded template could not be decoded.
	#[error("template {name} is malformed: {source}")]
	Template {
		/// Template display name.
		name: &'static str,
		/// Underlying JSON error.
		#[source]
		source: serde_json::Error,
	},
}

/// Result alias for graph core operations.
pub type Result<T> = std::result::Result<T, EditorError>;
