//! Bulk connection tables and nested-mapping topologies.

use indexmap::IndexMap;
use serde::Deserialize;

use super::error::{EditorError, Result};

/// Weight used when an imported weight is missing or not a number.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Parses a user supplied weight, falling back to [`DEFAULT_WEIGHT`].
///
/// Blank, unparsable and non-finite input never fails.
pub fn parse_weight(input: &str) -> f64 {
	match input.trim().parse::<f64>() {
		Ok(w) if w.is_finite() => w,
		_ => DEFAULT_WEIGHT,
	}
}

/// One `source -> target` connection of a bulk import table.
///
/// Fields are kept as entered so the table can show them back; the weight is only parsed when
/// the graph is generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkRow {
	/// Label of the source node.
	pub source: String,
	/// Label of the target node.
	pub target: String,
	/// Weight as typed.
	pub weight: String,
	/// Edge label, possibly empty.
	pub label: String,
}

impl BulkRow {
	/// Validates a manually entered row.
	///
	/// Surrounding whitespace is dropped, a blank weight becomes `"1.0"`, and a blank source or
	/// target is rejected.
	pub fn new(source: &str, target: &str, weight: &str, label: &str) -> Result<Self> {
		let (source, target) = (source.trim(), target.trim());
		if source.is_empty() {
			return Err(EditorError::MissingField("source"));
		}
		if target.is_empty() {
			return Err(EditorError::MissingField("target"));
		}
		let weight = match weight.trim() {
			"" => "1.0",
			w => w,
		};
		Ok(Self {
			source: source.to_owned(),
			target: target.to_owned(),
			weight: weight.to_owned(),
			label: label.trim().to_owned(),
		})
	}

	/// The row's weight, coerced by [`parse_weight`].
	pub fn parsed_weight(&self) -> f64 {
		parse_weight(&self.weight)
	}
}

/// Nested mapping `{node: {neighbor: weight}}` describing a directed topology.
///
/// Keys keep their document order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Topology(pub IndexMap<String, IndexMap<String, f64>>);

impl Topology {
	/// Parses a topology from JSON.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Nodes with their outgoing weights, in document order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, f64>)> {
		self.0.iter().map(|(node, neighbors)| (node.as_str(), neighbors))
	}
}

/// Built-in network topologies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Template {
	/// 14-node NSFNET backbone, weights in thousands of kilometres.
	Nsfnet,
	/// 24-node continental USA backbone, weights in thousands of kilometres.
	Usa,
}

impl Template {
	/// Every template, in menu order.
	pub const ALL: [Template; 2] = [Template::Nsfnet, Template::Usa];

	/// Menu label.
	pub fn name(self) -> &'static str {
		match self {
			Template::Nsfnet => "NSFNet",
			Template::Usa => "USA Topology",
		}
	}

	fn source(self) -> &'static str {
		match self {
			Template::Nsfnet => include_str!("templates/nsfnet.json"),
			Template::Usa => include_str!("templates/usa.json"),
		}
	}

	/// Decodes the embedded topology.
	pub fn topology(self) -> Result<Topology> {
		Topology::from_json(self.source()).map_err(|source| EditorError::Template {
			name: self.name(),
			source,
		})
	}
}
