//! Directed graph with typed node and edge records.

use std::fmt;

use indexmap::IndexMap;

use super::error::{EditorError, Result};
use super::geometry::Point;

/// Stable node identifier.
///
/// Nodes placed by clicking get the smallest free positive integer, nodes created from imported
/// labels keep their label as identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
	/// Interactively allocated identifier.
	Index(u32),
	/// Identifier taken from an imported label.
	Name(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Index(i) => write!(f, "{i}"),
			NodeId::Name(name) => f.write_str(name),
		}
	}
}

impl From<u32> for NodeId {
	fn from(value: u32) -> Self {
		NodeId::Index(value)
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		NodeId::Name(value.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(value: String) -> Self {
		NodeId::Name(value)
	}
}

/// Display attributes of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeAttrs {
	/// Text drawn inside the node.
	pub label: String,
	/// CSS color used to fill the node.
	pub color: String,
}

/// Attributes of a directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeAttrs {
	/// Abstract length of the edge; mapped to pixels through the scale.
	pub weight: f64,
	/// Optional text drawn next to the edge midpoint.
	pub label: String,
	/// CSS color of the line and arrowhead.
	pub color: String,
}

/// A borrowed view of one edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef<'a> {
	/// Tail of the edge.
	pub source: &'a NodeId,
	/// Head of the edge.
	pub target: &'a NodeId,
	/// Edge attributes.
	pub attrs: &'a EdgeAttrs,
}

/// Directed graph holding at most one edge per ordered node pair.
///
/// Nodes and edges iterate in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: IndexMap<NodeId, NodeAttrs>,
	edges: IndexMap<(NodeId, NodeId), EdgeAttrs>,
}

impl Graph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether `id` is a node of the graph.
	pub fn contains(&self, id: &NodeId) -> bool {
		self.nodes.contains_key(id)
	}

	/// Attributes of node `id`.
	pub fn node(&self, id: &NodeId) -> Option<&NodeAttrs> {
		self.nodes.get(id)
	}

	/// Mutable attributes of node `id`.
	pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut NodeAttrs> {
		self.nodes.get_mut(id)
	}

	/// Node identifiers in insertion order.
	pub fn node_ids(&self) -> impl ExactSizeIterator<Item = &NodeId> {
		self.nodes.keys()
	}

	/// Nodes and their attributes in insertion order.
	pub fn nodes(&self) -> impl ExactSizeIterator<Item = (&NodeId, &NodeAttrs)> {
		self.nodes.iter()
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeRef<'_>> {
		self.edges.iter().map(|((source, target), attrs)| EdgeRef {
			source,
			target,
			attrs,
		})
	}

	/// Attributes of the directed edge `source -> target`.
	pub fn edge(&self, source: &NodeId, target: &NodeId) -> Option<&EdgeAttrs> {
		self.edges.get(&(source.clone(), target.clone()))
	}

	/// Whether the directed edge `source -> target` exists. `(u, v)` and `(v, u)` are distinct.
	pub fn has_edge(&self, source: &NodeId, target: &NodeId) -> bool {
		self.edge(source, target).is_some()
	}

	/// Smallest positive integer identifier not used by any node.
	pub fn next_free_index(&self) -> u32 {
		(1..)
			.find(|i| !self.nodes.contains_key(&NodeId::Index(*i)))
			.unwrap_or(u32::MAX)
	}

	/// Inserts a node, replacing the attributes of an existing node with the same id.
	pub fn insert_node(&mut self, id: NodeId, attrs: NodeAttrs) {
		self.nodes.insert(id, attrs);
	}

	/// Inserts the edge `source -> target`, replacing the attributes of an existing one.
	///
	/// Self-loops are accepted. Both endpoints must already exist.
	pub fn insert_edge(&mut self, source: NodeId, target: NodeId, attrs: EdgeAttrs) -> Result<()> {
		for end in [&source, &target] {
			if !self.contains(end) {
				return Err(EditorError::UnknownNode(end.clone()));
			}
		}
		self.edges.insert((source, target), attrs);
		Ok(())
	}

	/// Removes a node together with every incident edge.
	pub fn remove_node(&mut self, id: &NodeId) -> Option<NodeAttrs> {
		let attrs = self.nodes.shift_remove(id)?;
		self.edges
			.retain(|(source, target), _| source != id && target != id);
		Some(attrs)
	}

	/// Removes every node and edge.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

/// Node positions, kept apart from the graph so attribute edits never touch layout.
pub type Positions = IndexMap<NodeId, Point>;

#[cfg(test)]
mod tests {
	use super::*;

	fn attrs(label: &str) -> NodeAttrs {
		NodeAttrs {
			label: label.into(),
			color: "white".into(),
		}
	}

	fn edge(weight: f64) -> EdgeAttrs {
		EdgeAttrs {
			weight,
			label: String::new(),
			color: "black".into(),
		}
	}

	#[test]
	fn next_free_index_fills_gaps() {
		let mut g = Graph::new();
		assert_eq!(g.next_free_index(), 1);
		g.insert_node(NodeId::Index(1), attrs("1"));
		g.insert_node(NodeId::Index(3), attrs("3"));
		assert_eq!(g.next_free_index(), 2);
		g.insert_node(NodeId::Index(2), attrs("2"));
		assert_eq!(g.next_free_index(), 4);
	}

	#[test]
	fn named_nodes_do_not_occupy_indices() {
		let mut g = Graph::new();
		g.insert_node("1".into(), attrs("1"));
		assert_eq!(g.next_free_index(), 1);
	}

	#[test]
	fn edges_are_directed() {
		let mut g = Graph::new();
		g.insert_node("a".into(), attrs("a"));
		g.insert_node("b".into(), attrs("b"));
		g.insert_edge("a".into(), "b".into(), edge(1.0)).unwrap();

		assert!(g.has_edge(&"a".into(), &"b".into()));
		assert!(!g.has_edge(&"b".into(), &"a".into()));

		g.insert_edge("b".into(), "a".into(), edge(2.0)).unwrap();
		assert_eq!(g.edge_count(), 2);
	}

	#[test]
	fn reinserting_an_edge_replaces_its_attributes() {
		let mut g = Graph::new();
		g.insert_node("a".into(), attrs("a"));
		g.insert_node("b".into(), attrs("b"));
		g.insert_edge("a".into(), "b".into(), edge(1.0)).unwrap();
		g.insert_edge("a".into(), "b".into(), edge(4.0)).unwrap();

		assert_eq!(g.edge_count(), 1);
		assert_eq!(g.edge(&"a".into(), &"b".into()).unwrap().weight, 4.0);
	}

	#[test]
	fn edges_require_existing_endpoints() {
		let mut g = Graph::new();
		g.insert_node("a".into(), attrs("a"));
		let err = g
			.insert_edge("a".into(), "ghost".into(), edge(1.0))
			.unwrap_err();
		assert!(matches!(err, EditorError::UnknownNode(NodeId::Name(ref n)) if n == "ghost"));
		assert_eq!(g.edge_count(), 0);
	}

	#[test]
	fn self_loops_are_structurally_allowed() {
		let mut g = Graph::new();
		g.insert_node(NodeId::Index(1), attrs("1"));
		g.insert_edge(NodeId::Index(1), NodeId::Index(1), edge(1.0)).unwrap();
		assert!(g.has_edge(&NodeId::Index(1), &NodeId::Index(1)));
	}

	#[test]
	fn removing_a_node_drops_incident_edges() {
		let mut g = Graph::new();
		for id in ["a", "b", "c"] {
			g.insert_node(id.into(), attrs(id));
		}
		g.insert_edge("a".into(), "b".into(), edge(1.0)).unwrap();
		g.insert_edge("c".into(), "a".into(), edge(1.0)).unwrap();
		g.insert_edge("b".into(), "c".into(), edge(1.0)).unwrap();

		assert!(g.remove_node(&"a".into()).is_some());
		assert_eq!(g.node_count(), 2);
		assert_eq!(g.edge_count(), 1);
		assert!(g.has_edge(&"b".into(), &"c".into()));
		assert!(g.remove_node(&"a".into()).is_none());
	}
}
