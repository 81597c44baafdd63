//! The editing session: one owner for the graph, its layout, its scale and the selection.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::annotation::Annotation;
use super::config::EditorConfig;
use super::error::{EditorError, Result};
use super::export::{EXPORT_MARGIN, ExportFrame};
use super::geometry::{Point, distance};
use super::import::{BulkRow, Template, Topology};
use super::model::{EdgeAttrs, Graph, NodeAttrs, NodeId, Positions};
use super::relax::{RelaxParams, relax};
use super::scale::Scale;

/// Graph, node positions, scale factor, selection and annotations of one editor.
///
/// Every mutation keeps two invariants: edge endpoints are nodes, and every node has a position.
#[derive(Clone, Debug)]
pub struct EditorSession {
	config: EditorConfig,
	graph: Graph,
	positions: Positions,
	scale: Scale,
	selection: Option<NodeId>,
	annotations: Vec<Annotation>,
	width: f64,
	height: f64,
	rng: StdRng,
}

impl EditorSession {
	/// Creates an empty session for a `width` x `height` canvas.
	///
	/// `seed` drives the random placement of imported nodes; the relaxation itself is
	/// deterministic.
	pub fn new(config: EditorConfig, width: f64, height: f64, seed: u64) -> Self {
		Self {
			config,
			graph: Graph::new(),
			positions: Positions::new(),
			scale: Scale::unset(),
			selection: None,
			annotations: Vec::new(),
			width,
			height,
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// Session tunables.
	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// The graph model.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Node positions in canvas coordinates.
	pub fn positions(&self) -> &Positions {
		&self.positions
	}

	/// Position of node `id`.
	pub fn position(&self, id: &NodeId) -> Option<Point> {
		self.positions.get(id).copied()
	}

	/// Current scale calibration.
	pub fn scale(&self) -> Scale {
		self.scale
	}

	/// Selected node, if any.
	pub fn selection(&self) -> Option<&NodeId> {
		self.selection.as_ref()
	}

	/// Free-standing shapes placed on the canvas.
	pub fn annotations(&self) -> &[Annotation] {
		&self.annotations
	}

	/// Canvas size used for bounds and random placement.
	pub fn canvas_size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Updates the canvas size after a resize.
	pub fn set_canvas_size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Adds a node at `at`, allocating the smallest free positive integer id when `id` is `None`.
	///
	/// Re-adding an existing id resets its attributes and moves it.
	pub fn add_node(&mut self, id: Option<NodeId>, at: Point) -> NodeId {
		let id = id.unwrap_or_else(|| NodeId::Index(self.graph.next_free_index()));
		self.graph.insert_node(
			id.clone(),
			NodeAttrs {
				label: id.to_string(),
				color: self.config.default_node_color.clone(),
			},
		);
		self.positions.insert(id.clone(), at);
		debug!("Added node {id} at ({:.1}, {:.1})", at.x, at.y);
		id
	}

	fn add_node_at_random(&mut self, id: NodeId) -> NodeId {
		let at = self.random_point();
		self.add_node(Some(id), at)
	}

	/// Uniform point inside the placement margin, on the fallback canvas when the real one is
	/// too small to place into.
	fn random_point(&mut self) -> Point {
		let (fallback_w, fallback_h) = self.config.fallback_canvas;
		let margin = self.config.placement_margin;
		let min_extent = 2.0 * margin;
		let width = if self.width < min_extent { fallback_w } else { self.width };
		let height = if self.height < min_extent { fallback_h } else { self.height };
		Point::new(
			self.rng.random_range(margin..=width - margin),
			self.rng.random_range(margin..=height - margin),
		)
	}

	/// Adds `source -> target` with the default edge color, calibrating the scale on the first
	/// positive weight. Layout is left untouched.
	pub fn add_edge(
		&mut self,
		source: NodeId,
		target: NodeId,
		weight: f64,
		label: impl Into<String>,
	) -> Result<()> {
		let attrs = EdgeAttrs {
			weight,
			label: label.into(),
			color: self.config.default_edge_color.clone(),
		};
		self.insert_edge(source, target, attrs)
	}

	/// Adds an edge with explicit attributes, calibrating the scale on the first positive weight.
	pub fn insert_edge(&mut self, source: NodeId, target: NodeId, attrs: EdgeAttrs) -> Result<()> {
		let weight = attrs.weight;
		self.graph.insert_edge(source, target, attrs)?;
		self.scale.set_if_unset(weight);
		Ok(())
	}

	/// Adds an edge and settles the layout around it.
	pub fn connect(
		&mut self,
		source: NodeId,
		target: NodeId,
		weight: f64,
		label: impl Into<String>,
	) -> Result<()> {
		self.add_edge(source, target, weight, label)?;
		self.settle(self.config.edge_settle_iterations);
		Ok(())
	}

	/// Removes a node, its incident edges and its position. Absent nodes are ignored.
	pub fn remove_node(&mut self, id: &NodeId) -> bool {
		if self.graph.remove_node(id).is_none() {
			return false;
		}
		self.positions.shift_remove(id);
		if self.selection.as_ref() == Some(id) {
			self.selection = None;
		}
		debug!("Removed node {id}");
		true
	}

	/// Empties the session and forgets the scale.
	pub fn clear(&mut self) {
		self.graph.clear();
		self.positions.clear();
		self.selection = None;
		self.annotations.clear();
		self.scale.reset();
	}

	/// Selects `id`, or clears the selection. Unknown nodes clear it.
	pub fn select(&mut self, id: Option<NodeId>) {
		self.selection = id.filter(|id| self.graph.contains(id));
	}

	/// Deletes the selected node, returning it. Without a selection nothing happens.
	pub fn delete_selected(&mut self) -> Option<NodeId> {
		let id = self.selection.take()?;
		self.remove_node(&id).then_some(id)
	}

	/// Renames node `id`.
	pub fn set_node_label(&mut self, id: &NodeId, label: impl Into<String>) -> Result<()> {
		let node = self
			.graph
			.node_mut(id)
			.ok_or_else(|| EditorError::UnknownNode(id.clone()))?;
		node.label = label.into();
		Ok(())
	}

	/// Recolors node `id`.
	pub fn set_node_color(&mut self, id: &NodeId, color: impl Into<String>) -> Result<()> {
		let node = self
			.graph
			.node_mut(id)
			.ok_or_else(|| EditorError::UnknownNode(id.clone()))?;
		node.color = color.into();
		Ok(())
	}

	/// First node, in insertion order, whose circle contains `at`.
	pub fn node_at(&self, at: Point) -> Option<NodeId> {
		self.positions
			.iter()
			.find(|(_, p)| distance(at, **p) <= self.config.node_radius)
			.map(|(id, _)| id.clone())
	}

	/// Places a free-standing shape on the canvas.
	pub fn add_annotation(&mut self, annotation: Annotation) {
		self.annotations.push(annotation);
	}

	/// Moves `id` to `to` and lets the rest of the graph follow for a few iterations while `id`
	/// stays where it was put.
	pub fn drag_to(&mut self, id: &NodeId, to: Point) {
		let Some(p) = self.positions.get_mut(id) else {
			return;
		};
		*p = to;
		let pinned = HashSet::from([id.clone()]);
		self.relax(&pinned, self.config.drag_iterations);
	}

	/// Runs `iterations` relaxation iterations with no pinned nodes.
	pub fn settle(&mut self, iterations: usize) {
		self.relax(&HashSet::new(), iterations);
	}

	/// Full settle pass.
	pub fn auto_layout(&mut self) {
		self.settle(self.config.full_settle_iterations);
	}

	/// Runs the relaxation engine over the session's layout.
	pub fn relax(&mut self, pinned: &HashSet<NodeId>, iterations: usize) {
		let params = RelaxParams::for_canvas(&self.config, self.width, self.height);
		relax(
			&self.graph,
			&mut self.positions,
			self.scale,
			pinned,
			iterations,
			&params,
		);
	}

	/// Replaces the graph with a table of connections.
	///
	/// Every distinct label becomes one node at a random position; a repeated connection keeps
	/// the attributes of its last row. The scale is calibrated from the first positive weight.
	pub fn load_bulk(&mut self, rows: &[BulkRow]) -> Result<()> {
		if rows.is_empty() {
			return Err(EditorError::NoRows);
		}
		self.clear();

		let labels: IndexSet<&str> = rows
			.iter()
			.flat_map(|row| [row.source.as_str(), row.target.as_str()])
			.collect();
		for label in labels {
			self.add_node_at_random(label.into());
		}
		for row in rows {
			let attrs = EdgeAttrs {
				weight: row.parsed_weight(),
				label: row.label.clone(),
				color: self.config.default_edge_color.clone(),
			};
			self.insert_edge(row.source.as_str().into(), row.target.as_str().into(), attrs)?;
		}
		self.finish_import("bulk input");
		Ok(())
	}

	/// Replaces the graph with a nested-mapping topology.
	///
	/// Neighbors that are not keys still become nodes. A directed pair already present is not
	/// added again, but its weight still takes part in calibration.
	pub fn load_topology(&mut self, topology: &Topology) -> Result<()> {
		self.clear();

		for (node, _) in topology.iter() {
			self.add_node_at_random(node.into());
		}
		for (node, neighbors) in topology.iter() {
			let source = NodeId::from(node);
			for (neighbor, &weight) in neighbors {
				let target = NodeId::from(neighbor.as_str());
				if !self.graph.contains(&target) {
					self.add_node_at_random(target.clone());
				}
				if self.graph.has_edge(&source, &target) {
					self.scale.set_if_unset(weight);
				} else {
					self.add_edge(source.clone(), target, weight, "")?;
				}
			}
		}
		self.finish_import("topology");
		Ok(())
	}

	/// Replaces the graph with a built-in template.
	pub fn load_template(&mut self, template: Template) -> Result<()> {
		let topology = template.topology()?;
		self.load_topology(&topology)?;
		info!("Loaded template {}", template.name());
		Ok(())
	}

	fn finish_import(&mut self, what: &str) {
		self.scale.fall_back_if_unset();
		info!(
			"Imported {} nodes and {} edges from {what}",
			self.graph.node_count(),
			self.graph.edge_count()
		);
		self.auto_layout();
	}

	/// Frame of a raster export, or `None` for an empty graph.
	pub fn export_frame(&self) -> Option<ExportFrame> {
		ExportFrame::from_positions(&self.positions, EXPORT_MARGIN)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn session() -> EditorSession {
		EditorSession::new(EditorConfig::default(), 800.0, 600.0, 7)
	}

	#[test]
	fn click_added_nodes_get_smallest_free_index() {
		let mut s = session();
		let a = s.add_node(None, Point::new(100.0, 100.0));
		let b = s.add_node(None, Point::new(200.0, 100.0));
		assert_eq!((a.clone(), b), (NodeId::Index(1), NodeId::Index(2)));

		s.remove_node(&a);
		assert_eq!(s.add_node(None, Point::new(300.0, 100.0)), NodeId::Index(1));
		assert_eq!(s.graph().node(&NodeId::Index(1)).unwrap().label, "1");
		assert_eq!(s.graph().node(&NodeId::Index(1)).unwrap().color, "white");
	}

	#[test]
	fn first_edge_calibrates_the_scale() {
		let mut s = session();
		let a = s.add_node(None, Point::new(0.0, 0.0));
		let b = s.add_node(None, Point::new(10.0, 0.0));
		let c = s.add_node(None, Point::new(40.0, 0.0));

		s.add_edge(a.clone(), b.clone(), 2.0, "").unwrap();
		s.add_edge(b, c, 5.0, "").unwrap();

		assert_eq!(s.scale().pixels_per_unit(), Some(75.0));
	}

	#[test]
	fn zero_weight_edge_does_not_calibrate() {
		let mut s = session();
		let a = s.add_node(None, Point::new(0.0, 0.0));
		let b = s.add_node(None, Point::new(10.0, 0.0));
		s.add_edge(a.clone(), b.clone(), 0.0, "").unwrap();
		assert!(!s.scale().is_set());
		s.add_edge(b, a, 3.0, "").unwrap();
		assert_eq!(s.scale().pixels_per_unit(), Some(50.0));
	}

	#[test]
	fn edge_to_unknown_node_leaves_session_untouched() {
		let mut s = session();
		let a = s.add_node(None, Point::new(0.0, 0.0));
		assert!(s.add_edge(a, NodeId::Index(9), 1.0, "").is_err());
		assert_eq!(s.graph().edge_count(), 0);
		assert!(!s.scale().is_set());
	}

	#[test]
	fn removing_the_selected_node_clears_selection() {
		let mut s = session();
		let a = s.add_node(None, Point::new(50.0, 50.0));
		let b = s.add_node(None, Point::new(250.0, 50.0));
		s.add_edge(a.clone(), b.clone(), 1.0, "x").unwrap();
		s.select(Some(a.clone()));

		assert_eq!(s.delete_selected(), Some(a.clone()));
		assert_eq!(s.selection(), None);
		assert_eq!(s.position(&a), None);
		assert_eq!(s.graph().edge_count(), 0);
		assert_eq!(s.delete_selected(), None);
	}

	#[test]
	fn selecting_unknown_node_clears_selection() {
		let mut s = session();
		let a = s.add_node(None, Point::new(50.0, 50.0));
		s.select(Some(a));
		s.select(Some(NodeId::from("ghost")));
		assert_eq!(s.selection(), None);
	}

	#[test]
	fn clear_resets_everything() {
		let mut s = session();
		let a = s.add_node(None, Point::new(50.0, 50.0));
		let b = s.add_node(None, Point::new(250.0, 50.0));
		s.add_edge(a.clone(), b, 1.0, "").unwrap();
		s.select(Some(a));
		s.add_annotation(Annotation::circle(Point::new(10.0, 10.0)));

		s.clear();

		assert!(s.graph().is_empty());
		assert!(s.positions().is_empty());
		assert!(s.annotations().is_empty());
		assert_eq!(s.selection(), None);
		assert!(!s.scale().is_set());
		assert_eq!(s.export_frame(), None);
	}

	#[test]
	fn hit_test_uses_node_radius() {
		let mut s = session();
		let a = s.add_node(None, Point::new(100.0, 100.0));
		assert_eq!(s.node_at(Point::new(112.0, 116.0)), Some(a));
		assert_eq!(s.node_at(Point::new(121.0, 100.0)), None);
	}

	#[test]
	fn drag_pins_the_dragged_node() {
		let mut s = session();
		let a = s.add_node(None, Point::new(100.0, 100.0));
		let b = s.add_node(None, Point::new(300.0, 100.0));
		s.add_edge(a.clone(), b.clone(), 1.0, "").unwrap();
		let target = Point::new(5.0, 590.0);

		s.drag_to(&a, target);

		assert_eq!(s.position(&a), Some(target));
		assert_ne!(s.position(&b), Some(Point::new(300.0, 100.0)));
	}

	#[test]
	fn label_and_color_edits_require_existing_node() {
		let mut s = session();
		let a = s.add_node(None, Point::new(100.0, 100.0));
		s.set_node_label(&a, "Core").unwrap();
		s.set_node_color(&a, "#ff0000").unwrap();
		let attrs = s.graph().node(&a).unwrap();
		assert_eq!((attrs.label.as_str(), attrs.color.as_str()), ("Core", "#ff0000"));

		assert!(s.set_node_label(&NodeId::Index(42), "x").is_err());
	}

	#[test]
	fn random_placement_respects_margin() {
		let mut s = EditorSession::new(EditorConfig::default(), 40.0, 700.0, 3);
		for _ in 0..50 {
			let p = s.random_point();
			assert!((50.0..=750.0).contains(&p.x));
			assert!((50.0..=650.0).contains(&p.y));
		}
	}

	#[test]
	fn empty_bulk_input_is_rejected_without_clearing() {
		let mut s = session();
		s.add_node(None, Point::new(100.0, 100.0));
		assert!(matches!(s.load_bulk(&[]), Err(EditorError::NoRows)));
		assert_eq!(s.graph().node_count(), 1);
	}

	#[test]
	fn bulk_rows_without_positive_weight_fall_back() {
		let mut s = session();
		let rows = [BulkRow::new("a", "b", "-2", "").unwrap()];
		s.load_bulk(&rows).unwrap();
		assert_eq!(s.scale().pixels_per_unit(), Some(100.0));
		assert_eq!(s.graph().edge(&"a".into(), &"b".into()).unwrap().weight, -2.0);
	}
}
