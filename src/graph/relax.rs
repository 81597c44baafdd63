//! Constraint relaxation that turns edge weights into node positions.
//!
//! Each iteration runs three passes in a fixed order: every edge is pulled or pushed toward its
//! target length, every pair of nodes closer than the minimum separation is pushed apart, and
//! every free node is clamped into the canvas. Pinned nodes are never written.
//!
//! The repulsion pass compares every pair of nodes, which keeps the engine to graphs of a few
//! dozen nodes.

use std::collections::HashSet;

use super::config::EditorConfig;
use super::geometry::{Point, distance};
use super::model::{Graph, NodeId, Positions};
use super::scale::Scale;

/// Divisor substituted for the distance between coincident points.
pub const MIN_DISTANCE: f64 = 0.1;

/// Fraction of the overlap removed from each node of a colliding pair.
const REPULSION_SHARE: f64 = 0.5;

/// Geometric parameters of a relaxation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxParams {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Node radius; free nodes keep this distance from the canvas border.
	pub margin: f64,
	/// Minimum allowed distance between two node centres.
	pub min_separation: f64,
	/// Fraction of the edge length error corrected per iteration.
	pub stiffness: f64,
}

impl RelaxParams {
	/// Parameters for a `width` x `height` canvas using the radii and stiffness of `config`.
	pub fn for_canvas(config: &EditorConfig, width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			margin: config.node_radius,
			min_separation: config.min_separation(),
			stiffness: config.stiffness,
		}
	}
}

/// Runs `iterations` relaxation iterations over `positions` in place.
///
/// Without a calibrated scale edge lengths cannot be enforced, so only repulsion and the
/// bounds clamp run. Edges whose endpoints have no position are skipped.
pub fn relax(
	graph: &Graph,
	positions: &mut Positions,
	scale: Scale,
	pinned: &HashSet<NodeId>,
	iterations: usize,
	params: &RelaxParams,
) {
	let nodes: Vec<&NodeId> = graph.node_ids().collect();
	for _ in 0..iterations {
		if scale.is_set() {
			apply_edge_constraints(graph, positions, scale, pinned, params.stiffness);
		}
		apply_repulsion(&nodes, positions, pinned, params.min_separation);
		clamp_to_bounds(&nodes, positions, pinned, params);
	}
}

/// Separation vector from `from` to `to` and its length, floored at [`MIN_DISTANCE`].
///
/// The floor only keeps the division finite: coincident points have a zero separation vector
/// and therefore never move each other.
fn separation(from: Point, to: Point) -> (Point, f64) {
	let d = distance(from, to);
	(to - from, if d == 0.0 { MIN_DISTANCE } else { d })
}

fn move_to(positions: &mut Positions, id: &NodeId, to: Point) {
	if let Some(p) = positions.get_mut(id) {
		*p = to;
	}
}

fn apply_edge_constraints(
	graph: &Graph,
	positions: &mut Positions,
	scale: Scale,
	pinned: &HashSet<NodeId>,
	stiffness: f64,
) {
	for edge in graph.edges() {
		let (Some(&pu), Some(&pv)) = (positions.get(edge.source), positions.get(edge.target))
		else {
			continue;
		};
		if edge.source == edge.target {
			continue;
		}
		let Some(target) = scale.target_distance(edge.attrs.weight) else {
			continue;
		};
		let (delta, d) = separation(pu, pv);
		let diff = (d - target) / d;
		let displacement = delta * (diff * stiffness);

		if !pinned.contains(edge.source) {
			move_to(positions, edge.source, pu + displacement);
		}
		if !pinned.contains(edge.target) {
			move_to(positions, edge.target, pv - displacement);
		}
	}
}

fn apply_repulsion(
	nodes: &[&NodeId],
	positions: &mut Positions,
	pinned: &HashSet<NodeId>,
	min_separation: f64,
) {
	for (i, &u) in nodes.iter().enumerate() {
		for &v in &nodes[i + 1..] {
			let (Some(&pu), Some(&pv)) = (positions.get(u), positions.get(v)) else {
				continue;
			};
			if distance(pu, pv) >= min_separation {
				continue;
			}
			let (delta, d) = separation(pu, pv);
			let push = (min_separation - d) / d * REPULSION_SHARE;
			let displacement = delta * push;

			if !pinned.contains(u) {
				move_to(positions, u, pu - displacement);
			}
			if !pinned.contains(v) {
				move_to(positions, v, pv + displacement);
			}
		}
	}
}

fn clamp_to_bounds(
	nodes: &[&NodeId],
	positions: &mut Positions,
	pinned: &HashSet<NodeId>,
	params: &RelaxParams,
) {
	let (lo, hi_x, hi_y) = (
		params.margin,
		params.width - params.margin,
		params.height - params.margin,
	);
	for &id in nodes {
		if pinned.contains(id) {
			continue;
		}
		if let Some(p) = positions.get_mut(id) {
			// max after min: a canvas narrower than two margins pins nodes to the margin
			p.x = p.x.min(hi_x).max(lo);
			p.y = p.y.min(hi_y).max(lo);
		}
	}
}
