//! Editor tunables.

/// Tunables of the editor session and its relaxation engine.
///
/// `Default` carries the values the editor ships with.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// Radius of a node circle; also the bounds margin of the relaxation engine.
	pub node_radius: f64,
	/// Fraction of the edge length error corrected per iteration.
	pub stiffness: f64,
	/// Minimum centre distance, as a multiple of `node_radius`.
	pub separation_factor: f64,
	/// Iterations run on every drag event.
	pub drag_iterations: usize,
	/// Iterations run after an edge is added.
	pub edge_settle_iterations: usize,
	/// Iterations run after imports and on explicit auto layout.
	pub full_settle_iterations: usize,
	/// Distance from the canvas border kept by random initial placement.
	pub placement_margin: f64,
	/// Canvas size assumed by random placement when the real canvas is tiny.
	pub fallback_canvas: (f64, f64),
	/// Fill color of new nodes.
	pub default_node_color: String,
	/// Stroke color of new edges.
	pub default_edge_color: String,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_radius: 20.0,
			stiffness: 0.5,
			separation_factor: 2.5,
			drag_iterations: 5,
			edge_settle_iterations: 50,
			full_settle_iterations: 100,
			placement_margin: 50.0,
			fallback_canvas: (800.0, 600.0),
			default_node_color: "white".into(),
			default_edge_color: "black".into(),
		}
	}
}

impl EditorConfig {
	/// Minimum allowed distance between two node centres.
	pub fn min_separation(&self) -> f64 {
		self.node_radius * self.separation_factor
	}
}
