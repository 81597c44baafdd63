use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::graph::{
	Annotation, DEFAULT_ARROW_SIZE, EditorSession, NodeId, Point, arrowhead_points,
};

const BACKGROUND: &str = "white";
const OUTLINE: &str = "black";
const SELECTED_OUTLINE: &str = "#1e64ff";
const LABEL_FONT: &str = "12px Arial";
const EDGE_LABEL_FONT: &str = "bold 12px Arial";

/// Region of canvas space painted onto a target surface.
pub struct Viewport<'a> {
	/// Canvas coordinate drawn at the surface's top-left corner.
	pub origin: Point,
	pub width: f64,
	pub height: f64,
	/// Node drawn with a highlighted outline.
	pub highlight: Option<&'a NodeId>,
}

impl Viewport<'_> {
	fn map(&self, p: Point) -> Point {
		p - self.origin
	}
}

/// Paints the interactive view of `session`, selection included.
pub fn render(session: &EditorSession, ctx: &CanvasRenderingContext2d) {
	let (width, height) = session.canvas_size();
	paint(
		session,
		ctx,
		&Viewport {
			origin: Point::default(),
			width,
			height,
			highlight: session.selection(),
		},
	);
}

/// Paints annotations, edges and nodes of `session` through `view`.
pub fn paint(session: &EditorSession, ctx: &CanvasRenderingContext2d, view: &Viewport<'_>) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, view.width, view.height);
	draw_annotations(session, ctx, view);
	draw_edges(session, ctx, view);
	draw_nodes(session, ctx, view);
}

fn draw_annotations(session: &EditorSession, ctx: &CanvasRenderingContext2d, view: &Viewport<'_>) {
	ctx.set_stroke_style_str(OUTLINE);
	ctx.set_fill_style_str(OUTLINE);
	ctx.set_line_width(2.0);
	for annotation in session.annotations() {
		match annotation {
			Annotation::Text { at, text } => {
				let at = view.map(*at);
				ctx.set_font(LABEL_FONT);
				ctx.set_text_align("center");
				ctx.set_text_baseline("middle");
				let _ = ctx.fill_text(text, at.x, at.y);
			}
			Annotation::Circle { center, radius } => {
				let c = view.map(*center);
				ctx.begin_path();
				let _ = ctx.arc(c.x, c.y, *radius, 0.0, 2.0 * PI);
				ctx.stroke();
			}
			Annotation::Arrow { from, to } => {
				let (from, to) = (view.map(*from), view.map(*to));
				ctx.begin_path();
				ctx.move_to(from.x, from.y);
				ctx.line_to(to.x, to.y);
				ctx.stroke();
				fill_triangle(ctx, arrowhead_points(from, to, DEFAULT_ARROW_SIZE).corners());
			}
		}
	}
}

fn draw_edges(session: &EditorSession, ctx: &CanvasRenderingContext2d, view: &Viewport<'_>) {
	let radius = session.config().node_radius;
	ctx.set_line_width(2.0);

	for edge in session.graph().edges() {
		let (Some(from), Some(to)) = (session.position(edge.source), session.position(edge.target))
		else {
			continue;
		};
		let (from, to) = (view.map(from), view.map(to));
		let color = edge.attrs.color.as_str();

		ctx.set_stroke_style_str(color);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		// stop the arrow at the target's rim
		let angle = (to.y - from.y).atan2(to.x - from.x);
		let end = Point::new(to.x - radius * angle.cos(), to.y - radius * angle.sin());
		ctx.set_fill_style_str(color);
		fill_triangle(ctx, arrowhead_points(from, end, DEFAULT_ARROW_SIZE).corners());

		if !edge.attrs.label.is_empty() {
			let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
			ctx.set_fill_style_str(OUTLINE);
			ctx.set_font(EDGE_LABEL_FONT);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&edge.attrs.label, mid.x, mid.y - 10.0);
		}
	}
}

fn draw_nodes(session: &EditorSession, ctx: &CanvasRenderingContext2d, view: &Viewport<'_>) {
	let radius = session.config().node_radius;
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (id, attrs) in session.graph().nodes() {
		let Some(p) = session.position(id) else {
			continue;
		};
		let p = view.map(p);
		let selected = view.highlight == Some(id);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&attrs.color);
		ctx.fill();
		ctx.set_stroke_style_str(if selected { SELECTED_OUTLINE } else { OUTLINE });
		ctx.set_line_width(if selected { 3.0 } else { 2.0 });
		ctx.stroke();

		ctx.set_fill_style_str(OUTLINE);
		let _ = ctx.fill_text(&attrs.label, p.x, p.y);
	}
}

fn fill_triangle(ctx: &CanvasRenderingContext2d, [a, b, c]: [Point; 3]) {
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.line_to(c.x, c.y);
	ctx.close_path();
	ctx.fill();
}
