//! Free-standing canvas shapes.

use super::geometry::Point;

/// Radius of a circle annotation.
pub const CIRCLE_RADIUS: f64 = 15.0;
/// Length of an arrow annotation.
pub const ARROW_LENGTH: f64 = 30.0;

/// A free-standing shape drawn on the canvas, outside the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
	/// Text centred on a point.
	Text {
		/// Centre of the text.
		at: Point,
		/// Text to draw.
		text: String,
	},
	/// Outlined circle.
	Circle {
		/// Centre of the circle.
		center: Point,
		/// Circle radius.
		radius: f64,
	},
	/// Line with an arrowhead at `to`.
	Arrow {
		/// Tail of the arrow.
		from: Point,
		/// Tip of the arrow.
		to: Point,
	},
}

impl Annotation {
	/// Text annotation at `at`.
	pub fn text(at: Point, text: impl Into<String>) -> Self {
		Annotation::Text {
			at,
			text: text.into(),
		}
	}

	/// Circle of [`CIRCLE_RADIUS`] around `center`.
	pub fn circle(center: Point) -> Self {
		Annotation::Circle {
			center,
			radius: CIRCLE_RADIUS,
		}
	}

	/// Right-pointing arrow of [`ARROW_LENGTH`] starting at `from`.
	pub fn arrow(from: Point) -> Self {
		Annotation::Arrow {
			from,
			to: Point::new(from.x + ARROW_LENGTH, from.y),
		}
	}
}
