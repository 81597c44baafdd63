//! Plane geometry shared by the relaxation engine and the renderer.

use std::ops::{Add, Mul, Sub};

/// Length of the arrowhead wings drawn at the end of a directed edge.
pub const DEFAULT_ARROW_SIZE: f64 = 10.0;

const WING_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// A point (or displacement) in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate, growing to the right.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Creates a point from its coordinates.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// Standard Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	(dx * dx + dy * dy).sqrt()
}

/// The three corners of a triangular arrowhead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
	/// The point the arrow points at.
	pub tip: Point,
	/// Wing swept back at -30 degrees from the reversed segment direction.
	pub left: Point,
	/// Wing swept back at +30 degrees from the reversed segment direction.
	pub right: Point,
}

impl Arrowhead {
	/// Corners in drawing order: tip, left wing, right wing.
	pub fn corners(&self) -> [Point; 3] {
		[self.tip, self.left, self.right]
	}
}

/// Arrowhead for the directed segment `from -> to`, with its tip at `to`.
pub fn arrowhead_points(from: Point, to: Point, size: f64) -> Arrowhead {
	let angle = (to.y - from.y).atan2(to.x - from.x);
	let wing = |offset: f64| {
		Point::new(
			to.x - size * (angle + offset).cos(),
			to.y - size * (angle + offset).sin(),
		)
	};
	Arrowhead {
		tip: to,
		left: wing(-WING_ANGLE),
		right: wing(WING_ANGLE),
	}
}
