//! Framing of raster exports.

use super::geometry::Point;
use super::model::Positions;

/// Padding added around the outermost node centres of an exported image.
pub const EXPORT_MARGIN: f64 = 50.0;

/// Image-space frame of a raster export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportFrame {
	/// Canvas coordinate mapped to the image's top-left pixel.
	pub origin: Point,
	/// Image width in pixels.
	pub width: u32,
	/// Image height in pixels.
	pub height: u32,
}

impl ExportFrame {
	/// Frames every position with `margin` pixels of padding, or `None` when nothing is placed.
	pub fn from_positions(positions: &Positions, margin: f64) -> Option<Self> {
		let mut points = positions.values();
		let first = *points.next()?;
		let (min, max) = points.fold((first, first), |(min, max), p| {
			(
				Point::new(min.x.min(p.x), min.y.min(p.y)),
				Point::new(max.x.max(p.x), max.y.max(p.y)),
			)
		});
		let origin = Point::new(min.x - margin, min.y - margin);
		Some(Self {
			origin,
			// truncation matches whole-pixel image sizes
			width: (max.x + margin - origin.x) as u32,
			height: (max.y + margin - origin.y) as u32,
		})
	}

	/// Translates a canvas point into image coordinates.
	pub fn to_image(&self, p: Point) -> Point {
		p - self.origin
	}
}
