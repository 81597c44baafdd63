//! Pixels-per-weight-unit calibration.
//!
//! The first positive edge weight seen by a graph is drawn [`REFERENCE_PIXELS`] long and every
//! later target length is derived from it, so the layout depends on which edge came first.

use log::info;

/// On-screen length given to the calibrating edge.
pub const REFERENCE_PIXELS: f64 = 150.0;

/// Scale applied after an import in which no positive weight was found.
pub const FALLBACK_PIXELS_PER_UNIT: f64 = 100.0;

/// Conversion ratio between abstract edge weight and canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scale {
	pixels_per_unit: Option<f64>,
}

impl Scale {
	/// A scale that has not been calibrated yet.
	pub const fn unset() -> Self {
		Self {
			pixels_per_unit: None,
		}
	}

	/// A scale fixed at `pixels_per_unit`.
	pub const fn fixed(pixels_per_unit: f64) -> Self {
		Self {
			pixels_per_unit: Some(pixels_per_unit),
		}
	}

	/// Current pixels per weight unit, if calibrated.
	pub fn pixels_per_unit(&self) -> Option<f64> {
		self.pixels_per_unit
	}

	/// Whether a calibration has happened.
	pub fn is_set(&self) -> bool {
		self.pixels_per_unit.is_some()
	}

	/// Calibrates from `weight` unless already calibrated or `weight` is not positive.
	///
	/// Returns `true` when this call set the scale.
	pub fn set_if_unset(&mut self, weight: f64) -> bool {
		if self.pixels_per_unit.is_some() || weight.is_nan() || weight <= 0.0 {
			return false;
		}
		let ppu = REFERENCE_PIXELS / weight;
		self.pixels_per_unit = Some(ppu);
		info!("Scale initialized: {ppu} px/unit based on weight {weight}");
		true
	}

	/// Applies [`FALLBACK_PIXELS_PER_UNIT`] when nothing calibrated the scale.
	pub fn fall_back_if_unset(&mut self) {
		if self.pixels_per_unit.is_none() {
			info!("No positive weight found, using {FALLBACK_PIXELS_PER_UNIT} px/unit");
			self.pixels_per_unit = Some(FALLBACK_PIXELS_PER_UNIT);
		}
	}

	/// Forgets the calibration.
	pub fn reset(&mut self) {
		self.pixels_per_unit = None;
	}

	/// Pixel distance an edge of `weight` should span.
	pub fn target_distance(&self, weight: f64) -> Option<f64> {
		self.pixels_per_unit.map(|ppu| weight * ppu)
	}
}
