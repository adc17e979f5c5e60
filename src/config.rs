//! Tunables for the radial layout, the canvas and the reference modal.

/// Layout and view settings for the companions graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Radius of the ring holding direct connections of the center.
	pub level1_radius: f64,
	/// Radius of the ring holding second-degree connections.
	pub level2_radius: f64,
	/// Angle added to a parent's ray when placing its level-2 child.
	pub child_offset_degrees: f64,
	/// Length of the camera pan that precedes a center change.
	pub transition_ms: u64,
	/// Person the graph is centered on at startup.
	pub default_center: String,
	/// Height of the graph canvas in CSS pixels.
	pub canvas_height: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			level1_radius: 250.0,
			level2_radius: 450.0,
			child_offset_degrees: 60.0,
			transition_ms: 800,
			default_center: "prophet".into(),
			canvas_height: 600.0,
		}
	}
}

impl GraphConfig {
	pub fn child_offset_radians(&self) -> f64 {
		self.child_offset_degrees.to_radians()
	}
}

/// Size limits of the reference document modal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalConfig {
	pub width: f64,
	pub height: f64,
	pub min_width: f64,
	pub min_height: f64,
}

impl Default for ModalConfig {
	fn default() -> Self {
		Self {
			width: 1200.0,
			height: 800.0,
			min_width: 400.0,
			min_height: 300.0,
		}
	}
}
