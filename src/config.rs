//! Runtime configuration for the visualization.

use web_sys::Window;

use crate::components::force_graph::SimulationParams;

/// Bounds and step of one slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
	pub min: f64,
	pub max: f64,
	pub step: f64,
}

impl SliderRange {
	pub fn clamp(&self, value: f64) -> f64 {
		value.clamp(self.min, self.max)
	}
}

/// All tunables of the page in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// URL fetched when no inline `graph-data` element is present.
	pub data_url: String,
	/// Number of countries that receive a palette color.
	pub top_countries: usize,
	/// Node radius range in pixels.
	pub radius_range: (f64, f64),
	/// Minimum distance kept between nodes and the viewport edges.
	pub viewport_margin: f64,
	/// Fixed simulation step per animation frame, in seconds.
	pub frame_step: f32,
	pub initial_params: SimulationParams,
	pub charge_range: SliderRange,
	pub link_strength_range: SliderRange,
	pub collide_range: SliderRange,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_url: "coauthors.json".to_string(),
			top_countries: 10,
			radius_range: (3.0, 12.0),
			viewport_margin: 6.0,
			frame_step: 0.016,
			initial_params: SimulationParams::default(),
			charge_range: SliderRange {
				min: 0.0,
				max: 600.0,
				step: 10.0,
			},
			link_strength_range: SliderRange {
				min: 0.0,
				max: 0.3,
				step: 0.005,
			},
			collide_range: SliderRange {
				min: 0.5,
				max: 3.0,
				step: 0.1,
			},
		}
	}
}

impl GraphConfig {
	/// Defaults, with the data URL taken from `<body data-graph-src="...">`
	/// when the page sets it.
	pub fn from_window(window: &Window) -> Self {
		let mut config = Self::default();
		if let Some(src) = window
			.document()
			.and_then(|d| d.body())
			.and_then(|b| b.get_attribute("data-graph-src"))
			.filter(|s| !s.trim().is_empty())
		{
			config.data_url = src;
		}
		config
	}

	/// Clamp every parameter into its slider range.
	pub fn clamp_params(&self, params: SimulationParams) -> SimulationParams {
		SimulationParams {
			charge: self.charge_range.clamp(params.charge),
			link_strength: self.link_strength_range.clamp(params.link_strength),
			collide_multiplier: self.collide_range.clamp(params.collide_multiplier),
		}
	}
}
