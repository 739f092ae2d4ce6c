//! Visual theming for the co-authorship graph.
//!
//! Provides the color type, the categorical country palette and the style
//! knobs the renderer reads each frame.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Ordered categorical palette for the highlighted countries.
#[derive(Clone, Debug)]
pub struct CountryPalette {
	pub colors: Vec<Color>,
	/// Shared color for every country outside the palette.
	pub fallback: Color,
}

impl CountryPalette {
	/// The ten-color "category10" palette.
	pub fn category10() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Gray
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
			fallback: Color::rgb(187, 187, 187),
		}
	}

	/// Palette color for the `rank`-th highlighted country.
	pub fn get(&self, rank: usize) -> Option<Color> {
		self.colors.get(rank).copied()
	}
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Color,
	/// Stroke width for a link of weight 1.
	pub base_width: f64,
	/// Opacity multiplier applied to dimmed links at full dim.
	pub dimmed_alpha: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	pub border_color: Color,
	/// Opacity of dimmed nodes at full dim.
	pub dimmed_alpha: f64,
	/// Ring drawn around the hovered node.
	pub hover_ring: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub palette: CountryPalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(250, 250, 250),
			link: LinkStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				base_width: 1.0,
				dimmed_alpha: 0.1,
			},
			node: NodeStyle {
				border_width: 1.5,
				border_color: Color::rgb(255, 255, 255),
				dimmed_alpha: 0.15,
				hover_ring: Color::rgba(40, 40, 40, 0.8),
			},
			palette: CountryPalette::category10(),
		}
	}
}
