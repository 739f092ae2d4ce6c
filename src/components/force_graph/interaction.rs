//! Pointer interaction state: country highlighting, drag tracking and
//! tooltip selection.
//!
//! Everything here is plain data keyed by payload index so it can be driven
//! without a browser. The canvas component translates DOM events into calls
//! on [`GraphSession`](super::state::GraphSession), which forwards here.

use std::collections::HashSet;

/// Pointer travel (px) beyond which a press counts as a drag, not a click.
pub const CLICK_SLOP: f64 = 3.0;

/// Offset of the tooltip from the click position.
const TOOLTIP_OFFSET: (f64, f64) = (12.0, 12.0);

/// Same-country highlighting on hover.
///
/// The dimmed/not-dimmed decision is exact and changes immediately. The
/// visual dim level eases towards it so highlight changes do not flash.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<usize>,
	/// Nodes sharing the hovered node's country.
	same_country: HashSet<usize>,
	/// Smoothed dim amount, 0 = nothing dimmed, 1 = fully dimmed.
	dim_level: f64,
}

impl HighlightState {
	/// Update the hovered node. `countries` is the country key of every node.
	pub fn set_hover<S: AsRef<str>>(&mut self, node: Option<usize>, countries: &[S]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.same_country.clear();

		let Some(country) = node.and_then(|idx| countries.get(idx)) else {
			return;
		};
		let country = country.as_ref();
		self.same_country.extend(
			countries
				.iter()
				.enumerate()
				.filter(|(_, c)| c.as_ref() == country)
				.map(|(i, _)| i),
		);
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	pub fn is_active(&self) -> bool {
		self.hovered.is_some()
	}

	/// A node is dimmed while another country is hovered.
	pub fn is_node_dimmed(&self, idx: usize) -> bool {
		self.is_active() && !self.same_country.contains(&idx)
	}

	/// A link stays lit only when both ends are in the hovered country.
	pub fn is_link_dimmed(&self, source: usize, target: usize) -> bool {
		self.is_active()
			&& !(self.same_country.contains(&source) && self.same_country.contains(&target))
	}

	pub fn dim_level(&self) -> f64 {
		self.dim_level
	}

	/// Ease the dim level using exponential smoothing:
	/// value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 10.0;
		const FADE_OUT_SPEED: f64 = 6.0;

		let (target, speed) = if self.is_active() {
			(1.0, FADE_IN_SPEED)
		} else {
			(0.0, FADE_OUT_SPEED)
		};
		self.dim_level += (target - self.dim_level) * (1.0 - (-speed * dt).exp());
		if (target - self.dim_level).abs() < 0.005 {
			self.dim_level = target;
		}
	}
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	/// Node position when the press started.
	pub node_start_x: f64,
	pub node_start_y: f64,
	/// Set once the pointer travelled further than [`CLICK_SLOP`].
	pub moved: bool,
}

impl DragState {
	pub fn begin(&mut self, node: usize, (x, y): (f64, f64), (node_x, node_y): (f64, f64)) {
		*self = Self {
			node: Some(node),
			start_x: x,
			start_y: y,
			node_start_x: node_x,
			node_start_y: node_y,
			moved: false,
		};
	}

	/// Record pointer movement and return where the held node should go.
	pub fn update(&mut self, x: f64, y: f64) -> (f64, f64) {
		let (dx, dy) = (x - self.start_x, y - self.start_y);
		if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
			self.moved = true;
		}
		(self.node_start_x + dx, self.node_start_y + dy)
	}

	/// Finish the drag, returning the node that was held.
	pub fn end(&mut self) -> Option<usize> {
		self.node.take()
	}

	pub fn is_active(&self) -> bool {
		self.node.is_some()
	}
}

/// One labelled row of the tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipField {
	pub label: &'static str,
	pub value: String,
}

/// Details shown for a selected author.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub node: usize,
	/// Viewport position of the tooltip's top-left corner.
	pub x: f64,
	pub y: f64,
	pub title: String,
	pub fields: Vec<TooltipField>,
}

impl Tooltip {
	/// Build the tooltip for an author clicked at `(x, y)`. Affiliation and
	/// country rows are omitted when absent; degree is always present.
	pub fn new(
		node: usize,
		title: &str,
		affiliation: Option<&str>,
		country: Option<&str>,
		degree: usize,
		(x, y): (f64, f64),
	) -> Self {
		let mut fields = Vec::with_capacity(3);
		if let Some(affiliation) = affiliation {
			fields.push(TooltipField {
				label: "Affiliation",
				value: affiliation.to_string(),
			});
		}
		if let Some(country) = country {
			fields.push(TooltipField {
				label: "Country",
				value: country.to_string(),
			});
		}
		fields.push(TooltipField {
			label: "Degree",
			value: degree.to_string(),
		});

		Self {
			node,
			x: x + TOOLTIP_OFFSET.0,
			y: y + TOOLTIP_OFFSET.1,
			title: title.to_string(),
			fields,
		}
	}

	pub fn field(&self, label: &str) -> Option<&str> {
		self.fields
			.iter()
			.find(|f| f.label == label)
			.map(|f| f.value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const COUNTRIES: [&str; 4] = ["Peru", "Chile", "Peru", "Unknown"];

	#[test]
	fn hover_dims_other_countries() {
		let mut highlight = HighlightState::default();
		assert!(!highlight.is_node_dimmed(1));

		highlight.set_hover(Some(0), &COUNTRIES);
		assert!(!highlight.is_node_dimmed(0));
		assert!(!highlight.is_node_dimmed(2));
		assert!(highlight.is_node_dimmed(1));
		assert!(highlight.is_node_dimmed(3));

		assert!(!highlight.is_link_dimmed(0, 2));
		assert!(highlight.is_link_dimmed(0, 1));
		assert!(highlight.is_link_dimmed(1, 3));

		highlight.set_hover(None, &COUNTRIES);
		assert!(!highlight.is_node_dimmed(1));
		assert!(!highlight.is_link_dimmed(1, 3));
	}

	#[test]
	fn dim_level_eases_in_and_out() {
		let mut highlight = HighlightState::default();
		highlight.set_hover(Some(1), &COUNTRIES);
		highlight.tick(0.016);
		let partial = highlight.dim_level();
		assert!(partial > 0.0 && partial < 1.0);
		for _ in 0..120 {
			highlight.tick(0.016);
		}
		assert_eq!(highlight.dim_level(), 1.0);

		highlight.set_hover(None, &COUNTRIES);
		for _ in 0..120 {
			highlight.tick(0.016);
		}
		assert_eq!(highlight.dim_level(), 0.0);
	}

	#[test]
	fn short_press_is_not_a_drag() {
		let mut drag = DragState::default();
		drag.begin(4, (10.0, 10.0), (50.0, 60.0));
		assert_eq!(drag.update(11.0, 12.0), (51.0, 62.0));
		assert!(!drag.moved);
		drag.update(30.0, 10.0);
		assert!(drag.moved);
		assert_eq!(drag.end(), Some(4));
		assert!(!drag.is_active());
	}

	#[test]
	fn tooltip_omits_absent_fields() {
		let tip = Tooltip::new(2, "Ada", None, Some("UK"), 5, (100.0, 40.0));
		assert_eq!(tip.title, "Ada");
		assert_eq!(tip.field("Affiliation"), None);
		assert_eq!(tip.field("Country"), Some("UK"));
		assert_eq!(tip.field("Degree"), Some("5"));
		assert_eq!((tip.x, tip.y), (112.0, 52.0));
	}
}
