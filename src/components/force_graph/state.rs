//! Session state for one loaded graph.
//!
//! [`LoadedGraph`] bundles the raw payload with everything derived from it
//! once (statistics and scales) and is shared read-only with the legend.
//! [`GraphSession`] is created when the canvas mounts and owns all mutable
//! state: the layout, hover highlighting, the drag in progress and the open
//! tooltip. Every DOM handler borrows it, mutates it and returns.

use std::sync::Arc;

use super::interaction::{DragState, HighlightState, Tooltip};
use super::scale::{CountryColors, RadiusScale};
use super::simulation::{SimulationController, SimulationParams};
use super::stats::GraphStats;
use super::theme::{Color, Theme};
use super::types::GraphData;
use crate::config::GraphConfig;

/// Extra pixels around a node that still count as a hit.
const HIT_PADDING: f64 = 2.0;

/// The payload plus everything derived from it at load time.
#[derive(Clone, Debug)]
pub struct LoadedGraph {
	pub data: GraphData,
	pub stats: GraphStats,
	pub radius: RadiusScale,
	pub colors: CountryColors,
}

impl LoadedGraph {
	pub fn new(data: GraphData, config: &GraphConfig, theme: &Theme) -> Self {
		let stats = GraphStats::derive(&data, config.top_countries);
		let radius = RadiusScale::from_stats(&stats, config.radius_range);
		let colors = CountryColors::from_stats(&stats, &theme.palette);
		Self {
			data,
			stats,
			radius,
			colors,
		}
	}

	pub fn node_radius(&self, index: usize) -> f64 {
		self.radius.apply(self.stats.degree(index) as f64)
	}

	pub fn node_color(&self, index: usize) -> Color {
		self.data
			.nodes
			.get(index)
			.map_or(self.colors.fallback(), |n| self.colors.color(n.country_key()))
	}

	pub fn is_empty(&self) -> bool {
		self.data.nodes.is_empty()
	}
}

/// Per-node values the renderer reads every frame.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub radius: f64,
	pub color: Color,
	pub country: String,
}

/// A drawable link between two payload indices.
#[derive(Clone, Debug)]
pub struct LinkVisual {
	pub source: usize,
	pub target: usize,
	/// Stroke width derived from the link weight.
	pub width: f64,
}

/// All mutable state of the mounted graph.
pub struct GraphSession {
	pub graph: Arc<LoadedGraph>,
	pub theme: Theme,
	pub nodes: Vec<NodeVisual>,
	pub links: Vec<LinkVisual>,
	pub sim: SimulationController,
	pub highlight: HighlightState,
	pub drag: DragState,
	pub tooltip: Option<Tooltip>,
	suppress_click: bool,
}

impl GraphSession {
	pub fn new(
		graph: Arc<LoadedGraph>,
		theme: Theme,
		config: &GraphConfig,
		width: f64,
		height: f64,
		params: SimulationParams,
	) -> Self {
		let nodes: Vec<NodeVisual> = graph
			.data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| NodeVisual {
				radius: graph.node_radius(i),
				color: graph.node_color(i),
				country: node.country_key().to_string(),
			})
			.collect();

		let links: Vec<LinkVisual> = graph
			.data
			.links
			.iter()
			.zip(&graph.stats.link_endpoints)
			.filter_map(|(l, endpoints)| {
				let (source, target) = (*endpoints)?;
				Some(LinkVisual {
					source,
					target,
					width: theme.link.base_width * l.weight().sqrt(),
				})
			})
			.collect();
		let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.source, l.target)).collect();

		let radii: Vec<f64> = nodes.iter().map(|n| n.radius).collect();
		let sim = SimulationController::new(
			&radii,
			&pairs,
			width,
			height,
			config.viewport_margin,
			params,
		);

		Self {
			graph,
			theme,
			nodes,
			links,
			sim,
			highlight: HighlightState::default(),
			drag: DragState::default(),
			tooltip: None,
			suppress_click: false,
		}
	}

	/// Topmost node under the given canvas point.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (i, (nx, ny)) in self.sim.positions().into_iter().enumerate() {
			let (dx, dy) = (nx - x, ny - y);
			if (dx * dx + dy * dy).sqrt() <= self.nodes[i].radius + HIT_PADDING {
				// Later nodes are drawn on top.
				found = Some(i);
			}
		}
		found
	}

	/// CSS cursor matching the current pointer state.
	pub fn cursor(&self) -> &'static str {
		if self.drag.is_active() {
			"grabbing"
		} else if self.highlight.is_active() {
			"pointer"
		} else {
			"default"
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		let countries: Vec<&str> = self.nodes.iter().map(|n| n.country.as_str()).collect();
		self.highlight.set_hover(node, &countries);
	}

	/// Press on the canvas. Returns `true` when a node was grabbed.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.node_at_position(x, y) else {
			return false;
		};
		let Some(origin) = self.sim.position(idx) else {
			return false;
		};
		self.drag.begin(idx, (x, y), origin);
		self.sim.pin(idx, origin.0, origin.1);
		true
	}

	/// Pointer moved: drag the held node, otherwise update hover.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		match self.drag.node {
			Some(idx) => {
				let (nx, ny) = self.drag.update(x, y);
				self.sim.move_pinned(idx, nx, ny);
			}
			None => {
				let hovered = self.node_at_position(x, y);
				self.set_hover(hovered);
			}
		}
	}

	/// Release the held node back to the simulation.
	pub fn pointer_up(&mut self) {
		self.suppress_click = self.drag.is_active() && self.drag.moved;
		if let Some(idx) = self.drag.end() {
			self.sim.release(idx);
		}
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.suppress_click = false;
		self.set_hover(None);
	}

	/// Click at canvas point `(x, y)`, with `anchor` the viewport position used
	/// to place the tooltip. Returns the tooltip when a node was selected.
	/// Clicks that end a drag select nothing.
	pub fn click(&mut self, x: f64, y: f64, anchor: (f64, f64)) -> Option<Tooltip> {
		if std::mem::take(&mut self.suppress_click) {
			return None;
		}
		let idx = self.node_at_position(x, y)?;
		Some(self.select(idx, anchor))
	}

	pub fn select(&mut self, idx: usize, anchor: (f64, f64)) -> Tooltip {
		let node = &self.graph.data.nodes[idx];
		let tooltip = Tooltip::new(
			idx,
			node.display_name(),
			node.affiliation(),
			node.country(),
			self.graph.stats.degree(idx),
			anchor,
		);
		self.tooltip = Some(tooltip.clone());
		tooltip
	}

	pub fn dismiss_tooltip(&mut self) {
		self.tooltip = None;
	}

	pub fn set_params(&mut self, params: SimulationParams) -> bool {
		self.sim.set_params(params)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.sim.resize(width, height);
	}

	pub fn viewport(&self) -> (f64, f64) {
		self.sim.viewport()
	}

	pub fn tick(&mut self, dt: f32) {
		self.sim.tick(dt);
		self.highlight.tick(dt as f64);
	}
}
