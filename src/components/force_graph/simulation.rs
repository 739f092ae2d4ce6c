//! Force layout controller.
//!
//! Wraps the `force_graph` physics (charge repulsion and link springs) and adds
//! the passes it lacks: an energy ("alpha") schedule, collision resolution,
//! centering on the viewport, and clamping every node inside the viewport.
//!
//! Nodes are addressed by their index in the input payload; the mapping to
//! `force_graph` handles is kept on the side.

use std::collections::HashSet;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

/// Energy applied when parameters change or the viewport resizes.
pub const REHEAT_ALPHA: f64 = 0.3;
/// Energy target held while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Fraction of an overlap resolved per tick.
const COLLIDE_STRENGTH: f64 = 0.7;
/// Radius of the initial ring layout.
const INITIAL_RING: f64 = 100.0;

/// User-tunable force coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
	/// Repulsion between every pair of nodes.
	pub charge: f64,
	/// Spring stiffness of every link.
	pub link_strength: f64,
	/// Collision radius as a multiple of the encoded node radius.
	pub collide_multiplier: f64,
}

impl Default for SimulationParams {
	fn default() -> Self {
		Self {
			charge: 150.0,
			link_strength: 0.05,
			collide_multiplier: 1.5,
		}
	}
}

/// Decaying energy scalar controlling how far nodes may still move.
#[derive(Clone, Debug, PartialEq)]
pub struct Energy {
	pub alpha: f64,
	pub target: f64,
	pub min: f64,
	pub decay: f64,
}

impl Default for Energy {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			target: 0.0,
			min: 0.001,
			// Reaches `min` from 1.0 in about 300 ticks.
			decay: 1.0 - 0.001f64.powf(1.0 / 300.0),
		}
	}
}

impl Energy {
	/// Advance one tick towards the target and return the new alpha.
	pub fn step(&mut self) -> f64 {
		self.alpha += (self.target - self.alpha) * self.decay;
		self.alpha
	}

	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < self.min
	}
}

/// Per-node data carried inside the physics graph.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Index into the input payload.
	pub index: usize,
	/// Encoded radius in pixels.
	pub radius: f64,
}

/// Owns the physics graph and every force parameter.
pub struct SimulationController {
	graph: ForceGraph<NodeInfo, ()>,
	handles: Vec<DefaultNodeIdx>,
	params: SimulationParams,
	energy: Energy,
	width: f64,
	height: f64,
	margin: f64,
}

impl SimulationController {
	/// Lay the nodes out on a ring around the viewport center and connect them.
	///
	/// `links` are payload index pairs. Self-loops and repeated pairs are left
	/// out of the physics; they only matter for degree and drawing.
	pub fn new(
		radii: &[f64],
		links: &[(usize, usize)],
		width: f64,
		height: f64,
		margin: f64,
		params: SimulationParams,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: params.charge as f32,
			force_spring: params.link_strength as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let n = radii.len();
		let ring = INITIAL_RING.min((width.min(height) / 2.0 - margin).max(0.0));
		let handles = radii
			.iter()
			.enumerate()
			.map(|(i, &radius)| {
				let angle = (i as f64) * 2.0 * PI / n as f64;
				graph.add_node(NodeData {
					x: (width / 2.0 + ring * angle.cos()) as f32,
					y: (height / 2.0 + ring * angle.sin()) as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: NodeInfo { index: i, radius },
				})
			})
			.collect::<Vec<_>>();

		let mut seen = HashSet::new();
		for &(a, b) in links {
			if a == b || a >= n || b >= n || !seen.insert((a.min(b), a.max(b))) {
				continue;
			}
			graph.add_edge(handles[a], handles[b], EdgeData::default());
		}
		debug!(
			"coauthor-graph: simulation built with {} nodes, {} springs",
			n,
			seen.len()
		);

		Self {
			graph,
			handles,
			params,
			energy: Energy::default(),
			width,
			height,
			margin,
		}
	}

	pub fn params(&self) -> SimulationParams {
		self.params
	}

	/// Apply new coefficients. Returns `false` when nothing changed.
	pub fn set_params(&mut self, params: SimulationParams) -> bool {
		if params == self.params {
			return false;
		}
		self.params = params;
		self.graph.parameters.force_charge = params.charge as f32;
		self.graph.parameters.force_spring = params.link_strength as f32;
		self.energy.reheat(REHEAT_ALPHA);
		true
	}

	pub fn energy(&self) -> &Energy {
		&self.energy
	}

	/// Target of the centering force.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	pub fn viewport(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.energy.reheat(REHEAT_ALPHA);
	}

	/// Clamp a point into the viewport, keeping the margin from every edge.
	pub fn clamp_point(&self, x: f64, y: f64) -> (f64, f64) {
		(
			clamp_to_viewport(x, self.width, self.margin),
			clamp_to_viewport(y, self.height, self.margin),
		)
	}

	/// Current position of every node, indexed like the payload.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut out = vec![(0.0, 0.0); self.handles.len()];
		self.graph.visit_nodes(|node| {
			out[node.data.user_data.index] = (node.x() as f64, node.y() as f64);
		});
		out
	}

	pub fn position(&self, index: usize) -> Option<(f64, f64)> {
		let handle = *self.handles.get(index)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == handle {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn is_pinned(&self, index: usize) -> bool {
		let Some(&handle) = self.handles.get(index) else {
			return false;
		};
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == handle {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	/// Fix a node at the given point and keep the layout warm while it is held.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		self.place(index, x, y, true);
		self.energy.target = DRAG_ALPHA_TARGET;
		if self.energy.alpha < DRAG_ALPHA_TARGET {
			self.energy.reheat(DRAG_ALPHA_TARGET);
		}
	}

	/// Move a pinned node.
	pub fn move_pinned(&mut self, index: usize, x: f64, y: f64) {
		self.place(index, x, y, true);
	}

	/// Return a node to free movement and let the layout cool down.
	pub fn release(&mut self, index: usize) {
		let Some(&handle) = self.handles.get(index) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.is_anchor = false;
			}
		});
		self.energy.target = 0.0;
	}

	fn place(&mut self, index: usize, x: f64, y: f64, anchor: bool) {
		let Some(&handle) = self.handles.get(index) else {
			return;
		};
		let (x, y) = self.clamp_point(x, y);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = anchor;
			}
		});
	}

	/// Advance the layout by one frame. Returns `false` once the layout has
	/// settled and nothing moved.
	pub fn tick(&mut self, dt: f32) -> bool {
		if self.energy.is_settled() {
			return false;
		}
		let alpha = self.energy.step();
		self.graph.update(dt * alpha as f32);
		self.resolve_collisions();
		self.recenter();
		self.clamp_all();
		true
	}

	fn resolve_collisions(&mut self) {
		let multiplier = self.params.collide_multiplier;
		if multiplier <= 0.0 {
			return;
		}

		let n = self.handles.len();
		let mut bodies = vec![(0.0, 0.0, 0.0, false); n];
		self.graph.visit_nodes(|node| {
			bodies[node.data.user_data.index] = (
				node.x() as f64,
				node.y() as f64,
				node.data.user_data.radius * multiplier,
				node.data.is_anchor,
			);
		});

		let mut shifts = vec![(0.0, 0.0); n];
		for i in 0..n {
			let (xi, yi, ri, fixed_i) = bodies[i];
			for j in (i + 1)..n {
				let (xj, yj, rj, fixed_j) = bodies[j];
				if fixed_i && fixed_j {
					continue;
				}
				let (dx, dy) = (xj - xi, yj - yi);
				let dist = (dx * dx + dy * dy).sqrt();
				let overlap = ri + rj - dist;
				if overlap <= 0.0 {
					continue;
				}
				// Coincident centers get a deterministic direction.
				let (ux, uy) = if dist > 1e-6 {
					(dx / dist, dy / dist)
				} else {
					let angle = (i * 7 + j * 13) as f64;
					(angle.cos(), angle.sin())
				};
				let (share_i, share_j) = match (fixed_i, fixed_j) {
					(true, _) => (0.0, 1.0),
					(_, true) => (1.0, 0.0),
					_ => (0.5, 0.5),
				};
				let push = overlap * COLLIDE_STRENGTH;
				shifts[i].0 -= ux * push * share_i;
				shifts[i].1 -= uy * push * share_i;
				shifts[j].0 += ux * push * share_j;
				shifts[j].1 += uy * push * share_j;
			}
		}

		self.graph.visit_nodes_mut(|node| {
			let (sx, sy) = shifts[node.data.user_data.index];
			node.data.x += sx as f32;
			node.data.y += sy as f32;
		});
	}

	fn recenter(&mut self) {
		let n = self.handles.len();
		if n == 0 {
			return;
		}
		let (mut sum_x, mut sum_y) = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			sum_x += node.x() as f64;
			sum_y += node.y() as f64;
		});
		let (cx, cy) = self.center();
		let (dx, dy) = (cx - sum_x / n as f64, cy - sum_y / n as f64);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += dx as f32;
				node.data.y += dy as f32;
			}
		});
	}

	fn clamp_all(&mut self) {
		let (width, height, margin) = (self.width, self.height, self.margin);
		self.graph.visit_nodes_mut(|node| {
			node.data.x = clamp_to_viewport(node.data.x as f64, width, margin) as f32;
			node.data.y = clamp_to_viewport(node.data.y as f64, height, margin) as f32;
		});
	}
}

/// Clamp one coordinate into `[margin, extent - margin]`.
///
/// Viewports narrower than twice the margin, and non-finite coordinates,
/// collapse to the middle of the axis.
pub fn clamp_to_viewport(value: f64, extent: f64, margin: f64) -> f64 {
	if extent <= 2.0 * margin || !value.is_finite() {
		return extent / 2.0;
	}
	value.clamp(margin, extent - margin)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn controller(n: usize, links: &[(usize, usize)]) -> SimulationController {
		SimulationController::new(
			&vec![5.0; n],
			links,
			400.0,
			300.0,
			6.0,
			SimulationParams::default(),
		)
	}

	#[test]
	fn energy_decays_towards_target() {
		let mut energy = Energy::default();
		let first = energy.step();
		assert!(first < 1.0);
		for _ in 0..400 {
			energy.step();
		}
		assert!(energy.is_settled());

		energy.target = DRAG_ALPHA_TARGET;
		energy.reheat(0.5);
		for _ in 0..2000 {
			energy.step();
		}
		assert!((energy.alpha - DRAG_ALPHA_TARGET).abs() < 1e-3);
	}

	#[test]
	fn parameter_change_reheats() {
		let mut sim = controller(3, &[(0, 1)]);
		for _ in 0..500 {
			sim.tick(0.016);
		}
		assert!(sim.energy().is_settled());
		assert!(!sim.tick(0.016));

		let params = SimulationParams {
			charge: 300.0,
			..sim.params()
		};
		assert!(sim.set_params(params));
		assert_eq!(sim.energy().alpha, REHEAT_ALPHA);
		assert!(!sim.set_params(params));
		assert!(sim.tick(0.016));
	}

	#[test]
	fn resize_moves_center_exactly() {
		let mut sim = controller(2, &[]);
		sim.resize(1024.0, 768.0);
		assert_eq!(sim.center(), (512.0, 384.0));
		assert_eq!(sim.energy().alpha, REHEAT_ALPHA);
	}

	#[test]
	fn pinned_node_is_clamped_to_viewport() {
		let mut sim = controller(2, &[(0, 1)]);
		sim.pin(0, -50.0, 10_000.0);
		assert!(sim.is_pinned(0));
		assert_eq!(sim.position(0), Some((6.0, 294.0)));

		sim.move_pinned(0, 5_000.0, -3.0);
		assert_eq!(sim.position(0), Some((394.0, 6.0)));
		assert_eq!(sim.energy().target, DRAG_ALPHA_TARGET);

		sim.release(0);
		assert!(!sim.is_pinned(0));
		assert_eq!(sim.energy().target, 0.0);
	}

	#[test]
	fn ticks_keep_nodes_inside_viewport() {
		let mut sim = controller(30, &[(0, 1), (1, 2), (2, 0)]);
		for _ in 0..200 {
			sim.tick(0.016);
			for (x, y) in sim.positions() {
				assert!((6.0..=394.0).contains(&x), "x out of bounds: {x}");
				assert!((6.0..=294.0).contains(&y), "y out of bounds: {y}");
			}
		}
	}

	#[test]
	fn collision_pushes_overlapping_nodes_apart() {
		let mut sim = controller(2, &[]);
		sim.place(0, 200.0, 150.0, false);
		sim.place(1, 202.0, 150.0, false);
		sim.resolve_collisions();

		let (a, b) = (sim.position(0).unwrap(), sim.position(1).unwrap());
		assert!(b.0 - a.0 > 2.0);
		// Equal shares keep the pair centered.
		assert!(((a.0 + b.0) / 2.0 - 201.0).abs() < 1e-3);
	}

	#[test]
	fn collision_never_moves_pinned_node() {
		let mut sim = controller(2, &[]);
		sim.pin(0, 200.0, 150.0);
		sim.place(1, 200.0, 150.0, false);
		sim.resolve_collisions();
		assert_eq!(sim.position(0), Some((200.0, 150.0)));
		assert_ne!(sim.position(1), Some((200.0, 150.0)));
	}

	#[test]
	fn clamp_handles_tiny_viewports() {
		assert_eq!(clamp_to_viewport(3.0, 10.0, 6.0), 5.0);
		assert_eq!(clamp_to_viewport(f64::NAN, 100.0, 6.0), 50.0);
		assert_eq!(clamp_to_viewport(50.0, 100.0, 6.0), 50.0);
	}
}
