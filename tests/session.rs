//! End-to-end behavior of a mounted graph session, without a browser.

#![allow(unused_crate_dependencies)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use coauthor_graph::GraphConfig;
use coauthor_graph::components::force_graph::subscription::{Subscription, SubscriptionSlot};
use coauthor_graph::components::force_graph::{GraphData, GraphSession, LoadedGraph, SimulationParams, Theme};

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;

fn session(json: &str) -> GraphSession {
	let data: GraphData = serde_json::from_str(json).unwrap();
	let config = GraphConfig::default();
	let graph = Arc::new(LoadedGraph::new(data, &config, &Theme::default()));
	GraphSession::new(
		graph,
		Theme::default(),
		&config,
		WIDTH,
		HEIGHT,
		SimulationParams::default(),
	)
}

fn triangle() -> GraphSession {
	session(
		r#"{
			"nodes": [
				{"id": "ada", "name": "Ada Lovelace", "affiliation": "Analytical Society", "country": "United Kingdom"},
				{"id": "carl", "name": "Carl Gauss", "country": "Germany"},
				{"id": "emmy", "name": "Emmy Noether", "affiliation": "Göttingen", "country": "Germany"}
			],
			"links": [
				{"source": "ada", "target": "carl", "weight": 4},
				{"source": "carl", "target": "emmy"},
				{"source": "emmy", "target": "ada"},
				{"source": "emmy", "target": "ghost"}
			]
		}"#,
	)
}

#[test]
fn clicking_a_node_opens_its_tooltip() {
	let mut s = triangle();
	let (x, y) = s.sim.position(1).unwrap();

	let tooltip = s.click(x, y, (100.0, 50.0)).expect("node under pointer");
	assert_eq!(tooltip.node, 1);
	assert_eq!(tooltip.title, "Carl Gauss");
	assert_eq!(tooltip.field("Country"), Some("Germany"));
	assert_eq!(tooltip.field("Affiliation"), None);
	assert_eq!(tooltip.field("Degree"), Some("2"));
	assert_eq!(s.tooltip.as_ref(), Some(&tooltip));

	s.dismiss_tooltip();
	assert!(s.tooltip.is_none());
}

#[test]
fn selecting_another_node_keeps_one_dismiss_listener() {
	let mut s = triangle();
	let slot = SubscriptionSlot::default();
	let disposed = Rc::new(Cell::new(0));
	let select = |s: &mut GraphSession, idx: usize| {
		let (x, y) = s.sim.position(idx).unwrap();
		let tooltip = s.click(x, y, (x, y)).expect("node under pointer");
		let counter = disposed.clone();
		slot.arm(Subscription::new(move || counter.set(counter.get() + 1)));
		tooltip
	};

	assert_eq!(select(&mut s, 0).node, 0);
	assert!(slot.is_armed());
	assert_eq!(disposed.get(), 0);

	assert_eq!(select(&mut s, 2).node, 2);
	assert!(slot.is_armed());
	assert_eq!(disposed.get(), 1);
	assert_eq!(s.tooltip.as_ref().map(|t| t.node), Some(2));

	// The outside click closes the tooltip and releases the listener.
	s.dismiss_tooltip();
	slot.disarm();
	assert!(s.tooltip.is_none());
	assert!(!slot.is_armed());
	assert_eq!(disposed.get(), 2);
}

#[test]
fn cursor_follows_pointer_state() {
	let mut s = triangle();
	assert_eq!(s.cursor(), "default");

	let (x, y) = s.sim.position(1).unwrap();
	s.pointer_move(x, y);
	assert_eq!(s.cursor(), "pointer");

	assert!(s.pointer_down(x, y));
	assert_eq!(s.cursor(), "grabbing");

	s.pointer_up();
	s.pointer_move(-500.0, -500.0);
	assert_eq!(s.cursor(), "default");
}

#[test]
fn clicking_background_selects_nothing() {
	let mut s = triangle();
	assert!(s.click(-500.0, -500.0, (0.0, 0.0)).is_none());
	assert!(s.tooltip.is_none());
}

#[test]
fn drag_is_clamped_and_suppresses_click() {
	let mut s = triangle();
	let (x, y) = s.sim.position(0).unwrap();

	assert!(s.pointer_down(x, y));
	assert!(s.sim.is_pinned(0));
	s.pointer_move(x + 5_000.0, y + 5_000.0);
	assert_eq!(s.sim.position(0), Some((WIDTH - 6.0, HEIGHT - 6.0)));

	s.pointer_up();
	assert!(!s.sim.is_pinned(0));
	let (nx, ny) = s.sim.position(0).unwrap();
	assert!(s.click(nx, ny, (0.0, 0.0)).is_none());
	// The next click is a plain click again.
	assert!(s.click(nx, ny, (0.0, 0.0)).is_some());
}

#[test]
fn hover_lights_the_whole_country() {
	let mut s = triangle();
	let (x, y) = s.sim.position(2).unwrap();
	s.pointer_move(x, y);

	assert_eq!(s.highlight.hovered(), Some(2));
	assert!(!s.highlight.is_node_dimmed(1));
	assert!(!s.highlight.is_node_dimmed(2));
	assert!(s.highlight.is_node_dimmed(0));
	assert!(!s.highlight.is_link_dimmed(1, 2));
	assert!(s.highlight.is_link_dimmed(0, 1));

	s.pointer_leave();
	assert!(!s.highlight.is_active());
	assert!(!s.highlight.is_node_dimmed(0));
}

#[test]
fn resize_recenters_and_reheats() {
	let mut s = triangle();
	for _ in 0..600 {
		s.tick(0.016);
	}
	assert!(s.sim.energy().is_settled());

	s.resize(800.0, 500.0);
	assert_eq!(s.viewport(), (800.0, 500.0));
	assert_eq!(s.sim.center(), (400.0, 250.0));
	assert!(!s.sim.energy().is_settled());
}

#[test]
fn layout_stays_inside_viewport() {
	let mut s = triangle();
	s.set_params(SimulationParams {
		charge: 600.0,
		..SimulationParams::default()
	});
	for _ in 0..300 {
		s.tick(0.016);
		for (x, y) in s.sim.positions() {
			assert!((6.0..=WIDTH - 6.0).contains(&x), "x = {x}");
			assert!((6.0..=HEIGHT - 6.0).contains(&y), "y = {y}");
		}
	}
}

#[test]
fn links_skip_unknown_authors_and_scale_with_weight() {
	let s = triangle();
	assert_eq!(s.links.len(), 3);
	assert_eq!((s.links[0].source, s.links[0].target), (0, 1));
	assert_eq!(s.graph.stats.link_endpoints[3], None);
	assert_eq!(s.links[0].width, 2.0);
	assert_eq!(s.links[1].width, 1.0);
}

#[test]
fn single_country_shares_one_color() {
	let s = session(
		r#"{"nodes":[
			{"id":"a","country":"Kenya"},
			{"id":"b","country":"Kenya"},
			{"id":"c","country":"Kenya"}
		],"links":[{"source":"a","target":"b"}]}"#,
	);
	assert!(s.nodes.iter().all(|n| n.color == s.nodes[0].color));
	assert_eq!(s.graph.colors.ranked().len(), 1);
}

#[test]
fn graph_without_links_uses_midpoint_radius() {
	let s = session(r#"{"nodes":[{"id":"a"},{"id":"b"}],"links":[]}"#);
	let mid = s.graph.radius.midpoint();
	assert!(s.nodes.iter().all(|n| n.radius == mid));
	assert_eq!(mid, 7.5);
}

#[test]
fn empty_graph_is_inert() {
	let mut s = session(r#"{"nodes":[],"links":[]}"#);
	assert!(s.graph.is_empty());
	assert!(s.node_at_position(200.0, 150.0).is_none());
	assert!(!s.pointer_down(200.0, 150.0));
	s.tick(0.016);
}
