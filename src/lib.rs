//! coauthor-graph: Interactive force-directed visualization of co-authorship networks.
//!
//! This crate provides a WASM-based page that loads authors and their
//! collaborations, lays them out with a physics simulation and lets the user
//! explore them by hovering, dragging and clicking nodes.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod config;
pub mod loader;

pub use components::force_graph::{ForceGraphCanvas, GraphData, LoadedGraph, SimulationParams};
pub use config::GraphConfig;
pub use loader::{LoadError, load_graph_data};

use components::controls::ForceControls;
use components::force_graph::{Theme, Tooltip};
use components::legend::CountryLegend;
use components::tooltip::AuthorTooltip;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("coauthor-graph: logging initialized");
}

/// Where the page is in loading its payload.
#[derive(Clone, Debug)]
pub enum LoadState {
	Loading,
	Ready(Arc<LoadedGraph>),
	Failed(String),
}

impl LoadState {
	pub fn graph(&self) -> Option<Arc<LoadedGraph>> {
		match self {
			Self::Ready(graph) => Some(graph.clone()),
			_ => None,
		}
	}

	/// Text for the status line under the title.
	pub fn status_text(&self) -> String {
		match self {
			Self::Loading => "Loading co-authorship data...".to_string(),
			Self::Failed(reason) => format!("Failed to load graph data: {reason}"),
			Self::Ready(graph) if graph.is_empty() => "No authors in data".to_string(),
			Self::Ready(graph) => format!(
				"{} authors, {} collaborations, {} countries. Hover to highlight a country, drag to pin, click for details.",
				graph.data.nodes.len(),
				graph.data.links.len(),
				graph.stats.countries.len()
			),
		}
	}
}

/// Main application component.
/// Loads the payload and renders the graph with its controls and legend.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = web_sys::window()
		.map(|w| GraphConfig::from_window(&w))
		.unwrap_or_default();
	let state = RwSignal::new(LoadState::Loading);
	let params = RwSignal::new(config.clamp_params(config.initial_params));
	let tooltip = RwSignal::new(None::<Tooltip>);

	let load_config = config.clone();
	wasm_bindgen_futures::spawn_local(async move {
		let next = match load_graph_data(&load_config).await {
			Ok(data) => {
				let graph = LoadedGraph::new(data, &load_config, &Theme::default());
				LoadState::Ready(Arc::new(graph))
			}
			Err(e) => {
				error!("coauthor-graph: {e}");
				LoadState::Failed(e.to_string())
			}
		};
		state.set(next);
	});

	let graph = Signal::derive(move || state.with(LoadState::graph));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Co-authorship Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				graph=graph
				params=params
				tooltip=tooltip
				config=config.clone()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Co-authorship Network"</h1>
				<p
					class="subtitle"
					class=("load-error", move || state.with(|s| matches!(s, LoadState::Failed(_))))
				>
					{move || state.with(LoadState::status_text)}
				</p>
				<ForceControls params=params config=config />
			</div>
			{move || graph.get().map(|graph| view! { <CountryLegend graph=graph /> })}
			<AuthorTooltip tooltip=tooltip />
		</div>
	}
}
