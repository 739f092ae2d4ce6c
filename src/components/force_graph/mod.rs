//! Force-directed co-authorship graph.
//!
//! Renders authors and their collaborations on an HTML canvas with:
//! - Degree-scaled node sizes and country colors
//! - Physics-based layout with adjustable charge, link strength and collision
//! - Same-country highlighting on hover, tooltips on click, drag-to-pin
//!
//! # Example
//!
//! ```ignore
//! use coauthor_graph::components::force_graph::{ForceGraphCanvas, GraphData, LoadedGraph};
//!
//! let loaded = Arc::new(LoadedGraph::new(data, &config, &Theme::default()));
//! let graph = Signal::derive(move || Some(loaded.clone()));
//! let params = RwSignal::new(SimulationParams::default());
//! let tooltip = RwSignal::new(None);
//!
//! view! { <ForceGraphCanvas graph=graph params=params tooltip=tooltip fullscreen=true /> }
//! ```

mod component;
pub mod interaction;
mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod stats;
pub mod subscription;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use interaction::Tooltip;
pub use simulation::SimulationParams;
pub use state::{GraphSession, LoadedGraph};
pub use theme::Theme;
pub use types::{AuthorNode, CoauthorLink, GraphData, UNKNOWN_COUNTRY};
