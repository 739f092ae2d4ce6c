//! UI building blocks: the graph canvas and the panels around it.

pub mod controls;
pub mod force_graph;
pub mod legend;
pub mod tooltip;
