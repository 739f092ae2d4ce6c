//! Country legend listing the highlighted countries.

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::force_graph::LoadedGraph;
use crate::components::force_graph::theme::Color;

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub country: String,
	pub count: usize,
	pub color: Color,
}

/// Legend rows in rank order, plus the number of countries sharing the
/// fallback color.
pub fn legend_entries(graph: &LoadedGraph) -> (Vec<LegendEntry>, usize) {
	let entries: Vec<LegendEntry> = graph
		.colors
		.ranked()
		.iter()
		.map(|(country, color)| LegendEntry {
			country: country.clone(),
			count: graph.stats.country_count(country),
			color: *color,
		})
		.collect();
	let others = graph.stats.countries.len().saturating_sub(entries.len());
	(entries, others)
}

#[component]
pub fn CountryLegend(graph: Arc<LoadedGraph>) -> impl IntoView {
	let (entries, others) = legend_entries(&graph);
	let fallback = graph.colors.fallback().to_css();

	let rows = entries
		.into_iter()
		.map(|entry| {
			view! {
				<li class="legend-row">
					<span class="legend-swatch" style=format!("background: {};", entry.color.to_css())></span>
					<span class="legend-label">{entry.country}</span>
					<span class="legend-count">{entry.count}</span>
				</li>
			}
		})
		.collect_view();

	view! {
		<aside class="legend">
			<h2>"Top countries"</h2>
			<ul>{rows}</ul>
			{(others > 0).then(|| {
				view! {
					<p class="legend-other">
						<span class="legend-swatch" style=format!("background: {fallback};")></span>
						{format!("{others} other countries")}
					</p>
				}
			})}
		</aside>
	}
}
