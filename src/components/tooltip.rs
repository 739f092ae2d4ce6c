//! Floating details card for the selected author.

use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::components::force_graph::Tooltip;

/// Shows the selected author's details next to the pointer.
///
/// Clicks inside the card are kept from reaching the document so that they
/// do not close it.
#[component]
pub fn AuthorTooltip(tooltip: RwSignal<Option<Tooltip>>) -> impl IntoView {
	move || {
		tooltip.get().map(|tip| {
			let rows = tip
				.fields
				.into_iter()
				.map(|field| {
					view! {
						<div class="tooltip-row">
							<span class="tooltip-label">{field.label}": "</span>
							<span class="tooltip-value">{field.value}</span>
						</div>
					}
				})
				.collect_view();
			view! {
				<div
					class="author-tooltip"
					style=format!("position: fixed; left: {}px; top: {}px;", tip.x, tip.y)
					on:click=|ev: MouseEvent| ev.stop_propagation()
				>
					<strong class="tooltip-title">{tip.title}</strong>
					{rows}
				</div>
			}
		})
	}
}
