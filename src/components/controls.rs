//! Slider panel for the simulation parameters.

use leptos::prelude::*;

use crate::components::force_graph::SimulationParams;
use crate::config::{GraphConfig, SliderRange};

/// Decimal places needed to show values on a slider with the given step.
fn step_decimals(step: f64) -> usize {
	if step >= 1.0 || step <= 0.0 || !step.is_finite() {
		0
	} else {
		(-step.log10() - 1e-9).ceil() as usize
	}
}

/// Slider value as shown next to the input.
pub fn format_value(value: f64, range: SliderRange) -> String {
	format!("{:.*}", step_decimals(range.step), value)
}

/// Three range inputs driving charge, collision spacing and link strength.
///
/// Every change writes the clamped value back into `params`; the canvas picks
/// it up and reheats the layout.
#[component]
pub fn ForceControls(
	params: RwSignal<SimulationParams>,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	view! {
		<div class="force-controls">
			<ParamSlider
				id="charge"
				label="Repulsion"
				range=config.charge_range
				value=Signal::derive(move || params.get().charge)
				on_input=move |v| params.update(|p| p.charge = v)
			/>
			<ParamSlider
				id="collide"
				label="Spacing"
				range=config.collide_range
				value=Signal::derive(move || params.get().collide_multiplier)
				on_input=move |v| params.update(|p| p.collide_multiplier = v)
			/>
			<ParamSlider
				id="link-strength"
				label="Link strength"
				range=config.link_strength_range
				value=Signal::derive(move || params.get().link_strength)
				on_input=move |v| params.update(|p| p.link_strength = v)
			/>
		</div>
	}
}

#[component]
fn ParamSlider(
	id: &'static str,
	label: &'static str,
	range: SliderRange,
	value: Signal<f64>,
	#[prop(into)] on_input: Callback<f64>,
) -> impl IntoView {
	view! {
		<label class="slider">
			<span class="slider-label">{label}</span>
			<input
				id=format!("slider-{id}")
				type="range"
				min=range.min.to_string()
				max=range.max.to_string()
				step=range.step.to_string()
				prop:value=move || value.get().to_string()
				on:input=move |ev| {
					if let Ok(v) = event_target_value(&ev).parse::<f64>() {
						on_input.run(range.clamp(v));
					}
				}
			/>
			<span class="slider-value">{move || format_value(value.get(), range)}</span>
		</label>
	}
}
