//! Leptos component wrapping the co-authorship graph canvas.
//!
//! The component creates an HTML canvas element and wires mouse handlers for
//! hovering, dragging and selecting authors. An animation loop runs via
//! `requestAnimationFrame`, advancing the simulation and redrawing each frame.
//! Window and document listeners are held as [`Subscription`]s and released
//! when the component unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::interaction::Tooltip;
use super::render;
use super::simulation::SimulationParams;
use super::state::{GraphSession, LoadedGraph};
use super::subscription::{Subscription, SubscriptionSlot, listen};
use super::theme::Theme;
use crate::config::GraphConfig;

type SessionSlot = Rc<RefCell<Option<GraphSession>>>;

/// Everything that must be released when the canvas unmounts.
struct Teardown {
	frame: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	listeners: Rc<RefCell<Vec<Subscription>>>,
	dismiss: SubscriptionSlot,
}

impl Drop for Teardown {
	fn drop(&mut self) {
		if let (Some(window), Some(id)) = (web_sys::window(), self.frame.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.animate.borrow_mut().take();
		self.listeners.borrow_mut().clear();
		self.dismiss.disarm();
		debug!("coauthor-graph: canvas torn down");
	}
}

/// Renders the interactive co-authorship graph on a canvas element.
///
/// The canvas is mounted immediately and starts drawing once `graph` holds a
/// loaded payload. It sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Slider changes arrive through `params`; selecting an author publishes the
/// tooltip through `tooltip`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] graph: Signal<Option<Arc<LoadedGraph>>>,
	#[prop(into)] params: Signal<SimulationParams>,
	tooltip: RwSignal<Option<Tooltip>>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session: SessionSlot = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
	let dismiss = SubscriptionSlot::default();

	// Dropped, and therefore released, when the owning component is disposed.
	let _teardown = StoredValue::new_local(Teardown {
		frame: frame.clone(),
		animate: animate.clone(),
		listeners: listeners.clone(),
		dismiss: dismiss.clone(),
	});

	let (session_init, animate_init) = (session.clone(), animate.clone());
	Effect::new(move |_| {
		let (Some(canvas), Some(graph)) = (canvas_ref.get(), graph.get()) else {
			return;
		};
		if session_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("coauthor-graph: no window, canvas not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("coauthor-graph: 2d context has unexpected type");
					return;
				}
			},
			_ => {
				error!("coauthor-graph: canvas 2d context unavailable");
				return;
			}
		};

		*session_init.borrow_mut() = Some(GraphSession::new(
			graph,
			Theme::default(),
			&config,
			w,
			h,
			config.clamp_params(params.get_untracked()),
		));
		info!("coauthor-graph: canvas started at {w}x{h}");

		if fullscreen {
			let (session_resize, canvas_resize) = (session_init.clone(), canvas.clone());
			match listen(&window, "resize", false, move |_| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *session_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}) {
				Ok(sub) => listeners.borrow_mut().push(sub),
				Err(e) => warn!("coauthor-graph: resize listener not installed: {e:?}"),
			}
		}

		let step = config.frame_step;
		let (session_anim, animate_inner, frame_anim) =
			(session_init.clone(), animate_init.clone(), frame.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *session_anim.borrow_mut() {
				s.tick(step);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let session_params = session.clone();
	Effect::new(move |_| {
		let next = params.get();
		if let Some(ref mut s) = *session_params.borrow_mut() {
			if s.set_params(next) {
				debug!("coauthor-graph: parameters changed to {next:?}");
			}
		}
	});

	let session_md = session.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *session_md.borrow_mut() {
			if s.pointer_down(x, y) {
				ev.prevent_default();
			}
		}
	};

	let session_mm = session.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *session_mm.borrow_mut() {
			s.pointer_move(x, y);
			if let Some(canvas) = canvas_ref.get_untracked() {
				let style = web_sys::HtmlElement::style(&canvas);
				if let Err(e) = style.set_property("cursor", s.cursor()) {
					warn!("coauthor-graph: cursor not updated: {e:?}");
				}
			}
		}
	};

	let session_mu = session.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *session_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let session_ml = session.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *session_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let (session_ck, dismiss_ck) = (session.clone(), dismiss.clone());
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let anchor = (ev.client_x() as f64, ev.client_y() as f64);
		let selected = session_ck
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.click(x, y, anchor));
		let Some(selected) = selected else {
			return;
		};
		// Keep this click from reaching the dismiss listener installed below.
		ev.stop_propagation();
		tooltip.set(Some(selected));
		arm_dismiss(&dismiss_ck, &session_ck, tooltip);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}

/// Install the one-shot listener that closes the tooltip on the next click
/// outside it. Replacing the slot disposes any listener still armed.
fn arm_dismiss(slot: &SubscriptionSlot, session: &SessionSlot, tooltip: RwSignal<Option<Tooltip>>) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	let (slot_fire, session_fire) = (slot.clone(), session.clone());
	let subscription = listen(&document, "click", true, move |_| {
		if let Some(ref mut s) = *session_fire.borrow_mut() {
			s.dismiss_tooltip();
		}
		tooltip.set(None);
		// The listener is running; release it once the dispatch has finished.
		let slot = slot_fire.clone();
		wasm_bindgen_futures::spawn_local(async move {
			slot.disarm();
		});
	});
	match subscription {
		Ok(sub) => slot.arm(sub),
		Err(e) => warn!("coauthor-graph: tooltip dismiss listener not installed: {e:?}"),
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn window_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dimension(window.inner_width(), 800.0),
		dimension(window.inner_height(), 600.0),
	)
}
