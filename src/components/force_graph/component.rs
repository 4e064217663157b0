use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::GraphViewState;
use super::types::Layout;
use crate::api::GraphResponse;
use crate::color_scheme::ColorScheme;

/// Pointer travel below this many pixels counts as a click.
const CLICK_TOLERANCE: f64 = 4.0;
/// Longest frame step fed to the simulation, in seconds.
const MAX_FRAME_DT: f64 = 0.05;

type SharedState = Rc<RefCell<Option<GraphViewState>>>;

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Applies the current styling inputs to a freshly built view.
fn apply_all(
	s: &mut GraphViewState,
	selected: Option<&str>,
	scheme: Option<&ColorScheme>,
	show_edges: bool,
	search_results: &[String],
	hovering_over: Option<&str>,
) {
	s.set_color_scheme(scheme);
	s.set_show_edges(show_edges);
	s.set_search_results(search_results);
	s.set_hovering_over(hovering_over);
	if !s.set_selection(selected) {
		s.reset_position();
	}
}

/// Canvas view of the instance graph.
///
/// Every input is a signal; changing one restyles the existing view in place.
/// Only a new `data` or `layout` value rebuilds it. Clicking a node reports its id through
/// `on_select`, clicking the background reports `None`.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<Option<Arc<GraphResponse>>>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] color_scheme: Signal<Option<ColorScheme>>,
	#[prop(into)] show_edges: Signal<bool>,
	#[prop(into)] search_results: Signal<Vec<String>>,
	#[prop(into)] hovering_over: Signal<Option<String>>,
	/// Bumping this recenters the view.
	#[prop(into)]
	reset: Signal<u32>,
	#[prop(into)] on_select: Callback<Option<String>>,
	/// Changing the layout rebuilds the view.
	#[prop(into)]
	layout: Signal<Layout>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let over_node = RwSignal::new(false);
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running = Arc::new(AtomicBool::new(true));

	// Animation loop and window resize handling
	let (state_init, animate_init, resize_init, running_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), running.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: Option<CanvasRenderingContext2d> = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok());
		let Some(ctx) = ctx else {
			error!("graph canvas has no 2d context");
			return;
		};

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_inner, running_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_init.clone(),
			running_init.clone(),
		);
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if !running_anim.load(Ordering::Relaxed) {
				if let Some(ref cb) = *resize_inner.borrow() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				debug!("graph animation stopped");
				return;
			}
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_DT);
			last = now;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt as f32);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let running_cleanup = running.clone();
	on_cleanup(move || running_cleanup.store(false, Ordering::Relaxed));

	// Rebuild whenever a new graph arrives
	let state_data = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(response) = data.get() else {
			*state_data.borrow_mut() = None;
			return;
		};
		let (w, h) = canvas_size(&canvas);
		let mut view = GraphViewState::new(&response, layout.get(), w, h);
		let (sel, hover) = (selected.get_untracked(), hovering_over.get_untracked());
		let results = search_results.get_untracked();
		apply_all(
			&mut view,
			sel.as_deref(),
			color_scheme.get_untracked().as_ref(),
			show_edges.get_untracked(),
			&results,
			hover.as_deref(),
		);
		debug!("graph view built with {} nodes", view.node_count());
		*state_data.borrow_mut() = Some(view);
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let sel = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.set_selection(sel.as_deref());
		}
	});

	let state_scheme = state.clone();
	Effect::new(move |_| {
		let scheme = color_scheme.get();
		if let Some(ref mut s) = *state_scheme.borrow_mut() {
			s.set_color_scheme(scheme.as_ref());
		}
	});

	let state_edges = state.clone();
	Effect::new(move |_| {
		let show = show_edges.get();
		if let Some(ref mut s) = *state_edges.borrow_mut() {
			s.set_show_edges(show);
		}
	});

	let state_results = state.clone();
	Effect::new(move |_| {
		search_results.with(|ids| {
			if let Some(ref mut s) = *state_results.borrow_mut() {
				s.set_search_results(ids);
			}
		});
	});

	let state_hover = state.clone();
	Effect::new(move |_| {
		let hover = hovering_over.get();
		if let Some(ref mut s) = *state_hover.borrow_mut() {
			s.set_hovering_over(hover.as_deref());
		}
	});

	let state_reset = state.clone();
	Effect::new(move |prev: Option<u32>| {
		let generation = reset.get();
		if prev.is_some_and(|p| p != generation) {
			if let Some(ref mut s) = *state_reset.borrow_mut() {
				s.reset_position();
			}
		}
		generation
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pan.start_x = x;
			s.pan.start_y = y;
			s.pan.travel = 0.0;
			let node = s
				.node_at_position(x, y)
				.filter(|_| s.layout == Layout::Force);
			if let Some(idx) = node {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				if let Some((nx, ny)) = s.node_position(idx) {
					s.drag.node_start_x = nx as f32;
					s.drag.node_start_y = ny as f32;
				}
			} else {
				s.pan.active = true;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active || s.pan.active {
				let (dx, dy) = (x - s.pan.start_x, y - s.pan.start_y);
				s.pan.travel = s.pan.travel.max((dx * dx + dy * dy).sqrt());
			}

			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				over_node.set(hovered.is_some());
				s.set_hover(hovered);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let clicked = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let pressed = s.drag.active || s.pan.active;
			let clicked = (pressed && s.pan.travel < CLICK_TOLERANCE)
				.then(|| s.node_at_position(x, y).and_then(|idx| s.node_id(idx)));
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			clicked
		};
		if let Some(id) = clicked {
			on_select.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
		over_node.set(false);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			class:over-node=move || over_node.get()
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
		/>
	}
}
