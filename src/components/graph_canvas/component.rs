use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::GraphCanvasState;
use crate::layout::GraphLayout;

type CanvasRef = NodeRef<leptos::html::Canvas>;

/// Width follows the parent element; height is fixed when given.
fn canvas_size(canvas: &HtmlCanvasElement, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0),
		height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)),
	)
}

fn pointer_position(canvas_ref: CanvasRef, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas view of a [`GraphLayout`] with pan, zoom, drag and a minimap.
///
/// A click on a node reports its id through `on_node_click`. Whenever `focus`
/// names a node, the camera glides to it over `transition_ms`. Zoom in, zoom
/// out and fit buttons sit in the bottom-right corner; the wheel zooms too.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<GraphLayout>,
	#[prop(into)] focus: Signal<Option<String>>,
	on_node_click: Callback<String>,
	#[prop(default = 800)] transition_ms: u64,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref: CanvasRef = NodeRef::new();
	let state: Rc<RefCell<Option<GraphCanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas 2d context unavailable");
			return;
		};

		let (w, h) = canvas_size(&canvas, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*state_init.borrow_mut() = Some(GraphCanvasState::new(&data.get_untracked(), w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_sync = state.clone();
	Effect::new(move |_| {
		let layout = data.get();
		if let Some(ref mut s) = *state_sync.borrow_mut() {
			s.sync(&layout);
		}
	});

	let state_focus = state.clone();
	let pan_seconds = transition_ms as f64 / 1000.0;
	Effect::new(move |_| {
		let Some(id) = focus.get() else {
			return;
		};
		if let Some(ref mut s) = *state_focus.borrow_mut() {
			s.pan_to(&id, pan_seconds);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	let view_button = |state: Rc<RefCell<Option<GraphCanvasState>>>, apply: fn(&mut GraphCanvasState)| {
		move |_: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				apply(s);
			}
		}
	};
	let button_class = "w-8 h-8 flex items-center justify-center text-gray-700 hover:bg-gray-100 border-b border-gray-200 last:border-b-0";

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="absolute right-4 bottom-4 z-10 flex flex-col bg-white border border-gray-200 rounded shadow">
			<button
				class=button_class
				title="Zoom in"
				on:click=view_button(state.clone(), |s| s.zoom_step(true))
			>
				"+"
			</button>
			<button
				class=button_class
				title="Zoom out"
				on:click=view_button(state.clone(), |s| s.zoom_step(false))
			>
				"−"
			</button>
			<button
				class=button_class
				title="Fit view"
				on:click=view_button(state.clone(), GraphCanvasState::fit_view)
			>
				"⤢"
			</button>
		</div>
	}
}
