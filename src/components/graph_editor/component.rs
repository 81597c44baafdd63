use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::graph::{EditorConfig, EditorSession, Point};

use super::panels::{bulk_dialog, properties_panel, toolbar};
use super::render;
use super::state::EditorState;
use super::types::{PanelSignals, Prompt};

pub type EditorHandle = Rc<RefCell<EditorState>>;

/// Modal `window.prompt`.
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
	fn ask(&self, message: &str, default: &str) -> Option<String> {
		web_sys::window()?
			.prompt_with_message_and_default(message, default)
			.ok()
			.flatten()
	}
}

/// Shows `message` in a blocking browser alert.
pub fn alert(message: &str) {
	log::warn!("{message}");
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

fn window_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_size(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let (fallback_w, fallback_h) = EditorConfig::default().fallback_canvas;
	if fullscreen {
		return window_size().unwrap_or((fallback_w, fallback_h));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(fallback_w)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(fallback_h)
		}),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Weighted graph editor: toolbar, drawing canvas, properties panel and bulk input dialog.
///
/// With `fullscreen` the canvas takes the window size; otherwise `width` and `height` win over
/// the size of the canvas' parent.
#[component]
pub fn GraphEditor(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = EditorConfig::default();
	let (w, h) = config.fallback_canvas;
	let seed = js_sys::Date::now() as u64;
	let state: EditorHandle = Rc::new(RefCell::new(EditorState::new(EditorSession::new(
		config, w, h, seed,
	))));
	let signals = PanelSignals::new();
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

		let (w, h) = canvas_size(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().session.set_canvas_size(w, h);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				log::error!("2d canvas context unavailable");
				return;
			}
		};

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().session.set_canvas_size(nw, nh);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			render::render(&state_anim.borrow().session, &ctx);
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(at) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.press(at, &BrowserPrompt);
		signals.sync(&s);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = pointer(canvas_ref, &ev) {
			state_mm.borrow_mut().drag_to(at);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().release();

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().release();

	view! {
		<div class="graph-editor">
			{toolbar(state.clone(), signals)}
			<div class="graph-editor-body">
				<div class="graph-editor-canvas">
					<canvas
						node_ref=canvas_ref
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						style="display: block; cursor: crosshair;"
					/>
				</div>
				{properties_panel(state.clone(), signals)}
			</div>
			{bulk_dialog(state, signals)}
		</div>
	}
}

/// Runs `f` on the editor state and refreshes the panels afterwards.
pub fn with_state(handle: &EditorHandle, signals: PanelSignals, f: impl FnOnce(&mut EditorState)) {
	let mut state = handle.borrow_mut();
	f(&mut state);
	signals.sync(&state);
}
