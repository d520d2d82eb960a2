//! Native chart handles backed by a `<canvas>` element.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::registry::ChartHandle;

/// The canvas' 2D context, or `None` when the browser cannot provide one.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// Size of the canvas' parent, falling back to the given defaults.
pub fn parent_size(canvas: &HtmlCanvasElement, width: f64, height: f64) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measured = |get: fn(&web_sys::Element) -> i32, fallback: f64| {
		parent
			.as_ref()
			.map(|p| get(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		measured(web_sys::Element::client_width, width),
		measured(web_sys::Element::client_height, height),
	)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A canvas redrawn every animation frame until disposed.
pub struct AnimatedCanvas {
	frame: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl AnimatedCanvas {
	/// Start calling `draw` once per animation frame.
	pub fn start(mut draw: impl FnMut() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let frame = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (frame_inner, callback_inner) = (frame.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			draw();
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				frame_inner.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *callback.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
		Some(Self { frame, callback })
	}
}

impl ChartHandle for AnimatedCanvas {
	fn dispose(&mut self) {
		if let (Some(window), Some(id)) = (web_sys::window(), self.frame.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Dropping the closure also breaks its reference back to this cell.
		self.callback.borrow_mut().take();
		debug!("animation loop stopped");
	}
}

/// A canvas drawn once; disposing clears it.
pub struct StaticCanvas {
	canvas: HtmlCanvasElement,
}

impl StaticCanvas {
	pub fn new(canvas: HtmlCanvasElement) -> Self {
		Self { canvas }
	}
}

impl ChartHandle for StaticCanvas {
	fn dispose(&mut self) {
		if let Some(ctx) = context_2d(&self.canvas) {
			ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
		}
	}
}
