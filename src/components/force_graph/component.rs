use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::debug;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{CLICK_SLOP, ForceGraphState};
use super::types::GraphData;
use crate::components::canvas::{AnimatedCanvas, context_2d, parent_size};
use crate::components::session::SessionHandle;
use crate::registry::ChartHandle;
use crate::selector::VisualizationKind;

const DEFAULT_WIDTH: f64 = 640.0;
const DEFAULT_HEIGHT: f64 = 420.0;

fn pointer(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed collaboration graph drawn on a canvas.
///
/// The canvas chart is reserved in the session registry when the component is
/// created and attached by an effect once the `<canvas>` is in the document;
/// unmounting destroys it, which stops the animation loop.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let session = SessionHandle::expect();
	let chart = session.reserve(VisualizationKind::Collaboration);
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));

	on_cleanup(move || {
		if let Some(chart) = chart {
			session.destroy(chart);
		}
	});

	let state_init = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		let Some(chart) = chart else {
			return;
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		// Destroyed before this deferred render got to run.
		if !session.is_live(chart) {
			return;
		}
		if session.is_attached(chart) {
			if let Some(ref mut s) = *state_init.borrow_mut() {
				s.reload(&graph);
			}
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			debug!("no 2d context for {chart}, collaboration graph not drawn");
			return;
		};
		let (w, h) = match (width, height) {
			(Some(w), Some(h)) => (w, h),
			_ => parent_size(&canvas, DEFAULT_WIDTH, DEFAULT_HEIGHT),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h));

		let state_anim = state_init.clone();
		session.attach(chart, move || {
			AnimatedCanvas::start(move || {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					if s.animation_running {
						s.tick(0.016);
					}
					render::render(s, &ctx);
				}
			})
			.map(|handle| Box::new(handle) as Box<dyn ChartHandle>)
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
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
			// Update hover state when not dragging
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (sx, sy) = (x - s.drag.start_x, y - s.drag.start_y);
					if !s.drag.moved && (sx * sx + sy * sy).sqrt() < CLICK_SLOP {
						return;
					}
					s.drag.moved = true;
					let (dx, dy) = (sx / s.transform.k, sy / s.transform.k);
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
	let on_mouseup = move |_: MouseEvent| {
		let mut clicked = None;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					if s.drag.moved {
						s.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.is_anchor = true;
							}
						});
					} else {
						clicked = s.node_id(idx);
					}
				}
			}
			s.drag.active = false;
			s.drag.moved = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		if let (Some(id), Some(cb)) = (clicked, on_node_click) {
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.moved = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
