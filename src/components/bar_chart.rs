//! Canvas bar chart used for the timeline, department and topic views.

use leptos::html::Canvas;
use leptos::prelude::*;
use log::debug;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::components::canvas::{StaticCanvas, context_2d};
use crate::components::session::SessionHandle;
use crate::registry::ChartHandle;
use crate::selector::VisualizationKind;
use crate::series::Bar;

const PADDING: f64 = 28.0;
const LABEL_BAND: f64 = 36.0;
const GAP_RATIO: f64 = 0.2;

/// Pixel rectangle of one bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

/// Lay `bars` out in a `width` x `height` plot, tallest bar filling the plot.
pub fn layout(bars: &[Bar], width: f64, height: f64) -> Vec<BarRect> {
	if bars.is_empty() {
		return Vec::new();
	}
	let plot_w = (width - 2.0 * PADDING).max(1.0);
	let plot_h = (height - PADDING - LABEL_BAND).max(1.0);
	let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
	let slot = plot_w / bars.len() as f64;
	let bar_w = slot * (1.0 - GAP_RATIO);
	let baseline = PADDING + plot_h;

	bars.iter()
		.enumerate()
		.map(|(i, bar)| {
			let h = if max > 0.0 { plot_h * bar.value.max(0.0) / max } else { 0.0 };
			BarRect {
				x: PADDING + slot * i as f64 + (slot - bar_w) / 2.0,
				y: baseline - h,
				width: bar_w,
				height: h,
			}
		})
		.collect()
}

fn fill_color(kind: VisualizationKind) -> &'static str {
	match kind {
		VisualizationKind::Timeline => "#1f77b4",
		VisualizationKind::Departments => "#2ca02c",
		VisualizationKind::Topics => "#9467bd",
		VisualizationKind::Organization | VisualizationKind::Collaboration => "#7f7f7f",
	}
}

fn draw(ctx: &CanvasRenderingContext2d, kind: VisualizationKind, bars: &[Bar], width: f64, height: f64) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.set_font("11px sans-serif");

	if bars.is_empty() {
		ctx.set_fill_style_str("#7f7f7f");
		let _ = ctx.fill_text("No data", width / 2.0 - 20.0, height / 2.0);
		return;
	}

	let baseline = height - LABEL_BAND;
	ctx.set_stroke_style_str("#cccccc");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(PADDING, baseline);
	ctx.line_to(width - PADDING, baseline);
	ctx.stroke();

	for (bar, rect) in bars.iter().zip(layout(bars, width, height)) {
		ctx.set_fill_style_str(fill_color(kind));
		ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

		ctx.set_fill_style_str("#333333");
		let _ = ctx.fill_text(&format!("{}", bar.value), rect.x, rect.y - 4.0);
		let label: String = bar.label.chars().take(12).collect();
		let _ = ctx.fill_text(&label, rect.x, baseline + 14.0);
	}
}

/// Bar chart drawn once on a canvas after it is mounted.
#[component]
pub fn BarChart(
	kind: VisualizationKind,
	bars: Vec<Bar>,
	#[prop(default = 640.0)] width: f64,
	#[prop(default = 260.0)] height: f64,
) -> impl IntoView {
	let session = SessionHandle::expect();
	let chart = session.reserve(kind);
	let canvas_ref = NodeRef::<Canvas>::new();

	on_cleanup(move || {
		if let Some(chart) = chart {
			session.destroy(chart);
		}
	});

	Effect::new(move |_| {
		let Some(chart) = chart else {
			return;
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if !session.is_live(chart) || session.is_attached(chart) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			debug!("no 2d context for {chart}, {} chart not drawn", kind.key());
			return;
		};
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		draw(&ctx, kind, &bars, width, height);
		session.attach(chart, move || Some(Box::new(StaticCanvas::new(canvas)) as Box<dyn ChartHandle>));
	});

	view! { <canvas node_ref=canvas_ref class="bar-chart-canvas" style="display: block;" /> }
}
