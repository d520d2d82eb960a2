//! DOM-backed collaborators: chart export and page-supplied configuration.

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement};

use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ExportRequest, Exporter};

/// Id of the optional `<script type="application/json">` holding a [`ChartConfig`].
pub const CONFIG_ELEMENT_ID: &str = "chart-config";

fn document() -> ChartResult<Document> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ChartError::MissingElement("document".into()))
}

fn js_error(err: JsValue) -> ChartError {
	ChartError::Canvas(format!("{err:?}"))
}

/// Lowercase, dash-separated file stem for a chart title.
pub fn file_stem(title: &str) -> String {
	let stem = title
		.split(|c: char| !c.is_alphanumeric())
		.filter(|part| !part.is_empty())
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("-");
	if stem.is_empty() { "chart".to_string() } else { stem }
}

/// Downloads snapshots as JSON and canvas charts as PNG.
pub struct DomExporter;

impl DomExporter {
	fn canvas_png(document: &Document, request: &ExportRequest) -> ChartResult<String> {
		let container_id = request.component.to_string();
		let container = document
			.get_element_by_id(&container_id)
			.ok_or_else(|| ChartError::MissingElement(container_id.clone()))?;
		let canvas: HtmlCanvasElement = container
			.query_selector("canvas")
			.map_err(js_error)?
			.ok_or_else(|| ChartError::MissingElement(format!("{container_id} canvas")))?
			.dyn_into()
			.map_err(|_| ChartError::Canvas("element is not a canvas".into()))?;
		canvas.to_data_url_with_type("image/png").map_err(js_error)
	}
}

impl Exporter for DomExporter {
	fn export(&self, request: &ExportRequest) -> ChartResult<()> {
		let document = document()?;
		let stem = file_stem(&request.title);
		let (href, filename) = match &request.snapshot {
			Some(json) => (
				format!(
					"data:application/json;charset=utf-8,{}",
					String::from(js_sys::encode_uri_component(json))
				),
				format!("{stem}.json"),
			),
			None => (Self::canvas_png(&document, request)?, format!("{stem}.png")),
		};

		let anchor: HtmlAnchorElement = document
			.create_element("a")
			.map_err(js_error)?
			.dyn_into()
			.map_err(|_| ChartError::Export("could not create download link".into()))?;
		anchor.set_href(&href);
		anchor.set_download(&filename);
		anchor.click();
		info!("downloaded {filename}");
		Ok(())
	}
}

fn read_config() -> ChartResult<Option<ChartConfig>> {
	let Some(element) = document()?.get_element_by_id(CONFIG_ELEMENT_ID) else {
		return Ok(None);
	};
	let text = element.text_content().unwrap_or_default();
	ChartConfig::from_json(&text).map(Some)
}

/// Configuration embedded in the page, or the defaults.
pub fn load_config() -> ChartConfig {
	match read_config() {
		Ok(Some(config)) => {
			info!("loaded chart configuration from #{CONFIG_ELEMENT_ID}");
			config
		}
		Ok(None) => ChartConfig::default(),
		Err(err) => {
			warn!("ignoring chart configuration: {err}");
			ChartConfig::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_stem_is_dash_separated() {
		assert_eq!(file_stem("Organization Structure"), "organization-structure");
		assert_eq!(file_stem("  Topic / Evolution! "), "topic-evolution");
		assert_eq!(file_stem("***"), "chart");
	}
}
