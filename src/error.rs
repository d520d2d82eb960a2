//! Error type shared by the fallible helpers of the crate.
//!
//! Rendering never surfaces these to the user; callers at the component
//! boundary log them and carry on with the degraded view.

use thiserror::Error;

/// Errors produced while loading configuration, exporting or touching the DOM.
#[derive(Error, Debug)]
pub enum ChartError {
	/// The configuration document could not be parsed.
	#[error("config error: {0}")]
	Config(#[from] serde_json::Error),
	/// The export collaborator could not produce a download.
	#[error("export error: {0}")]
	Export(String),
	/// An element the renderer expected in the document is absent.
	#[error("missing element: {0}")]
	MissingElement(String),
	/// The browser refused a canvas operation.
	#[error("canvas error: {0}")]
	Canvas(String),
}

/// Convenience alias used across the crate.
pub type ChartResult<T> = Result<T, ChartError>;
