//! Leptos components realizing each visualization kind.

pub mod bar_chart;
pub mod canvas;
pub mod force_graph;
pub mod network;
pub mod org_chart;
pub mod session;
pub mod visualization;

pub use session::SessionHandle;
pub use visualization::Visualizations;
