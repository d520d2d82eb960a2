use crate::model::Strength;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub color: Option<String>,
	pub group: Option<u32>,
	/// Radius multiplier, 1.0 for an average participant.
	pub weight: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub strength: Strength,
	pub meeting_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
