use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::model::Strength;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel (screen px) below which a press on a node counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	strengths: HashMap<(DefaultNodeIdx, DefaultNodeIdx), Strength>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			strengths: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.load(data, &HashMap::new());
		state
	}

	/// Swap in new graph data, keeping positions of people already on screen.
	pub fn reload(&mut self, data: &GraphData) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		self.graph = simulation();
		self.edges.clear();
		self.strengths.clear();
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.load(data, &positions);
		self.animation_running = true;
	}

	fn load(&mut self, data: &GraphData, positions: &HashMap<String, (f32, f32)>) {
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.map(|g| COLORS[g as usize % COLORS.len()].into())
					.unwrap_or(COLORS[0].into())
			});
			let (x, y) = positions.get(&node.id).copied().unwrap_or_else(|| {
				// Seed on a circle around the origin; the view transform centres it.
				let angle = (i as f64) * 2.0 * PI / count;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});

			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					radius: NODE_RADIUS * node.weight.clamp(0.5, 2.0),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edges.push((src, tgt));
				self.strengths.insert((src, tgt), link.strength);
			}
		}
	}

	pub fn strength(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> Strength {
		self.strengths
			.get(&(src, tgt))
			.or_else(|| self.strengths.get(&(tgt, src)))
			.copied()
			.unwrap_or(Strength::Weak)
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			let reach = HIT_RADIUS.max(node.data.user_data.radius + 2.0);
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};

	fn data() -> GraphData {
		let node = |id: &str, group| GraphNode {
			id: id.into(),
			label: Some(id.to_uppercase()),
			color: None,
			group: Some(group),
			weight: 1.0,
		};
		GraphData {
			nodes: vec![node("a", 0), node("b", 1), node("c", 1)],
			links: vec![
				GraphLink {
					source: "a".into(),
					target: "b".into(),
					strength: Strength::Strong,
					meeting_count: 12,
				},
				GraphLink {
					source: "b".into(),
					target: "missing".into(),
					strength: Strength::Weak,
					meeting_count: 1,
				},
			],
		}
	}

	fn index_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	#[test]
	fn links_to_unknown_nodes_are_skipped() {
		let state = ForceGraphState::new(&data(), 400.0, 300.0);
		assert_eq!(state.edges.len(), 1);
		let (a, b) = (index_of(&state, "a"), index_of(&state, "b"));
		assert_eq!(state.strength(b, a), Strength::Strong);
		assert_eq!(state.node_id(a).as_deref(), Some("a"));
	}

	#[test]
	fn hovering_highlights_neighbors() {
		let mut state = ForceGraphState::new(&data(), 400.0, 300.0);
		let (a, b, c) = (index_of(&state, "a"), index_of(&state, "b"), index_of(&state, "c"));
		state.set_hover(Some(a));
		assert!(state.is_highlighted(b));
		assert!(!state.is_highlighted(c));
		state.set_hover(None);
		assert!(state.is_hovered(a));
	}

	#[test]
	fn reload_keeps_positions_of_surviving_nodes() {
		let mut state = ForceGraphState::new(&data(), 400.0, 300.0);
		let a = index_of(&state, "a");
		let mut before = (0.0, 0.0);
		state.graph.visit_nodes_mut(|node| {
			if node.index() == a {
				node.data.x = 42.0;
				node.data.y = -7.0;
			}
		});
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				before = (node.x(), node.y());
			}
		});

		let mut smaller = data();
		smaller.nodes.retain(|n| n.id != "c");
		state.reload(&smaller);
		let a = index_of(&state, "a");
		let mut after = (0.0, 0.0);
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				after = (node.x(), node.y());
			}
		});
		assert_eq!(before, after);
		assert!(state.node_id(a).is_some());
	}
}
