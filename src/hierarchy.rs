//! Builds the reporting forest from flat manager references.
//!
//! Construction is pure: the organization chart component walks the result
//! afterwards. Each id is emitted at most once; a second encounter (duplicate
//! records) becomes a childless `revisit` leaf, and nodes that cannot be
//! reached from a root (unknown manager, manager cycles) are reported in
//! [`Forest::detached`] instead of being grafted anywhere.

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::Serialize;

use crate::model::PersonNode;

/// A person and their direct reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HierarchyNode {
	pub person: PersonNode,
	pub children: Vec<HierarchyNode>,
	/// Set when this id was already emitted elsewhere in the forest.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub revisit: bool,
}

impl HierarchyNode {
	pub fn id(&self) -> &str {
		&self.person.id
	}

	/// Whether the node gets a disclosure toggle.
	pub fn is_expandable(&self) -> bool {
		!self.children.is_empty()
	}

	/// Depth-first walk over this node and its descendants.
	pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a HierarchyNode)) {
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			visit(node);
			stack.extend(node.children.iter().rev());
		}
	}
}

// Reporting chains can be arbitrarily deep; unlink children without recursing.
impl Drop for HierarchyNode {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(mut node) = pending.pop() {
			pending.append(&mut node.children);
		}
	}
}

/// Rooted forest plus the ids left outside it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Forest {
	pub roots: Vec<HierarchyNode>,
	pub detached: Vec<String>,
}

impl Forest {
	/// Depth-first walk over every node of every root.
	pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a HierarchyNode)) {
		for root in &self.roots {
			root.walk(&mut visit);
		}
	}

	/// Ids of nodes that carry a disclosure toggle.
	pub fn expandable_ids(&self) -> Vec<String> {
		let mut ids = Vec::new();
		self.walk(|node| {
			if node.is_expandable() {
				ids.push(node.id().to_string());
			}
		});
		ids
	}

	pub fn len(&self) -> usize {
		let mut n = 0;
		self.walk(|_| n += 1);
		n
	}

	pub fn is_empty(&self) -> bool {
		self.roots.is_empty()
	}
}

/// Build the forest for `nodes`, keeping input order among siblings.
pub fn build_forest(nodes: &[PersonNode]) -> Forest {
	let mut reports: HashMap<&str, Vec<usize>> = HashMap::new();
	let mut roots = Vec::new();
	for (idx, node) in nodes.iter().enumerate() {
		match node.manager() {
			Some(manager) => reports.entry(manager).or_default().push(idx),
			None => roots.push(idx),
		}
	}

	let mut visited = HashSet::new();
	let roots: Vec<HierarchyNode> = roots
		.into_iter()
		.map(|idx| grow(nodes, idx, &reports, &mut visited))
		.collect();

	let mut listed = HashSet::new();
	let mut detached = Vec::new();
	for node in nodes {
		let id = node.id.as_str();
		if !visited.contains(id) && listed.insert(id) {
			detached.push(node.id.clone());
		}
	}
	if !detached.is_empty() {
		warn!(
			"{} people are not reachable from any root and were left out of the hierarchy: {:?}",
			detached.len(),
			detached
		);
	}

	Forest { roots, detached }
}

/// A node whose reports are still being grown.
struct Frame<'a, 'r> {
	person: &'a PersonNode,
	pending: std::slice::Iter<'r, usize>,
	children: Vec<HierarchyNode>,
}

impl Frame<'_, '_> {
	fn finish(self) -> HierarchyNode {
		HierarchyNode {
			person: self.person.clone(),
			children: self.children,
			revisit: false,
		}
	}
}

fn revisit_leaf(person: &PersonNode) -> HierarchyNode {
	HierarchyNode {
		person: person.clone(),
		children: Vec::new(),
		revisit: true,
	}
}

/// Open a frame for `idx`, or `None` when its id was already emitted.
fn enter<'a, 'r>(
	nodes: &'a [PersonNode],
	idx: usize,
	reports: &'r HashMap<&str, Vec<usize>>,
	visited: &mut HashSet<&'a str>,
) -> Option<Frame<'a, 'r>> {
	let person = &nodes[idx];
	if !visited.insert(person.id.as_str()) {
		return None;
	}
	Some(Frame {
		person,
		pending: reports
			.get(person.id.as_str())
			.map(|idxs| idxs.iter())
			.unwrap_or_default(),
		children: Vec::new(),
	})
}

/// Grow the subtree under `root` depth-first on an explicit stack.
fn grow<'a>(
	nodes: &'a [PersonNode],
	root: usize,
	reports: &HashMap<&str, Vec<usize>>,
	visited: &mut HashSet<&'a str>,
) -> HierarchyNode {
	let Some(mut frame) = enter(nodes, root, reports, visited) else {
		return revisit_leaf(&nodes[root]);
	};
	let mut ancestors = Vec::new();
	loop {
		if let Some(&child) = frame.pending.next() {
			match enter(nodes, child, reports, visited) {
				Some(next) => ancestors.push(std::mem::replace(&mut frame, next)),
				None => frame.children.push(revisit_leaf(&nodes[child])),
			}
			continue;
		}
		let done = frame.finish();
		match ancestors.pop() {
			Some(parent) => {
				frame = parent;
				frame.children.push(done);
			}
			None => return done,
		}
	}
}
