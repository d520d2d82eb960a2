//! Graph data for the collaboration network chart.
//!
//! Relationships come from the result set when it has any. Otherwise they are
//! inferred from meeting co-attendance, which is what the composite fallback
//! relies on when it pairs a timeline with a network.

use std::collections::{BTreeMap, HashMap};

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::config::StrengthThresholds;
use crate::model::{Meeting, PersonNode, Relationship, Strength};

/// Display filter of one network component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkFilter {
	/// Only people in this department.
	pub department: Option<String>,
	/// Only links at or above this tier.
	pub min_strength: Option<Strength>,
}

impl NetworkFilter {
	pub fn is_active(&self) -> bool {
		self.department.is_some() || self.min_strength.is_some()
	}
}

/// Resolves attendee and relationship references (id or name) to people.
struct Roster<'a> {
	people: &'a [PersonNode],
	by_key: HashMap<&'a str, usize>,
}

impl<'a> Roster<'a> {
	fn new(people: &'a [PersonNode]) -> Self {
		let mut by_key = HashMap::new();
		for (idx, person) in people.iter().enumerate() {
			by_key.entry(person.id.as_str()).or_insert(idx);
		}
		for (idx, person) in people.iter().enumerate() {
			if let Some(name) = person.name.as_deref() {
				by_key.entry(name).or_insert(idx);
			}
		}
		Self { people, by_key }
	}

	fn resolve(&self, key: &str) -> Option<&'a PersonNode> {
		self.by_key.get(key.trim()).map(|&idx| &self.people[idx])
	}
}

/// Pairwise relationships implied by shared meetings.
pub fn infer_relationships(
	people: &[PersonNode],
	meetings: &[Meeting],
	thresholds: &StrengthThresholds,
) -> Vec<Relationship> {
	let roster = Roster::new(people);
	let mut pairs: BTreeMap<(String, String), u32> = BTreeMap::new();

	for meeting in meetings {
		let mut present: Vec<&str> = Vec::new();
		for attendee in &meeting.attendees {
			if let Some(person) = roster.resolve(attendee) {
				if !present.contains(&person.id.as_str()) {
					present.push(person.id.as_str());
				}
			}
		}
		for (i, a) in present.iter().enumerate() {
			for b in &present[i + 1..] {
				let key = if a <= b {
					(a.to_string(), b.to_string())
				} else {
					(b.to_string(), a.to_string())
				};
				*pairs.entry(key).or_default() += 1;
			}
		}
	}

	pairs
		.into_iter()
		.map(|((person1, person2), meeting_count)| Relationship {
			person1,
			person2,
			meeting_count,
			strength: Some(Strength::from_meeting_count(meeting_count, thresholds)),
		})
		.collect()
}

/// Distinct departments in first-seen order, for the filter control.
pub fn departments(people: &[PersonNode]) -> Vec<String> {
	let mut out: Vec<String> = Vec::new();
	for dept in people.iter().filter_map(|p| p.department.as_deref()) {
		if !out.iter().any(|d| d == dept) {
			out.push(dept.to_string());
		}
	}
	out
}

/// Graph nodes and links after applying `filter`.
pub fn build_network(
	people: &[PersonNode],
	relationships: &[Relationship],
	meetings: &[Meeting],
	filter: &NetworkFilter,
	thresholds: &StrengthThresholds,
) -> GraphData {
	let inferred;
	let relationships = if relationships.is_empty() {
		inferred = infer_relationships(people, meetings, thresholds);
		&inferred[..]
	} else {
		relationships
	};

	let roster = Roster::new(people);
	let groups = departments(people);
	let max_meetings = people.iter().map(|p| p.meeting_count).max().unwrap_or(0);

	let keep = |person: &PersonNode| match &filter.department {
		Some(dept) => person.department.as_deref() == Some(dept.as_str()),
		None => true,
	};

	let mut nodes: Vec<GraphNode> = Vec::new();
	let push_node = |nodes: &mut Vec<GraphNode>, node: GraphNode| {
		if !nodes.iter().any(|n| n.id == node.id) {
			nodes.push(node);
		}
	};

	for person in people.iter().filter(|&p| keep(p)) {
		let weight = if max_meetings == 0 {
			1.0
		} else {
			0.75 + 0.75 * f64::from(person.meeting_count) / f64::from(max_meetings)
		};
		push_node(
			&mut nodes,
			GraphNode {
				id: person.id.clone(),
				label: Some(person.display_name().to_string()),
				color: None,
				group: person
					.department
					.as_deref()
					.and_then(|d| groups.iter().position(|g| g == d))
					.map(|g| g as u32),
				weight,
			},
		);
	}

	let mut links = Vec::new();
	for rel in relationships {
		let tier = rel.tier(thresholds);
		if filter.min_strength.is_some_and(|min| tier < min) {
			continue;
		}
		let mut endpoints = [rel.person1.as_str(), rel.person2.as_str()].map(|key| {
			match roster.resolve(key) {
				Some(person) if keep(person) => Some(person.id.clone()),
				Some(_) => None,
				// Unknown endpoints only show up in the unfiltered view.
				None if filter.department.is_none() => Some(key.trim().to_string()),
				None => None,
			}
		});
		let (Some(source), Some(target)) = (endpoints[0].take(), endpoints[1].take()) else {
			continue;
		};
		if source == target {
			continue;
		}
		for id in [&source, &target] {
			if roster.resolve(id).is_none() {
				push_node(
					&mut nodes,
					GraphNode {
						id: id.clone(),
						label: Some(id.clone()),
						color: None,
						group: None,
						weight: 0.75,
					},
				);
			}
		}
		links.push(GraphLink {
			source,
			target,
			strength: tier,
			meeting_count: rel.meeting_count,
		});
	}

	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn person(id: &str, name: &str, dept: &str, meetings: u32) -> PersonNode {
		PersonNode {
			id: id.into(),
			name: Some(name.into()),
			department: Some(dept.into()),
			meeting_count: meetings,
			..Default::default()
		}
	}

	fn rel(a: &str, b: &str, count: u32, strength: Strength) -> Relationship {
		Relationship {
			person1: a.into(),
			person2: b.into(),
			meeting_count: count,
			strength: Some(strength),
		}
	}

	fn people() -> Vec<PersonNode> {
		vec![
			person("1", "Ana", "Eng", 10),
			person("2", "Ben", "Eng", 5),
			person("3", "Cy", "Sales", 0),
		]
	}

	#[test]
	fn explicit_relationships_become_links() {
		let rels = vec![
			rel("1", "2", 12, Strength::Strong),
			rel("Ben", "Cy", 2, Strength::Weak),
		];
		let graph = build_network(&people(), &rels, &[], &NetworkFilter::default(), &Default::default());
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.links.len(), 2);
		assert_eq!(graph.links[1].source, "2");
		assert_eq!(graph.links[1].target, "3");
		assert_eq!(graph.nodes[0].group, Some(0));
		assert_eq!(graph.nodes[2].group, Some(1));
		assert!(graph.nodes[0].weight > graph.nodes[2].weight);
	}

	#[test]
	fn department_filter_drops_other_people_and_their_links() {
		let rels = vec![
			rel("1", "2", 12, Strength::Strong),
			rel("2", "3", 2, Strength::Weak),
			rel("2", "ghost", 2, Strength::Weak),
		];
		let filter = NetworkFilter {
			department: Some("Eng".into()),
			min_strength: None,
		};
		let graph = build_network(&people(), &rels, &[], &filter, &Default::default());
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["1", "2"]);
		assert_eq!(graph.links.len(), 1);
	}

	#[test]
	fn strength_filter_keeps_tiers_at_or_above_minimum() {
		let rels = vec![
			rel("1", "2", 12, Strength::Strong),
			rel("1", "3", 6, Strength::Medium),
			rel("2", "3", 1, Strength::Weak),
		];
		let filter = NetworkFilter {
			department: None,
			min_strength: Some(Strength::Medium),
		};
		let graph = build_network(&people(), &rels, &[], &filter, &Default::default());
		let tiers: Vec<_> = graph.links.iter().map(|l| l.strength).collect();
		assert_eq!(tiers, vec![Strength::Strong, Strength::Medium]);
		assert_eq!(graph.nodes.len(), 3);
	}

	#[test]
	fn unknown_endpoints_are_added_in_unfiltered_view() {
		let rels = vec![rel("1", "ghost", 3, Strength::Weak)];
		let graph = build_network(&people(), &rels, &[], &NetworkFilter::default(), &Default::default());
		assert_eq!(graph.nodes.len(), 4);
		assert_eq!(graph.nodes[3].label.as_deref(), Some("ghost"));
	}

	#[test]
	fn co_attendance_is_inferred_when_relationships_are_absent() {
		let meeting = |attendees: &[&str]| Meeting {
			attendees: attendees.iter().map(|a| a.to_string()).collect(),
			..Default::default()
		};
		let meetings = vec![
			meeting(&["1", "Ben"]),
			meeting(&["Ana", "2", "2"]),
			meeting(&["3", "1", "stranger"]),
		];
		let rels = infer_relationships(&people(), &meetings, &Default::default());
		assert_eq!(rels.len(), 2);
		assert_eq!((rels[0].person1.as_str(), rels[0].person2.as_str()), ("1", "2"));
		assert_eq!(rels[0].meeting_count, 2);
		assert_eq!(rels[0].strength, Some(Strength::Weak));
		assert_eq!((rels[1].person1.as_str(), rels[1].person2.as_str()), ("1", "3"));

		let graph = build_network(&people(), &[], &meetings, &NetworkFilter::default(), &Default::default());
		assert_eq!(graph.links.len(), 2);
	}

	#[test]
	fn departments_are_distinct_in_first_seen_order() {
		assert_eq!(departments(&people()), vec!["Eng".to_string(), "Sales".to_string()]);
	}
}
