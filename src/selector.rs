//! Decides which charts to draw for an (intent, result set) pair.
//!
//! Mapped intents produce at most one chart when their backing field has
//! data. Everything else goes through a composite fallback that checks, in
//! priority order, whether there is enough data for a timeline, a
//! collaboration network and an organization chart.

use crate::config::SelectorConfig;
use crate::intent::Intent;
use crate::model::{DepartmentStat, Meeting, PersonNode, Relationship, ResultSet, TimelineEntry, TopicTrend};

/// Chart families the rendering layer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
	Organization,
	Collaboration,
	Timeline,
	Departments,
	Topics,
}

impl VisualizationKind {
	pub fn key(self) -> &'static str {
		match self {
			Self::Organization => "organization",
			Self::Collaboration => "collaboration",
			Self::Timeline => "timeline",
			Self::Departments => "departments",
			Self::Topics => "topics",
		}
	}

	/// Heading shown above the chart.
	pub fn title(self) -> &'static str {
		match self {
			Self::Organization => "Organization Structure",
			Self::Collaboration => "Collaboration Network",
			Self::Timeline => "Meeting Timeline",
			Self::Departments => "Department Statistics",
			Self::Topics => "Topic Evolution",
		}
	}
}

/// Slice of the result set a chart is drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DescriptorData<'a> {
	People(&'a [PersonNode]),
	Network {
		people: &'a [PersonNode],
		relationships: &'a [Relationship],
		meetings: &'a [Meeting],
	},
	Timeline {
		meetings: &'a [Meeting],
		timeline: &'a [TimelineEntry],
	},
	Departments(&'a [DepartmentStat]),
	Topics(&'a [TopicTrend]),
}

/// One chart to render: its kind, heading and data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizationDescriptor<'a> {
	pub kind: VisualizationKind,
	pub title: &'static str,
	pub data: DescriptorData<'a>,
}

impl<'a> VisualizationDescriptor<'a> {
	fn new(kind: VisualizationKind, result: &'a ResultSet) -> Self {
		let data = match kind {
			VisualizationKind::Organization => DescriptorData::People(&result.people),
			VisualizationKind::Collaboration => DescriptorData::Network {
				people: &result.people,
				relationships: &result.relationships,
				meetings: &result.meetings,
			},
			VisualizationKind::Timeline => DescriptorData::Timeline {
				meetings: &result.meetings,
				timeline: &result.timeline,
			},
			VisualizationKind::Departments => DescriptorData::Departments(&result.departments),
			VisualizationKind::Topics => DescriptorData::Topics(&result.topics),
		};
		Self {
			kind,
			title: kind.title(),
			data,
		}
	}
}

/// [`select_with`] using the default thresholds.
pub fn select<'a>(intent: &Intent, result: &'a ResultSet) -> Vec<VisualizationDescriptor<'a>> {
	select_with(&SelectorConfig::default(), intent, result)
}

/// Ordered chart descriptors for `intent` over `result`.
pub fn select_with<'a>(
	config: &SelectorConfig,
	intent: &Intent,
	result: &'a ResultSet,
) -> Vec<VisualizationDescriptor<'a>> {
	let direct = match intent {
		Intent::OrganizationHierarchy => Some((VisualizationKind::Organization, result.people.is_empty())),
		Intent::CollaborationAnalysis => Some((VisualizationKind::Collaboration, result.relationships.is_empty())),
		Intent::MeetingFrequency => Some((VisualizationKind::Timeline, result.meetings.is_empty())),
		Intent::DepartmentAnalysis => Some((VisualizationKind::Departments, result.departments.is_empty())),
		Intent::TopicAnalysis => Some((VisualizationKind::Topics, result.topics.is_empty())),
		Intent::Unmapped(_) => None,
	};

	match direct {
		Some((_, true)) => Vec::new(),
		Some((kind, false)) => vec![VisualizationDescriptor::new(kind, result)],
		None => composite(config, result),
	}
}

fn composite<'a>(config: &SelectorConfig, result: &'a ResultSet) -> Vec<VisualizationDescriptor<'a>> {
	let mut out = Vec::new();
	let push = |out: &mut Vec<VisualizationDescriptor<'a>>, kind| {
		if out.len() < config.max_composite {
			out.push(VisualizationDescriptor::new(kind, result));
		}
	};

	if result.meetings.len() >= config.min_timeline_meetings {
		push(&mut out, VisualizationKind::Timeline);
		if result.people.len() >= config.min_collaboration_people {
			push(&mut out, VisualizationKind::Collaboration);
		}
	}
	if result.people.len() >= config.min_organization_people {
		push(&mut out, VisualizationKind::Organization);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn people(n: usize) -> Vec<PersonNode> {
		(0..n)
			.map(|i| PersonNode {
				id: format!("p{i}"),
				name: Some(format!("Person {i}")),
				..Default::default()
			})
			.collect()
	}

	fn meetings(n: usize) -> Vec<Meeting> {
		(0..n)
			.map(|i| Meeting {
				id: format!("m{i}"),
				date: Some(format!("2024-01-{:02}", i + 1)),
				..Default::default()
			})
			.collect()
	}

	fn kinds(descriptors: &[VisualizationDescriptor<'_>]) -> Vec<VisualizationKind> {
		descriptors.iter().map(|d| d.kind).collect()
	}

	fn full_result() -> ResultSet {
		ResultSet {
			meetings: meetings(2),
			people: people(2),
			relationships: vec![Relationship {
				person1: "p0".into(),
				person2: "p1".into(),
				meeting_count: 2,
				strength: None,
			}],
			departments: vec![DepartmentStat {
				name: "Eng".into(),
				meeting_count: 4,
				member_count: 2,
			}],
			topics: vec![TopicTrend {
				name: "Roadmap".into(),
				mentions: 3,
			}],
			timeline: Vec::new(),
		}
	}

	const DIRECT: [(&str, VisualizationKind, &str); 5] = [
		("organization_hierarchy", VisualizationKind::Organization, "Organization Structure"),
		("collaboration_analysis", VisualizationKind::Collaboration, "Collaboration Network"),
		("meeting_frequency", VisualizationKind::Timeline, "Meeting Timeline"),
		("department_analysis", VisualizationKind::Departments, "Department Statistics"),
		("topic_analysis", VisualizationKind::Topics, "Topic Evolution"),
	];

	#[test]
	fn direct_intents_yield_single_descriptor() {
		let result = full_result();
		for (tag, kind, title) in DIRECT {
			let out = select(&Intent::parse(tag), &result);
			assert_eq!(out.len(), 1, "{tag}");
			assert_eq!(out[0].kind, kind);
			assert_eq!(out[0].title, title);
		}
	}

	#[test]
	fn direct_intents_with_empty_field_yield_nothing() {
		// Plenty of data elsewhere must not trigger the fallback.
		let result = ResultSet {
			meetings: meetings(5),
			people: people(5),
			..Default::default()
		};
		for tag in ["collaboration_analysis", "department_analysis", "topic_analysis"] {
			assert!(select(&Intent::parse(tag), &result).is_empty(), "{tag}");
		}
		let empty = ResultSet::default();
		for (tag, _, _) in DIRECT {
			assert!(select(&Intent::parse(tag), &empty).is_empty(), "{tag}");
		}
	}

	#[test]
	fn general_query_with_meetings_and_people_yields_timeline_then_network() {
		let result = ResultSet {
			meetings: meetings(4),
			people: people(3),
			..Default::default()
		};
		let out = select(&Intent::parse("general_query"), &result);
		assert_eq!(
			kinds(&out),
			vec![VisualizationKind::Timeline, VisualizationKind::Collaboration]
		);
	}

	#[test]
	fn sparse_result_yields_nothing() {
		let result = ResultSet {
			meetings: meetings(1),
			people: people(1),
			..Default::default()
		};
		assert!(select(&Intent::parse("find_people"), &result).is_empty());
	}

	#[test]
	fn meetings_only_yield_timeline() {
		let result = ResultSet {
			meetings: meetings(6),
			..Default::default()
		};
		let out = select(&Intent::parse("find_meetings"), &result);
		assert_eq!(kinds(&out), vec![VisualizationKind::Timeline]);
	}

	#[test]
	fn organization_needs_more_than_three_people() {
		let four = ResultSet {
			people: people(4),
			..Default::default()
		};
		let out = select(&Intent::parse("find_people"), &four);
		assert!(kinds(&out).contains(&VisualizationKind::Organization));

		let three = ResultSet {
			people: people(3),
			..Default::default()
		};
		assert!(select(&Intent::parse("find_people"), &three).is_empty());
	}

	#[test]
	fn collaboration_requires_a_timeline_first() {
		let result = ResultSet {
			meetings: meetings(2),
			people: people(3),
			..Default::default()
		};
		assert!(select(&Intent::parse("general_query"), &result).is_empty());
	}

	#[test]
	fn composite_is_capped() {
		let result = ResultSet {
			meetings: meetings(3),
			people: people(8),
			..Default::default()
		};
		let out = select(&Intent::parse("general_query"), &result);
		assert_eq!(out.len(), 2);
		assert!(!kinds(&out).contains(&VisualizationKind::Organization));

		let config = SelectorConfig {
			max_composite: 3,
			..Default::default()
		};
		let out = select_with(&config, &Intent::parse("general_query"), &result);
		assert_eq!(
			kinds(&out),
			vec![
				VisualizationKind::Timeline,
				VisualizationKind::Collaboration,
				VisualizationKind::Organization
			]
		);
	}

	#[test]
	fn descriptor_borrows_the_matching_slice() {
		let result = full_result();
		let out = select(&Intent::OrganizationHierarchy, &result);
		match out[0].data {
			DescriptorData::People(p) => assert_eq!(p.len(), 2),
			other => panic!("unexpected data {other:?}"),
		}
	}

	#[test]
	fn selection_is_deterministic() {
		let result = ResultSet {
			meetings: meetings(4),
			people: people(5),
			..Default::default()
		};
		let intent = Intent::parse("general_query");
		assert_eq!(select(&intent, &result), select(&intent, &result));
	}
}
