//! Labelled bar series for the canvas bar charts.

use std::collections::BTreeMap;

use crate::model::{DepartmentStat, Meeting, TimelineEntry, TopicTrend};

/// One labelled bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
	pub label: String,
	pub value: f64,
}

/// Meetings per day, preferring the pre-aggregated timeline when supplied.
pub fn timeline_bars(meetings: &[Meeting], timeline: &[TimelineEntry]) -> Vec<Bar> {
	if !timeline.is_empty() {
		return timeline
			.iter()
			.map(|entry| Bar {
				label: entry.date.clone(),
				value: f64::from(entry.meeting_count),
			})
			.collect();
	}

	let mut per_day: BTreeMap<&str, u32> = BTreeMap::new();
	let mut undated = 0u32;
	for meeting in meetings {
		match meeting.day() {
			Some(day) => *per_day.entry(day).or_default() += 1,
			None => undated += 1,
		}
	}
	let mut bars: Vec<Bar> = per_day
		.into_iter()
		.map(|(day, count)| Bar {
			label: day.to_string(),
			value: f64::from(count),
		})
		.collect();
	if undated > 0 {
		bars.push(Bar {
			label: "undated".to_string(),
			value: f64::from(undated),
		});
	}
	bars
}

pub fn department_bars(departments: &[DepartmentStat]) -> Vec<Bar> {
	departments
		.iter()
		.map(|d| Bar {
			label: d.name.clone(),
			value: f64::from(d.meeting_count),
		})
		.collect()
}

pub fn topic_bars(topics: &[TopicTrend]) -> Vec<Bar> {
	topics
		.iter()
		.map(|t| Bar {
			label: t.name.clone(),
			value: f64::from(t.mentions),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn meeting(date: Option<&str>) -> Meeting {
		Meeting {
			date: date.map(str::to_string),
			..Default::default()
		}
	}

	#[test]
	fn meetings_are_grouped_by_day_in_date_order() {
		let bars = timeline_bars(
			&[
				meeting(Some("2024-02-02T09:00")),
				meeting(Some("2024-02-01")),
				meeting(Some("2024-02-02T15:30")),
				meeting(None),
			],
			&[],
		);
		let labels: Vec<_> = bars.iter().map(|b| b.label.as_str()).collect();
		assert_eq!(labels, vec!["2024-02-01", "2024-02-02", "undated"]);
		assert_eq!(bars[1].value, 2.0);
	}

	#[test]
	fn timeline_entries_take_precedence() {
		let bars = timeline_bars(
			&[meeting(Some("2024-02-01"))],
			&[TimelineEntry {
				date: "2024-W05".into(),
				meeting_count: 9,
			}],
		);
		assert_eq!(
			bars,
			vec![Bar {
				label: "2024-W05".into(),
				value: 9.0
			}]
		);
	}

	#[test]
	fn department_and_topic_bars_keep_input_order() {
		let depts = department_bars(&[
			DepartmentStat {
				name: "Sales".into(),
				meeting_count: 3,
				member_count: 4,
			},
			DepartmentStat {
				name: "Eng".into(),
				meeting_count: 8,
				member_count: 9,
			},
		]);
		assert_eq!(depts[0].label, "Sales");
		assert_eq!(depts[1].value, 8.0);

		let topics = topic_bars(&[TopicTrend {
			name: "Hiring".into(),
			mentions: 5,
		}]);
		assert_eq!(topics[0].value, 5.0);
	}
}
