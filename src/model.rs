//! Result-set records handed to the visualization layer by the query executor.
//!
//! Every collection is optional on the wire: an absent field or an explicit
//! `null` decodes to an empty `Vec`, so downstream code never has to
//! distinguish "missing" from "empty".

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::StrengthThresholds;

/// Label used when a person record carries no usable name.
pub const PLACEHOLDER_NAME: &str = "Unknown";
/// Avatar glyph used when no initial can be derived from the name.
pub const PLACEHOLDER_AVATAR: &str = "?";

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured payload returned by executing a knowledge query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultSet {
	/// Meetings matched by the query.
	#[serde(deserialize_with = "null_as_empty")]
	pub meetings: Vec<Meeting>,
	/// People matched by the query.
	#[serde(deserialize_with = "null_as_empty")]
	pub people: Vec<PersonNode>,
	/// Pairwise collaboration records.
	#[serde(deserialize_with = "null_as_empty")]
	pub relationships: Vec<Relationship>,
	/// Per-department statistics.
	#[serde(deserialize_with = "null_as_empty")]
	pub departments: Vec<DepartmentStat>,
	/// Topic mention counts.
	#[serde(deserialize_with = "null_as_empty")]
	pub topics: Vec<TopicTrend>,
	/// Pre-aggregated meeting counts per date.
	#[serde(deserialize_with = "null_as_empty")]
	pub timeline: Vec<TimelineEntry>,
}

impl ResultSet {
	/// Parse a result set from its JSON form.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// A person, optionally linked to a manager.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonNode {
	pub id: String,
	pub name: Option<String>,
	#[serde(alias = "role")]
	pub title: Option<String>,
	pub department: Option<String>,
	/// `None` (or an empty string) marks a root of the hierarchy.
	pub manager_id: Option<String>,
	pub is_manager: bool,
	pub meeting_count: u32,
}

impl PersonNode {
	/// Manager id, treating blank ids as absent.
	pub fn manager(&self) -> Option<&str> {
		self.manager_id
			.as_deref()
			.map(str::trim)
			.filter(|id| !id.is_empty())
	}

	pub fn display_name(&self) -> &str {
		self.name
			.as_deref()
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.unwrap_or(PLACEHOLDER_NAME)
	}

	pub fn display_title(&self) -> &str {
		self.title.as_deref().map(str::trim).unwrap_or("")
	}

	/// Single uppercase initial for the avatar bubble.
	pub fn avatar(&self) -> String {
		self.name
			.as_deref()
			.and_then(|name| name.trim().chars().next())
			.map(|c| c.to_uppercase().collect())
			.unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string())
	}
}

/// Coarse collaboration intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
	Weak,
	Medium,
	Strong,
}

impl Strength {
	pub const ALL: [Self; 3] = [Self::Weak, Self::Medium, Self::Strong];

	/// Tier for a raw meeting count.
	pub fn from_meeting_count(count: u32, thresholds: &StrengthThresholds) -> Self {
		if count >= thresholds.strong_min_meetings {
			Self::Strong
		} else if count >= thresholds.medium_min_meetings {
			Self::Medium
		} else {
			Self::Weak
		}
	}

	pub fn key(self) -> &'static str {
		match self {
			Self::Weak => "weak",
			Self::Medium => "medium",
			Self::Strong => "strong",
		}
	}

	pub fn parse(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|s| s.key() == key)
	}
}

/// Two people and how often they meet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relationship {
	pub person1: String,
	pub person2: String,
	pub meeting_count: u32,
	pub strength: Option<Strength>,
}

impl Relationship {
	/// Declared tier, or one derived from the meeting count.
	pub fn tier(&self, thresholds: &StrengthThresholds) -> Strength {
		self.strength
			.unwrap_or_else(|| Strength::from_meeting_count(self.meeting_count, thresholds))
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meeting {
	pub id: String,
	pub title: Option<String>,
	/// ISO-8601 date (or date-time); only the date part is used for grouping.
	pub date: Option<String>,
	/// Person ids or names.
	#[serde(deserialize_with = "null_as_empty")]
	pub attendees: Vec<String>,
	pub duration_minutes: Option<u32>,
}

impl Meeting {
	/// `YYYY-MM-DD` prefix of the date, if any.
	pub fn day(&self) -> Option<&str> {
		let date = self.date.as_deref()?.trim();
		if date.is_empty() {
			return None;
		}
		Some(date.get(..10).unwrap_or(date))
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepartmentStat {
	pub name: String,
	pub meeting_count: u32,
	pub member_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicTrend {
	pub name: String,
	pub mentions: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineEntry {
	pub date: String,
	pub meeting_count: u32,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_and_null_fields_decode_as_empty() {
		let rs = ResultSet::from_json(r#"{"people": null, "meetings": [{"id": "m1"}]}"#).unwrap();
		assert!(rs.people.is_empty());
		assert!(rs.relationships.is_empty());
		assert_eq!(rs.meetings.len(), 1);
		assert!(rs.meetings[0].attendees.is_empty());
	}

	#[test]
	fn person_accepts_camel_case_and_role_alias() {
		let rs = ResultSet::from_json(
			r#"{"people": [{"id": "b", "name": "Bo", "role": "Lead", "managerId": "a", "isManager": true, "meetingCount": 7}]}"#,
		)
		.unwrap();
		let p = &rs.people[0];
		assert_eq!(p.manager(), Some("a"));
		assert_eq!(p.display_title(), "Lead");
		assert!(p.is_manager);
		assert_eq!(p.meeting_count, 7);
	}

	#[test]
	fn malformed_person_gets_placeholders() {
		let p = PersonNode {
			id: "x".into(),
			name: Some("   ".into()),
			..Default::default()
		};
		assert_eq!(p.display_name(), PLACEHOLDER_NAME);
		assert_eq!(p.display_title(), "");
		assert_eq!(p.avatar(), PLACEHOLDER_AVATAR);

		let named = PersonNode {
			name: Some("élodie".into()),
			..Default::default()
		};
		assert_eq!(named.avatar(), "É");
	}

	#[test]
	fn blank_manager_is_root() {
		let p = PersonNode {
			id: "a".into(),
			manager_id: Some(" ".into()),
			..Default::default()
		};
		assert_eq!(p.manager(), None);
	}

	#[test]
	fn unknown_strength_is_rejected() {
		let err = serde_json::from_str::<Relationship>(r#"{"person1": "a", "person2": "b", "strength": "epic"}"#);
		assert!(err.is_err());
	}

	#[test]
	fn strength_falls_back_to_meeting_count() {
		let thresholds = StrengthThresholds::default();
		let rel = Relationship {
			person1: "a".into(),
			person2: "b".into(),
			meeting_count: 12,
			strength: None,
		};
		assert_eq!(rel.tier(&thresholds), Strength::Strong);
		let declared = Relationship {
			strength: Some(Strength::Weak),
			..rel
		};
		assert_eq!(declared.tier(&thresholds), Strength::Weak);
	}

	#[test]
	fn meeting_day_truncates_datetime() {
		let m = Meeting {
			date: Some("2024-03-05T10:00:00Z".into()),
			..Default::default()
		};
		assert_eq!(m.day(), Some("2024-03-05"));
		assert_eq!(Meeting::default().day(), None);
	}
}
