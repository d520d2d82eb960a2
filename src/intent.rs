//! Query intents as resolved by the upstream classifier.

/// What the user's query is asking for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
	OrganizationHierarchy,
	CollaborationAnalysis,
	MeetingFrequency,
	DepartmentAnalysis,
	TopicAnalysis,
	/// Any tag without a direct visualization (`general_query`, `find_people`, ...).
	Unmapped(String),
}

impl Intent {
	/// Parse a classifier tag. Total: unknown tags become [`Intent::Unmapped`].
	pub fn parse(tag: &str) -> Self {
		match tag.trim() {
			"organization_hierarchy" => Self::OrganizationHierarchy,
			"collaboration_analysis" => Self::CollaborationAnalysis,
			"meeting_frequency" => Self::MeetingFrequency,
			"department_analysis" => Self::DepartmentAnalysis,
			"topic_analysis" => Self::TopicAnalysis,
			other => Self::Unmapped(other.to_string()),
		}
	}

	pub fn tag(&self) -> &str {
		match self {
			Self::OrganizationHierarchy => "organization_hierarchy",
			Self::CollaborationAnalysis => "collaboration_analysis",
			Self::MeetingFrequency => "meeting_frequency",
			Self::DepartmentAnalysis => "department_analysis",
			Self::TopicAnalysis => "topic_analysis",
			Self::Unmapped(tag) => tag,
		}
	}

	pub fn is_mapped(&self) -> bool {
		!matches!(self, Self::Unmapped(_))
	}
}

impl From<&str> for Intent {
	fn from(tag: &str) -> Self {
		Self::parse(tag)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_tags_round_trip() {
		for tag in [
			"organization_hierarchy",
			"collaboration_analysis",
			"meeting_frequency",
			"department_analysis",
			"topic_analysis",
		] {
			let intent = Intent::parse(tag);
			assert!(intent.is_mapped(), "{tag}");
			assert_eq!(intent.tag(), tag);
		}
	}

	#[test]
	fn unknown_tags_are_unmapped() {
		assert_eq!(
			Intent::parse("find_people"),
			Intent::Unmapped("find_people".to_string())
		);
		assert!(!Intent::from("").is_mapped());
	}
}
