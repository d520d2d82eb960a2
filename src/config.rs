//! Tunable thresholds, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Root configuration for a chart session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
	/// Data-sufficiency thresholds for the composite fallback.
	pub selector: SelectorConfig,
	/// Meeting counts separating the relationship strength tiers.
	pub strength: StrengthThresholds,
}

impl ChartConfig {
	/// Parse a configuration document; missing keys keep their defaults.
	pub fn from_json(json: &str) -> ChartResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Thresholds used when an intent has no direct visualization mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
	/// Minimum meetings for a timeline.
	pub min_timeline_meetings: usize,
	/// Minimum people for a collaboration network (after a timeline).
	pub min_collaboration_people: usize,
	/// Minimum people for an organization chart.
	pub min_organization_people: usize,
	/// Upper bound on descriptors produced by the fallback.
	pub max_composite: usize,
}

impl Default for SelectorConfig {
	fn default() -> Self {
		Self {
			min_timeline_meetings: 3,
			min_collaboration_people: 2,
			min_organization_people: 4,
			max_composite: 2,
		}
	}
}

/// Meeting counts at which a relationship becomes medium or strong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthThresholds {
	pub medium_min_meetings: u32,
	pub strong_min_meetings: u32,
}

impl Default for StrengthThresholds {
	fn default() -> Self {
		Self {
			medium_min_meetings: 5,
			strong_min_meetings: 10,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		let config = ChartConfig::from_json("{}").unwrap();
		assert_eq!(config, ChartConfig::default());
		assert_eq!(config.selector.min_timeline_meetings, 3);
		assert_eq!(config.selector.max_composite, 2);
	}

	#[test]
	fn partial_document_overrides_only_named_keys() {
		let config = ChartConfig::from_json(r#"{"selector": {"max_composite": 3}}"#).unwrap();
		assert_eq!(config.selector.max_composite, 3);
		assert_eq!(config.selector.min_organization_people, 4);
		assert_eq!(config.strength.strong_min_meetings, 10);
	}

	#[test]
	fn invalid_document_is_an_error() {
		assert!(ChartConfig::from_json("[1, 2").is_err());
	}
}
