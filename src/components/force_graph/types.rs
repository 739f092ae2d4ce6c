//! Input data structures for the co-authorship graph.
//!
//! These mirror the JSON payload one-to-one and are never mutated after
//! loading. Link endpoints stay as ids; the session resolves them through an
//! id → index map built once.

use serde::{Deserialize, Deserializer};

/// Country bucket used for authors without a country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// An author in the graph.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AuthorNode {
	/// Unique identifier. Numeric ids in the payload are normalized to strings.
	#[serde(deserialize_with = "deserialize_id")]
	pub id: String,
	/// Display name. Falls back to `id` when missing or empty.
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub affiliation: Option<String>,
	/// Country of affiliation. Grouped as [`UNKNOWN_COUNTRY`] when missing.
	#[serde(default)]
	pub country: Option<String>,
}

impl AuthorNode {
	pub fn display_name(&self) -> &str {
		non_empty(&self.name).unwrap_or(&self.id)
	}

	/// Country name used for aggregation and highlighting.
	pub fn country_key(&self) -> &str {
		non_empty(&self.country).unwrap_or(UNKNOWN_COUNTRY)
	}

	pub fn affiliation(&self) -> Option<&str> {
		non_empty(&self.affiliation)
	}

	/// The country as given in the payload, if any.
	pub fn country(&self) -> Option<&str> {
		non_empty(&self.country)
	}
}

/// An undirected collaboration between two authors.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CoauthorLink {
	/// Source author id.
	#[serde(deserialize_with = "deserialize_id")]
	pub source: String,
	/// Target author id.
	#[serde(deserialize_with = "deserialize_id")]
	pub target: String,
	/// Collaboration weight, only used for stroke width.
	#[serde(default)]
	pub weight: Option<f64>,
}

impl CoauthorLink {
	/// Weight with the default of 1 applied to missing or unusable values.
	pub fn weight(&self) -> f64 {
		match self.weight {
			Some(w) if w.is_finite() && w > 0.0 => w,
			_ => 1.0,
		}
	}
}

/// Complete graph payload: authors and collaborations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<AuthorNode>,
	#[serde(default)]
	pub links: Vec<CoauthorLink>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Integer(i64),
	Float(f64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match RawId::deserialize(deserializer)? {
		RawId::Text(s) => s,
		RawId::Integer(n) => n.to_string(),
		RawId::Float(f) => f.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn optional_fields_fall_back_to_defaults() {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [{"id": "a"}, {"id": "b", "name": "  ", "country": ""}],
				"links": [{"source": "a", "target": "b"}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].display_name(), "a");
		assert_eq!(data.nodes[1].display_name(), "b");
		assert_eq!(data.nodes[1].country_key(), UNKNOWN_COUNTRY);
		assert_eq!(data.nodes[1].country(), None);
		assert_eq!(data.links[0].weight(), 1.0);
	}

	#[test]
	fn numeric_ids_are_normalized() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [{"id": 7}, {"id": "8"}], "links": [{"source": 7, "target": "8", "weight": 3}]}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].id, "7");
		assert_eq!(data.links[0].source, "7");
		assert_eq!(data.links[0].target, "8");
		assert_eq!(data.links[0].weight(), 3.0);
	}

	#[test]
	fn missing_sections_are_empty() {
		let data: GraphData = serde_json::from_str("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}

	#[test]
	fn invalid_weights_use_default() {
		let link = CoauthorLink {
			source: "a".into(),
			target: "b".into(),
			weight: Some(-2.0),
		};
		assert_eq!(link.weight(), 1.0);
	}
}
