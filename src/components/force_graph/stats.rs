//! Aggregate statistics derived once from the raw graph payload.

use std::collections::HashMap;

use log::warn;

use super::types::GraphData;

/// Number of authors from one country.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryCount {
	pub country: String,
	pub count: usize,
}

/// Degree per node plus the country breakdown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStats {
	/// Degree of each node, parallel to `GraphData::nodes`.
	pub degrees: Vec<usize>,
	/// Every country ordered by descending count, ties alphabetical.
	pub countries: Vec<CountryCount>,
	/// The leading countries that receive a palette color.
	pub top_countries: Vec<String>,
	/// Node indices of each link's endpoints, parallel to `GraphData::links`.
	/// `None` when either endpoint names an unknown author.
	pub link_endpoints: Vec<Option<(usize, usize)>>,
}

impl GraphStats {
	pub fn derive(data: &GraphData, top_n: usize) -> Self {
		let index = id_index(data);

		let mut degrees = vec![0usize; data.nodes.len()];
		let mut dangling = 0usize;
		let mut link_endpoints = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let mut resolve = |endpoint: &str| match index.get(endpoint) {
				Some(&i) => {
					degrees[i] += 1;
					Some(i)
				}
				None => {
					dangling += 1;
					None
				}
			};
			let source = resolve(&link.source);
			let target = resolve(&link.target);
			link_endpoints.push(source.zip(target));
		}
		if dangling > 0 {
			warn!("coauthor-graph: {dangling} link endpoints reference unknown authors");
		}

		let mut counts: HashMap<&str, usize> = HashMap::new();
		for node in &data.nodes {
			*counts.entry(node.country_key()).or_insert(0) += 1;
		}
		let mut countries: Vec<CountryCount> = counts
			.into_iter()
			.map(|(country, count)| CountryCount {
				country: country.to_string(),
				count,
			})
			.collect();
		countries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));

		let top_countries = countries
			.iter()
			.take(top_n)
			.map(|c| c.country.clone())
			.collect();

		Self {
			degrees,
			countries,
			top_countries,
			link_endpoints,
		}
	}

	pub fn degree(&self, index: usize) -> usize {
		self.degrees.get(index).copied().unwrap_or(0)
	}

	/// Smallest and largest degree, or `None` for an empty graph.
	pub fn degree_extent(&self) -> Option<(usize, usize)> {
		let min = self.degrees.iter().copied().min()?;
		let max = self.degrees.iter().copied().max()?;
		Some((min, max))
	}

	pub fn country_count(&self, country: &str) -> usize {
		self.countries
			.iter()
			.find(|c| c.country == country)
			.map_or(0, |c| c.count)
	}
}

/// Maps each author id to the index of its first occurrence.
fn id_index(data: &GraphData) -> HashMap<&str, usize> {
	let mut index = HashMap::with_capacity(data.nodes.len());
	for (i, node) in data.nodes.iter().enumerate() {
		if index.contains_key(node.id.as_str()) {
			warn!("coauthor-graph: duplicate author id {:?} ignored", node.id);
			continue;
		}
		index.insert(node.id.as_str(), i);
	}
	index
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{AuthorNode, CoauthorLink};

	fn node(id: &str, country: Option<&str>) -> AuthorNode {
		AuthorNode {
			id: id.into(),
			country: country.map(Into::into),
			..Default::default()
		}
	}

	fn link(source: &str, target: &str) -> CoauthorLink {
		CoauthorLink {
			source: source.into(),
			target: target.into(),
			weight: None,
		}
	}

	#[test]
	fn degree_counts_every_endpoint() {
		let data = GraphData {
			nodes: vec![node("a", None), node("b", None), node("c", None)],
			links: vec![link("a", "b"), link("a", "b"), link("c", "c"), link("a", "zzz")],
		};
		let stats = GraphStats::derive(&data, 10);
		assert_eq!(stats.degrees, vec![3, 2, 2]);
	}

	#[test]
	fn link_endpoints_are_resolved_once() {
		let data = GraphData {
			nodes: vec![node("a", None), node("b", None), node("a", None)],
			links: vec![link("b", "a"), link("a", "ghost"), link("b", "b")],
		};
		let stats = GraphStats::derive(&data, 10);
		assert_eq!(
			stats.link_endpoints,
			vec![Some((1, 0)), None, Some((1, 1))]
		);
		assert_eq!(stats.degrees, vec![2, 3, 0]);
	}

	#[test]
	fn countries_sorted_by_count_then_name() {
		let data = GraphData {
			nodes: vec![
				node("1", Some("Peru")),
				node("2", Some("Chile")),
				node("3", Some("Peru")),
				node("4", Some("Austria")),
				node("5", None),
				node("6", Some("")),
			],
			links: vec![],
		};
		let stats = GraphStats::derive(&data, 3);
		let order: Vec<_> = stats.countries.iter().map(|c| c.country.as_str()).collect();
		assert_eq!(order, vec!["Peru", "Unknown", "Austria", "Chile"]);
		assert_eq!(stats.top_countries, vec!["Peru", "Unknown", "Austria"]);
		assert_eq!(stats.country_count("Unknown"), 2);
		assert_eq!(stats.country_count("Narnia"), 0);
	}

	#[test]
	fn top_list_is_capped() {
		let nodes = (0..15)
			.map(|i| node(&i.to_string(), Some(format!("C{i:02}").as_str())))
			.collect();
		let stats = GraphStats::derive(&GraphData { nodes, links: vec![] }, 10);
		assert_eq!(stats.countries.len(), 15);
		assert_eq!(stats.top_countries.len(), 10);
		assert_eq!(stats.top_countries[0], "C00");
	}

	#[test]
	fn single_country_has_single_top_entry() {
		let data = GraphData {
			nodes: vec![node("a", Some("Kenya")), node("b", Some("Kenya"))],
			links: vec![link("a", "b")],
		};
		let stats = GraphStats::derive(&data, 10);
		assert_eq!(stats.top_countries, vec!["Kenya"]);
	}

	#[test]
	fn empty_input_is_empty() {
		let stats = GraphStats::derive(&GraphData::default(), 10);
		assert!(stats.degrees.is_empty());
		assert!(stats.top_countries.is_empty());
		assert_eq!(stats.degree_extent(), None);
	}

	#[test]
	fn duplicate_ids_resolve_to_first() {
		let data = GraphData {
			nodes: vec![node("a", None), node("a", None)],
			links: vec![link("a", "a")],
		};
		let stats = GraphStats::derive(&data, 10);
		assert_eq!(stats.degrees, vec![2, 0]);
	}
}
