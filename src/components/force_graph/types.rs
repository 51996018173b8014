//! Link-graph document published by the site generator as `graph.json`.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// A page, folder or asset in the site.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier, referenced by links.
	pub id: String,
	#[serde(default)]
	pub label: String,
	/// `folder`, a file extension such as `.md`, or anything else for assets.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Site-relative URL the node links to.
	#[serde(default)]
	pub url: String,
	/// Incident link count, filled in by [`GraphData::prepare`].
	#[serde(skip)]
	pub degree: usize,
}

/// An undirected reference between two node ids.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Drop links with an unknown endpoint and compute every node's degree.
	pub fn prepare(mut self) -> Self {
		let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
		self.links
			.retain(|l| ids.contains(l.source.as_str()) && ids.contains(l.target.as_str()));

		let mut degree: HashMap<&str, usize> = HashMap::new();
		for link in &self.links {
			*degree.entry(link.source.as_str()).or_default() += 1;
			*degree.entry(link.target.as_str()).or_default() += 1;
		}
		for node in &mut self.nodes {
			node.degree = degree.get(node.id.as_str()).copied().unwrap_or(0);
		}
		self
	}

	/// Links touching `current`, and the nodes at their ends (plus
	/// `current` itself when it is a node).
	pub fn local_subgraph(&self, current: &str) -> Self {
		let links: Vec<GraphLink> = self
			.links
			.iter()
			.filter(|l| l.source == current || l.target == current)
			.cloned()
			.collect();
		let mut keep: HashSet<&str> = HashSet::from([current]);
		for link in &links {
			keep.insert(link.source.as_str());
			keep.insert(link.target.as_str());
		}
		let nodes = self
			.nodes
			.iter()
			.filter(|n| keep.contains(n.id.as_str()))
			.cloned()
			.collect();
		Self { nodes, links }
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
