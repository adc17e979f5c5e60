//! Two-level radial layout around a center person.
//!
//! The center sits at the origin, its direct connections are spread evenly on
//! an inner ring and their outgoing connections on an outer ring, each rotated
//! a fixed offset away from its parent's ray. The result depends only on the
//! inputs; relationship order decides discovery order.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use crate::config::GraphConfig;
use crate::data::{Person, Relationship, RelationshipKind};

/// Which relationship kinds take part in neighbour discovery and edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationFilter {
	pub suhbah: bool,
	pub family: bool,
}

impl RelationFilter {
	pub const ALL: Self = Self {
		suhbah: true,
		family: true,
	};

	pub fn allows(&self, kind: RelationshipKind) -> bool {
		match kind {
			RelationshipKind::Suhbah => self.suhbah,
			RelationshipKind::Family => self.family,
		}
	}
}

impl Default for RelationFilter {
	fn default() -> Self {
		Self::ALL
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
	pub filter: RelationFilter,
	/// Copied onto every produced node.
	pub draggable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
	Center,
	Level1,
	Level2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	fn polar(radius: f64, angle: f64) -> Self {
		Self {
			x: radius * angle.cos(),
			y: radius * angle.sin(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub id: String,
	pub label: String,
	pub position: Position,
	pub tier: Tier,
	pub draggable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEdge {
	/// `"{source}-{target}"`.
	pub id: String,
	pub source: String,
	pub target: String,
	pub kind: RelationshipKind,
	pub label: String,
}

/// Nodes and edges ready for the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLayout {
	pub nodes: Vec<LayoutNode>,
	pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
	#[cfg(test)]
	pub fn node(&self, id: &str) -> Option<&LayoutNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Union by id. Entries already present keep their current values.
	pub fn merge(&mut self, other: GraphLayout) {
		let node_ids: HashSet<String> = self.nodes.iter().map(|n| n.id.clone()).collect();
		let edge_ids: HashSet<String> = self.edges.iter().map(|e| e.id.clone()).collect();
		self.nodes
			.extend(other.nodes.into_iter().filter(|n| !node_ids.contains(&n.id)));
		self.edges
			.extend(other.edges.into_iter().filter(|e| !edge_ids.contains(&e.id)));
	}
}

/// The center and its first and second degree connections.
///
/// The three groups are disjoint. `level1` and `level2` keep discovery order.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleSet {
	pub center: String,
	pub level1: Vec<String>,
	pub level2: Vec<String>,
}

impl VisibleSet {
	/// Only ids in `known` are admitted.
	///
	/// Second-degree discovery follows relationships whose *source* is a
	/// level-1 node; incoming relationships of level-1 nodes are not followed.
	pub fn discover(
		known: &HashSet<&str>,
		relationships: &[Relationship],
		center: &str,
		filter: RelationFilter,
	) -> Self {
		let mut set = Self {
			center: center.to_owned(),
			level1: Vec::new(),
			level2: Vec::new(),
		};
		if !known.contains(center) {
			return set;
		}

		let active = || relationships.iter().filter(move |rel| filter.allows(rel.kind));

		let mut level1 = HashSet::new();
		for rel in active() {
			let other = if rel.source == center {
				&rel.target
			} else if rel.target == center {
				&rel.source
			} else {
				continue;
			};
			if other != center && known.contains(other.as_str()) && level1.insert(other.as_str()) {
				set.level1.push(other.clone());
			}
		}

		let mut level2 = HashSet::new();
		for rel in active() {
			if !level1.contains(rel.source.as_str()) {
				continue;
			}
			let target = rel.target.as_str();
			if target != center
				&& !level1.contains(target)
				&& known.contains(target)
				&& level2.insert(target)
			{
				set.level2.push(rel.target.clone());
			}
		}

		set
	}

	pub fn len(&self) -> usize {
		1 + self.level1.len() + self.level2.len()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.center == id || self.level1.iter().any(|n| n == id) || self.level2.iter().any(|n| n == id)
	}
}

fn ring_angle(index: usize, count: usize) -> f64 {
	if count == 0 {
		return 0.0;
	}
	(index as f64 / count as f64) * 2.0 * PI
}

/// Build the radial layout for `center` under the given options.
///
/// Never fails: an unknown center yields a lone node labelled with its id,
/// and relationships touching unknown ids are ignored.
pub fn build_two_level_graph(
	persons: &[Person],
	relationships: &[Relationship],
	center: &str,
	options: &LayoutOptions,
	config: &GraphConfig,
) -> GraphLayout {
	let known: HashSet<&str> = persons.iter().map(|p| p.id.as_str()).collect();
	if !known.contains(center) {
		return GraphLayout {
			nodes: vec![LayoutNode {
				id: center.to_owned(),
				label: center.to_owned(),
				position: Position::default(),
				tier: Tier::Center,
				draggable: options.draggable,
			}],
			edges: Vec::new(),
		};
	}

	let visible = VisibleSet::discover(&known, relationships, center, options.filter);
	let level1_count = visible.level1.len();
	let level1_index: HashMap<&str, usize> = visible
		.level1
		.iter()
		.enumerate()
		.map(|(i, id)| (id.as_str(), i))
		.collect();
	let level2: HashSet<&str> = visible.level2.iter().map(String::as_str).collect();

	// Last relationship in list order wins; the kind is not consulted.
	let mut parent_of: HashMap<&str, usize> = HashMap::new();
	for rel in relationships {
		if let Some(&idx) = level1_index.get(rel.source.as_str()) {
			parent_of.insert(rel.target.as_str(), idx);
		}
	}

	let child_offset = config.child_offset_radians();
	let mut nodes = Vec::with_capacity(visible.len());
	for person in persons {
		let id = person.id.as_str();
		let (position, tier) = if id == center {
			(Position::default(), Tier::Center)
		} else if let Some(&idx) = level1_index.get(id) {
			let angle = ring_angle(idx, level1_count);
			(Position::polar(config.level1_radius, angle), Tier::Level1)
		} else if level2.contains(id) {
			let parent = parent_of.get(id).copied().unwrap_or(0);
			let angle = ring_angle(parent, level1_count) + child_offset;
			(Position::polar(config.level2_radius, angle), Tier::Level2)
		} else {
			continue;
		};
		nodes.push(LayoutNode {
			id: person.id.clone(),
			label: person.name.clone(),
			position,
			tier,
			draggable: options.draggable,
		});
	}

	let edges = relationships
		.iter()
		.filter(|rel| options.filter.allows(rel.kind))
		.filter(|rel| visible.contains(&rel.source) && visible.contains(&rel.target))
		.map(|rel| LayoutEdge {
			id: format!("{}-{}", rel.source, rel.target),
			source: rel.source.clone(),
			target: rel.target.clone(),
			kind: rel.kind,
			label: rel.label(),
		})
		.collect();

	GraphLayout { nodes, edges }
}
