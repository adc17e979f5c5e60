//! Owned state of the graph page and the transitions that change it.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::GraphConfig;
use crate::data::{Biography, Dataset, Person};
use crate::layout::{GraphLayout, LayoutOptions, RelationFilter, build_two_level_graph};

/// Identifies one pending center change. Only the latest ticket settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTicket {
	generation: u64,
	center: String,
}

impl TransitionTicket {
	pub fn center(&self) -> &str {
		&self.center
	}
}

/// External document shown in the reference modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceTarget {
	pub name: String,
	pub url: String,
}

pub struct GraphViewState {
	dataset: Arc<Dataset>,
	config: GraphConfig,
	filter: RelationFilter,
	drag_enabled: bool,
	center: String,
	selected: Option<String>,
	pending: Option<TransitionTicket>,
	generation: u64,
	scene: GraphLayout,
	reference: Option<ReferenceTarget>,
}

impl GraphViewState {
	pub fn new(dataset: Arc<Dataset>, config: GraphConfig) -> Self {
		let center = config.default_center.clone();
		let mut state = Self {
			dataset,
			config,
			filter: RelationFilter::ALL,
			drag_enabled: true,
			selected: Some(center.clone()),
			center,
			pending: None,
			generation: 0,
			scene: GraphLayout::default(),
			reference: None,
		};
		state.refresh();
		state
	}

	fn options(&self) -> LayoutOptions {
		LayoutOptions {
			filter: self.filter,
			draggable: self.drag_enabled,
		}
	}

	fn layout_for(&self, center: &str) -> GraphLayout {
		build_two_level_graph(
			&self.dataset.persons,
			&self.dataset.relationships,
			center,
			&self.options(),
			&self.config,
		)
	}

	/// Replace the scene with a full recompute for the current center.
	pub fn refresh(&mut self) {
		self.scene = self.layout_for(&self.center);
		debug!(
			"scene for {}: {} nodes, {} edges",
			self.center,
			self.scene.nodes.len(),
			self.scene.edges.len()
		);
	}

	pub fn scene(&self) -> &GraphLayout {
		&self.scene
	}

	#[cfg(test)]
	pub fn center(&self) -> &str {
		&self.center
	}

	pub fn filter(&self) -> RelationFilter {
		self.filter
	}

	pub fn drag_enabled(&self) -> bool {
		self.drag_enabled
	}

	pub fn toggle_suhbah(&mut self) {
		self.filter.suhbah = !self.filter.suhbah;
		debug!("suhbah filter {}", self.filter.suhbah);
		self.refresh();
	}

	pub fn toggle_family(&mut self) {
		self.filter.family = !self.filter.family;
		debug!("family filter {}", self.filter.family);
		self.refresh();
	}

	pub fn toggle_drag(&mut self) {
		self.drag_enabled = !self.drag_enabled;
		debug!("node dragging {}", self.drag_enabled);
		self.refresh();
	}

	/// Select a node and make it the pending center.
	///
	/// Any earlier pending transition is superseded; its ticket will no longer
	/// settle.
	pub fn select_node(&mut self, id: &str) -> TransitionTicket {
		self.generation += 1;
		let ticket = TransitionTicket {
			generation: self.generation,
			center: id.to_owned(),
		};
		if let Some(stale) = self.pending.replace(ticket.clone()) {
			debug!("pending center {} superseded by {}", stale.center, id);
		}
		self.selected = Some(id.to_owned());
		debug!("pending center {}", id);
		ticket
	}

	pub fn pending_center(&self) -> Option<&str> {
		self.pending.as_ref().map(TransitionTicket::center)
	}

	/// Complete the transition named by `ticket`.
	///
	/// The new center's layout is unioned into the displayed scene so the
	/// canvas keeps the old nodes until the next [`refresh`](Self::refresh).
	/// Returns `false` for a stale ticket.
	pub fn settle(&mut self, ticket: &TransitionTicket) -> bool {
		if self.pending.as_ref() != Some(ticket) {
			warn!("ignoring stale transition to {}", ticket.center);
			return false;
		}
		let incoming = self.layout_for(&ticket.center);
		self.scene.merge(incoming);
		self.center = ticket.center.clone();
		self.pending = None;
		info!("center is now {}", self.center);
		true
	}

	#[cfg(test)]
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	pub fn selected_person(&self) -> Option<&Person> {
		self.selected.as_deref().and_then(|id| self.dataset.person(id))
	}

	pub fn selected_biography(&self) -> Option<&Biography> {
		self.selected.as_deref().and_then(|id| self.dataset.biography(id))
	}

	pub fn reference(&self) -> Option<&ReferenceTarget> {
		self.reference.as_ref()
	}

	pub fn open_reference(&mut self, target: ReferenceTarget) {
		debug!("opening reference {}", target.url);
		self.reference = Some(target);
	}

	pub fn close_reference(&mut self) {
		self.reference = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{Relationship, RelationshipKind};
	use pretty_assertions::assert_eq;

	fn dataset() -> Arc<Dataset> {
		let person = |id: &str| Person {
			id: id.into(),
			name: id.to_uppercase(),
			category: "companion".into(),
		};
		let rel = |source: &str, target: &str, kind| Relationship {
			source: source.into(),
			target: target.into(),
			kind,
			family_type: None,
		};
		let mut biographies = std::collections::HashMap::new();
		biographies.insert(
			"a".to_string(),
			Biography {
				name: "A".into(),
				title: "First".into(),
				history: "...".into(),
				reference_url: "https://example.org/a".into(),
			},
		);
		Arc::new(Dataset {
			persons: ["a", "b", "c", "d", "e"].into_iter().map(person).collect(),
			relationships: vec![
				rel("a", "b", RelationshipKind::Suhbah),
				rel("a", "c", RelationshipKind::Family),
				rel("b", "d", RelationshipKind::Suhbah),
				rel("d", "e", RelationshipKind::Suhbah),
			],
			biographies,
			timeline: Vec::new(),
		})
	}

	fn state() -> GraphViewState {
		let config = GraphConfig {
			default_center: "a".into(),
			..GraphConfig::default()
		};
		GraphViewState::new(dataset(), config)
	}

	fn node_ids(state: &GraphViewState) -> Vec<&str> {
		state.scene().nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn starts_on_default_center_with_it_selected() {
		let state = state();
		assert_eq!(state.center(), "a");
		assert_eq!(state.selected(), Some("a"));
		assert_eq!(node_ids(&state), vec!["a", "b", "c", "d"]);
		assert!(state.selected_biography().is_some());
	}

	#[test]
	fn toggles_recompute_the_scene() {
		let mut state = state();
		state.toggle_family();
		assert!(!state.filter().family);
		assert_eq!(node_ids(&state), vec!["a", "b", "d"]);

		state.toggle_suhbah();
		assert_eq!(node_ids(&state), vec!["a"]);

		state.toggle_drag();
		assert!(!state.drag_enabled());
		assert!(state.scene().nodes.iter().all(|n| !n.draggable));
	}

	#[test]
	fn settling_unions_then_refresh_prunes() {
		let mut state = state();
		let ticket = state.select_node("d");
		assert_eq!(state.pending_center(), Some("d"));
		assert_eq!(state.center(), "a");

		assert!(state.settle(&ticket));
		assert_eq!(state.center(), "d");
		assert_eq!(state.pending_center(), None);
		// e is new around d; a and c stay until the next full recompute.
		assert_eq!(node_ids(&state), vec!["a", "b", "c", "d", "e"]);

		state.refresh();
		assert_eq!(node_ids(&state), vec!["b", "d", "e"]);
	}

	#[test]
	fn superseded_ticket_does_not_settle() {
		let mut state = state();
		let first = state.select_node("b");
		let second = state.select_node("c");

		assert!(!state.settle(&first));
		assert_eq!(state.center(), "a");
		assert_eq!(state.selected(), Some("c"));

		assert!(state.settle(&second));
		assert_eq!(state.center(), "c");
		assert!(!state.settle(&second));
	}

	#[test]
	fn reselecting_the_same_node_issues_a_fresh_ticket() {
		let mut state = state();
		let first = state.select_node("b");
		let second = state.select_node("b");
		assert_ne!(first, second);
		assert!(!state.settle(&first));
		assert!(state.settle(&second));
	}

	#[test]
	fn selection_without_biography_has_no_panel() {
		let mut state = state();
		state.select_node("d");
		assert_eq!(state.selected_person().map(|p| p.name.as_str()), Some("D"));
		assert!(state.selected_biography().is_none());

		state.clear_selection();
		assert_eq!(state.selected(), None);
		assert!(state.selected_person().is_none());
	}

	#[test]
	fn reference_modal_opens_and_closes() {
		let mut state = state();
		assert!(state.reference().is_none());
		let target = ReferenceTarget {
			name: "A".into(),
			url: "https://example.org/a".into(),
		};
		state.open_reference(target.clone());
		assert_eq!(state.reference(), Some(&target));
		state.close_reference();
		assert!(state.reference().is_none());
	}
}
