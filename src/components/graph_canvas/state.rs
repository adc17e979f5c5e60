use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::data::RelationshipKind;
use crate::layout::{GraphLayout, Tier};

pub const CENTER_RADIUS: f64 = 16.0;
pub const LEVEL1_RADIUS: f64 = 12.0;
pub const LEVEL2_RADIUS: f64 = 9.0;
/// Extra world-space slack around a node that still counts as a hit.
pub const HIT_SLACK: f64 = 6.0;
/// Pointer travel (screen pixels) below which a press is a click.
pub const CLICK_TOLERANCE: f64 = 4.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 80.0;
const FIT_MAX_ZOOM: f64 = 1.5;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn tier_radius(tier: Tier) -> f64 {
	match tier {
		Tier::Center => CENTER_RADIUS,
		Tier::Level1 => LEVEL1_RADIUS,
		Tier::Level2 => LEVEL2_RADIUS,
	}
}

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub tier: Tier,
	pub draggable: bool,
}

#[derive(Clone, Debug)]
pub struct CanvasEdge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub kind: RelationshipKind,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Camera move towards a node, advanced by [`GraphCanvasState::tick`].
#[derive(Clone, Debug)]
pub struct CameraPan {
	from_x: f64,
	from_y: f64,
	to_x: f64,
	to_y: f64,
	elapsed: f64,
	duration: f64,
}

/// Axis-aligned bounds of the scene in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

pub struct GraphCanvasState {
	/// Scene store. Every node is anchored at its layout position, so the
	/// simulation never moves them; only dragging does.
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<CanvasEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub camera: Option<CameraPan>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	ids: HashMap<String, DefaultNodeIdx>,
}

impl GraphCanvasState {
	pub fn new(layout: &GraphLayout, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: Self::empty_graph(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			camera: None,
			width,
			height,
			flow_time: 0.0,
			ids: HashMap::new(),
		};
		state.sync(layout);
		state.fit_view();
		state
	}

	/// The graph is only a store of anchored nodes; it is never stepped.
	fn empty_graph() -> ForceGraph<NodeInfo, ()> {
		ForceGraph::new(SimulationParameters::default())
	}

	/// Replace the scene, keeping the camera where it is.
	pub fn sync(&mut self, layout: &GraphLayout) {
		let mut graph = Self::empty_graph();
		let mut ids = HashMap::new();
		let mut edges = Vec::new();

		for node in &layout.nodes {
			let idx = graph.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					tier: node.tier,
					draggable: node.draggable,
				},
			});
			ids.insert(node.id.clone(), idx);
		}

		for edge in &layout.edges {
			if let (Some(&src), Some(&tgt)) = (ids.get(&edge.source), ids.get(&edge.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(CanvasEdge {
					source: src,
					target: tgt,
					kind: edge.kind,
					label: edge.label.clone(),
				});
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.ids = ids;
		self.drag = DragState::default();
		self.hover = HoverState::default();
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		self.ids.len()
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.ids.len());
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.ids.get(id)?;
		self.positions().get(&idx).copied()
	}

	fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn bounds(&self) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			});
		});
		bounds
	}

	/// Zoom and center so every node is visible.
	pub fn fit_view(&mut self) {
		self.camera = None;
		let Some(b) = self.bounds() else {
			return;
		};
		let (bw, bh) = (b.width() + 2.0 * FIT_PADDING, b.height() + 2.0 * FIT_PADDING);
		let k = (self.width / bw)
			.min(self.height / bh)
			.clamp(MIN_ZOOM, FIT_MAX_ZOOM);
		let (cx, cy) = ((b.min_x + b.max_x) / 2.0, (b.min_y + b.max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let reach = tier_radius(node.data.user_data.tier) + HIT_SLACK;
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	/// Pointer pressed at screen coordinates.
	pub fn press(&mut self, x: f64, y: f64) {
		self.camera = None;
		let hit = self.node_at_position(x, y);
		self.pan = PanState {
			active: hit.is_none(),
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
		if let Some(idx) = hit {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		}
	}

	/// Pointer moved while pressed or hovering.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			if (sx * sx + sy * sy).sqrt() > CLICK_TOLERANCE {
				self.drag.moved = true;
			}
			if !self.drag.moved {
				return;
			}
			// A fixed node passes the gesture on to the background.
			if !self.node_info(idx).is_some_and(|n| n.draggable) {
				self.pan_with_pointer(x, y);
				return;
			}
			let (dx, dy) = (sx / self.transform.k, sy / self.transform.k);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
				}
			});
		} else if self.pan.active {
			self.pan_with_pointer(x, y);
		}
	}

	fn pan_with_pointer(&mut self, x: f64, y: f64) {
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
	}

	/// Pointer released. Returns the id of a clicked node.
	pub fn release(&mut self) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.node_idx, self.drag.moved) {
			(true, Some(idx), false) => self.node_info(idx).map(|n| n.id),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom by one wheel notch around a screen point.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		self.camera = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// One zoom-button step around the middle of the view.
	pub fn zoom_step(&mut self, zoom_in: bool) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		self.zoom_at(cx, cy, if zoom_in { -1.0 } else { 1.0 });
	}

	/// Start moving the camera so `id` ends up in the middle of the view.
	/// Unknown ids are ignored.
	pub fn pan_to(&mut self, id: &str, duration: f64) {
		let Some((nx, ny)) = self.node_position(id) else {
			return;
		};
		let k = self.transform.k;
		self.camera = Some(CameraPan {
			from_x: self.transform.x,
			from_y: self.transform.y,
			to_x: self.width / 2.0 - nx * k,
			to_y: self.height / 2.0 - ny * k,
			elapsed: 0.0,
			duration: duration.max(f64::EPSILON),
		});
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around while it fades out.
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.flow_time += dt as f64;

		if let Some(cam) = self.camera.as_mut() {
			cam.elapsed += dt as f64;
			let t = ease_out_cubic((cam.elapsed / cam.duration).min(1.0));
			self.transform.x = cam.from_x + (cam.to_x - cam.from_x) * t;
			self.transform.y = cam.from_y + (cam.to_y - cam.from_y) * t;
			if cam.elapsed >= cam.duration {
				self.camera = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::{LayoutEdge, LayoutNode, Position};

	fn node(id: &str, x: f64, y: f64, tier: Tier, draggable: bool) -> LayoutNode {
		LayoutNode {
			id: id.into(),
			label: id.to_uppercase(),
			position: Position { x, y },
			tier,
			draggable,
		}
	}

	fn layout(draggable: bool) -> GraphLayout {
		GraphLayout {
			nodes: vec![
				node("a", 0.0, 0.0, Tier::Center, draggable),
				node("b", 250.0, 0.0, Tier::Level1, draggable),
				node("c", -250.0, 0.0, Tier::Level1, draggable),
			],
			edges: vec![
				LayoutEdge {
					id: "a-b".into(),
					source: "a".into(),
					target: "b".into(),
					kind: RelationshipKind::Suhbah,
					label: "Suhbah".into(),
				},
				LayoutEdge {
					id: "a-ghost".into(),
					source: "a".into(),
					target: "ghost".into(),
					kind: RelationshipKind::Family,
					label: "Family".into(),
				},
			],
		}
	}

	/// Identity transform keeps screen and graph coordinates equal.
	fn state(draggable: bool) -> GraphCanvasState {
		let mut state = GraphCanvasState::new(&layout(draggable), 800.0, 600.0);
		state.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		state
	}

	#[test]
	fn sync_skips_edges_to_missing_nodes() {
		let state = state(true);
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edges.len(), 1);
	}

	#[test]
	fn fit_view_centers_the_scene() {
		let state = GraphCanvasState::new(&layout(true), 800.0, 600.0);
		let (sx, sy) = (state.transform.x, state.transform.y);
		assert!((sx - 400.0).abs() < 1e-9);
		assert!((sy - 300.0).abs() < 1e-9);
		assert!(state.transform.k <= FIT_MAX_ZOOM);
		assert!(state.transform.k * (500.0 + 2.0 * FIT_PADDING) <= 800.0 + 1e-9);
	}

	#[test]
	fn press_and_release_in_place_is_a_click() {
		let mut state = state(true);
		state.press(251.0, 1.0);
		state.pointer_move(252.0, 2.0);
		assert_eq!(state.release(), Some("b".to_string()));
	}

	#[test]
	fn dragging_moves_draggable_nodes_and_is_not_a_click() {
		let mut state = state(true);
		state.press(250.0, 0.0);
		state.pointer_move(280.0, 40.0);
		assert_eq!(state.release(), None);
		let (x, y) = state.node_position("b").unwrap();
		assert!((x - 280.0).abs() < 1e-3 && (y - 40.0).abs() < 1e-3);
	}

	#[test]
	fn dragging_a_fixed_node_pans_the_view() {
		let mut state = state(false);
		state.press(250.0, 0.0);
		state.pointer_move(280.0, 40.0);
		assert_eq!(state.release(), None);
		assert_eq!(state.node_position("b"), Some((250.0, 0.0)));
		assert_eq!((state.transform.x, state.transform.y), (30.0, 40.0));
	}

	#[test]
	fn fixed_node_still_clicks() {
		let mut state = state(false);
		state.press(250.0, 0.0);
		state.pointer_move(251.0, 1.0);
		assert_eq!(state.release(), Some("b".to_string()));
		assert_eq!((state.transform.x, state.transform.y), (0.0, 0.0));
	}

	#[test]
	fn background_drag_pans() {
		let mut state = state(true);
		state.press(100.0, 100.0);
		state.pointer_move(130.0, 90.0);
		assert_eq!(state.release(), None);
		assert_eq!((state.transform.x, state.transform.y), (30.0, -10.0));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = state(true);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			state.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_buttons_keep_the_middle_fixed() {
		let mut state = state(true);
		let before = state.screen_to_graph(400.0, 300.0);
		state.zoom_step(true);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		state.zoom_step(false);
		state.zoom_step(false);
		assert!(state.transform.k < 1.0);
		let after = state.screen_to_graph(400.0, 300.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn fit_view_cancels_a_camera_pan() {
		let mut state = state(true);
		state.pan_to("b", 0.8);
		state.fit_view();
		assert!(state.camera.is_none());
		assert!((state.transform.x - 400.0).abs() < 1e-9);
	}

	#[test]
	fn camera_pan_lands_on_the_node() {
		let mut state = state(true);
		state.pan_to("b", 0.8);
		for _ in 0..60 {
			state.tick(0.016);
		}
		assert!(state.camera.is_none());
		assert!((state.transform.x - (400.0 - 250.0)).abs() < 1e-6);
		assert!((state.transform.y - 300.0).abs() < 1e-6);
	}

	#[test]
	fn unknown_pan_target_is_ignored() {
		let mut state = state(true);
		state.pan_to("nobody", 0.8);
		assert!(state.camera.is_none());
	}

	#[test]
	fn hover_collects_neighbours() {
		let mut state = state(true);
		state.pointer_move(0.0, 0.0);
		let hovered = state.hover.node.unwrap();
		assert!(state.is_hovered(hovered));
		assert_eq!(state.hover.neighbors.len(), 1);
		assert!(state.has_active_highlight());
	}
}
