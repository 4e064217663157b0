use std::collections::{BTreeMap, HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::scale::{edge_width, map_data, node_diameter};
use super::types::{EdgeInfo, Layout, NodeInfo};
use crate::api::GraphResponse;
use crate::color_scheme::ColorScheme;
use crate::config::DEFAULT_NODE_COLOR;
use crate::neighbors::closed_neighborhood;

/// Screen-space pick tolerance, so tiny nodes stay clickable when zoomed out.
pub const HIT_RADIUS: f64 = 6.0;
/// Edges of the selected node are drawn at least this wide.
pub const THICK_EDGE_WIDTH: f64 = 2.0;
pub const MIN_ZOOM: f64 = 0.03;
pub const MAX_ZOOM: f64 = 2.0;
pub const RESET_ZOOM: f64 = 0.2;
/// Labels smaller than this on screen are not drawn.
pub const MIN_ZOOMED_FONT_SIZE: f64 = 16.0;

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
	/// Largest distance the pointer moved since the button went down.
	pub travel: f64,
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

/// Owns the graph engine and the styling applied to it.
///
/// The `set_*` methods are idempotent: they diff against what was last
/// applied and return whether anything changed. Drawing happens on the next
/// animation frame, so a burst of updates is rendered once.
pub struct GraphViewState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub layout: Layout,
	edges: Vec<EdgeInfo>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	ranges: BTreeMap<String, [f64; 2]>,
	selected: Option<DefaultNodeIdx>,
	/// `None` shows everything; otherwise only these nodes are drawn.
	visible: Option<HashSet<DefaultNodeIdx>>,
	color_scheme: Option<ColorScheme>,
	show_edges: bool,
	search_results: HashSet<DefaultNodeIdx>,
	hovering_over: Option<DefaultNodeIdx>,
}

impl GraphViewState {
	pub fn new(response: &GraphResponse, layout: Layout, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		for node in &response.graph.nodes {
			let data = &node.data;
			let idx = graph.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: 10.0 + data.size as f32,
				is_anchor: layout == Layout::Preset,
				user_data: NodeInfo {
					id: data.id.clone(),
					label: data.label.clone(),
					radius: node_diameter(data.size) / 2.0,
					font_size: map_data(data.size, 1.0, 6.0, 10.0, 100.0),
					color: DEFAULT_NODE_COLOR,
					data: data.clone(),
				},
			});
			id_to_idx.insert(data.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for edge in &response.graph.edges {
			let data = &edge.data;
			let (Some(&source), Some(&target)) =
				(id_to_idx.get(&data.source), id_to_idx.get(&data.target))
			else {
				warn!(
					"dropping edge {} -> {}: unknown endpoint",
					data.source, data.target
				);
				continue;
			};
			graph.add_edge(source, target, EdgeData::default());
			edges.push(EdgeInfo {
				source,
				target,
				weight: data.weight,
				width: edge_width(data.weight),
			});
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: RESET_ZOOM,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			layout,
			edges,
			id_to_idx,
			ranges: response.metadata.ranges.clone(),
			selected: None,
			visible: None,
			color_scheme: None,
			show_edges: true,
			search_results: HashSet::new(),
			hovering_over: None,
		}
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = HIT_RADIUS / self.transform.k;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let idx = node.index();
			if !self.is_visible(idx) {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius.max(tolerance) {
				found = Some(idx);
			}
		});
		found
	}

	pub fn is_visible(&self, idx: DefaultNodeIdx) -> bool {
		self.visible.as_ref().is_none_or(|v| v.contains(&idx))
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	/// Whether `edge` touches the selected node.
	pub fn is_thick(&self, edge: &EdgeInfo) -> bool {
		self.selected
			.is_some_and(|s| edge.source == s || edge.target == s)
	}

	pub fn show_edges(&self) -> bool {
		self.show_edges
	}

	pub fn is_search_result(&self, idx: DefaultNodeIdx) -> bool {
		self.search_results.contains(&idx)
	}

	pub fn has_search_results(&self) -> bool {
		!self.search_results.is_empty()
	}

	pub fn is_hovering_over(&self, idx: DefaultNodeIdx) -> bool {
		self.hovering_over == Some(idx)
	}

	fn neighborhood_of(&self, idx: DefaultNodeIdx) -> HashSet<DefaultNodeIdx> {
		closed_neighborhood(self.edges.iter().map(|e| (e.source, e.target)), idx)
	}

	/// Selects the node with this id and hides everything outside its closed neighborhood.
	///
	/// Unknown ids clear the selection (an insular instance is not in the graph).
	pub fn set_selection(&mut self, id: Option<&str>) -> bool {
		let idx = id.and_then(|id| self.index_of(id));
		if idx == self.selected {
			return false;
		}
		self.selected = idx;
		self.visible = idx.map(|idx| self.neighborhood_of(idx));
		if let Some((x, y)) = idx.and_then(|idx| self.node_position(idx)) {
			self.center_on(x, y);
		}
		true
	}

	pub fn set_color_scheme(&mut self, scheme: Option<&ColorScheme>) -> bool {
		if self.color_scheme.as_ref() == scheme {
			return false;
		}
		self.color_scheme = scheme.cloned();
		let buckets = scheme.and_then(|s| s.buckets(&self.ranges));
		self.graph.visit_nodes_mut(|node| {
			let info = &mut node.data.user_data;
			info.color = scheme
				.and_then(|s| s.color_for(&info.data, buckets.as_ref()))
				.unwrap_or(DEFAULT_NODE_COLOR);
		});
		true
	}

	pub fn set_show_edges(&mut self, show: bool) -> bool {
		if self.show_edges == show {
			return false;
		}
		self.show_edges = show;
		true
	}

	pub fn set_search_results(&mut self, ids: &[String]) -> bool {
		let results: HashSet<_> = ids.iter().filter_map(|id| self.index_of(id)).collect();
		if results == self.search_results {
			return false;
		}
		self.search_results = results;
		true
	}

	pub fn set_hovering_over(&mut self, id: Option<&str>) -> bool {
		let idx = id.and_then(|id| self.index_of(id));
		if idx == self.hovering_over {
			return false;
		}
		self.hovering_over = idx;
		true
	}

	fn center_on(&mut self, x: f64, y: f64) {
		self.transform.x = self.width / 2.0 - x * self.transform.k;
		self.transform.y = self.height / 2.0 - y * self.transform.k;
	}

	/// Zooms out and centers on the selection, or on the origin.
	pub fn reset_position(&mut self) {
		self.transform.k = RESET_ZOOM;
		let (x, y) = self
			.selected
			.and_then(|idx| self.node_position(idx))
			.unwrap_or((0.0, 0.0));
		self.center_on(x, y);
	}

	/// Zooms by `factor` around a screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out
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
			self.hover.neighbors = self.neighborhood_of(idx);
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
		if self.layout == Layout::Force {
			self.graph.update(dt);
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
	use std::collections::BTreeMap;

	use super::*;
	use crate::api::{
		Graph, GraphEdge, GraphEdgeData, GraphMetadata, GraphNode, GraphNodeData, InstanceType,
		Position,
	};
	use crate::color_scheme::{insularity_color_scheme, type_color_scheme};
	use crate::config::{QUALITATIVE_COLOR_SCHEME, QUANTITATIVE_COLOR_SCHEME};

	fn node(id: &str, x: f64, y: f64, instance_type: InstanceType, insularity: f64) -> GraphNode {
		GraphNode {
			data: GraphNodeData {
				id: id.into(),
				label: id.into(),
				size: 2.0,
				instance_type: Some(instance_type),
				insularity: Some(insularity),
				statuses_per_day: None,
				statuses_per_user_per_day: None,
			},
			position: Position { x, y },
		}
	}

	fn edge(source: &str, target: &str, weight: f64) -> GraphEdge {
		GraphEdge {
			data: GraphEdgeData {
				id: None,
				source: source.into(),
				target: target.into(),
				weight,
			},
		}
	}

	/// a - b - c, plus a lone d and a dangling edge to nowhere.
	fn view() -> GraphViewState {
		let response = GraphResponse {
			graph: Graph {
				nodes: vec![
					node("a", 0.0, 0.0, InstanceType::Mastodon, 0.0),
					node("b", 100.0, 0.0, InstanceType::Pleroma, 0.5),
					node("c", 200.0, 0.0, InstanceType::Mastodon, 1.0),
					node("d", 0.0, 300.0, InstanceType::Misskey, 0.2),
				],
				edges: vec![
					edge("a", "b", 0.3),
					edge("b", "c", 0.1),
					edge("c", "nowhere", 0.9),
				],
			},
			metadata: GraphMetadata {
				ranges: BTreeMap::from([("insularity".to_string(), [0.0, 1.0])]),
			},
		};
		GraphViewState::new(&response, Layout::Preset, 800.0, 600.0)
	}

	fn color_of(view: &GraphViewState, id: &str) -> &'static str {
		let idx = view.index_of(id).unwrap();
		let mut color = "";
		view.graph.visit_nodes(|node| {
			if node.index() == idx {
				color = node.data.user_data.color;
			}
		});
		color
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let view = view();
		assert_eq!(view.node_count(), 4);
		assert_eq!(view.edges().len(), 2);
		let (a, b) = (view.index_of("a").unwrap(), view.index_of("b").unwrap());
		let kept = view
			.edges()
			.iter()
			.find(|e| (e.source, e.target) == (a, b) || (e.source, e.target) == (b, a));
		assert_eq!(kept.map(|e| e.weight), Some(0.3));
	}

	#[test]
	fn selection_hides_everything_outside_the_neighborhood() {
		let mut view = view();
		assert!(view.set_selection(Some("a")));
		let idx = |id| view.index_of(id).unwrap();

		assert!(view.is_selected(idx("a")));
		assert!(view.is_visible(idx("a")));
		assert!(view.is_visible(idx("b")));
		assert!(!view.is_visible(idx("c")));
		assert!(!view.is_visible(idx("d")));

		let thick: Vec<_> = view.edges().iter().filter(|e| view.is_thick(e)).collect();
		assert_eq!(thick.len(), 1);
		assert_eq!(thick[0].weight, 0.3);
	}

	#[test]
	fn selection_is_idempotent() {
		let mut view = view();
		assert!(view.set_selection(Some("b")));
		assert!(!view.set_selection(Some("b")));
		assert!(view.set_selection(None));
		assert!(!view.set_selection(None));
		assert!(view.is_visible(view.index_of("d").unwrap()));
		assert!(!view.set_selection(Some("not-in-graph")));
	}

	#[test]
	fn selecting_centers_the_node() {
		let mut view = view();
		view.set_selection(Some("c"));
		let (x, y) = view.screen_to_graph(400.0, 300.0);
		assert!((x - 200.0).abs() < 1e-9 && y.abs() < 1e-9);
	}

	#[test]
	fn color_schemes_recolor_nodes() {
		let mut view = view();
		assert_eq!(color_of(&view, "a"), DEFAULT_NODE_COLOR);

		assert!(view.set_color_scheme(Some(&type_color_scheme())));
		assert!(!view.set_color_scheme(Some(&type_color_scheme())));
		assert_eq!(color_of(&view, "a"), QUALITATIVE_COLOR_SCHEME[0]);
		assert_eq!(color_of(&view, "b"), QUALITATIVE_COLOR_SCHEME[1]);

		view.set_color_scheme(Some(&insularity_color_scheme()));
		assert_eq!(color_of(&view, "a"), QUANTITATIVE_COLOR_SCHEME[0]);
		assert_eq!(
			color_of(&view, "c"),
			QUANTITATIVE_COLOR_SCHEME[QUANTITATIVE_COLOR_SCHEME.len() - 1]
		);

		assert!(view.set_color_scheme(None));
		assert_eq!(color_of(&view, "c"), DEFAULT_NODE_COLOR);
	}

	#[test]
	fn edges_search_results_and_hover_diff() {
		let mut view = view();
		assert!(!view.set_show_edges(true));
		assert!(view.set_show_edges(false));
		assert!(!view.show_edges());

		assert!(view.set_search_results(&["b".into(), "zzz".into()]));
		assert!(!view.set_search_results(&["b".into()]));
		assert!(view.is_search_result(view.index_of("b").unwrap()));

		assert!(view.set_hovering_over(Some("d")));
		assert!(!view.set_hovering_over(Some("d")));
		assert!(view.is_hovering_over(view.index_of("d").unwrap()));
	}

	#[test]
	fn picks_nodes_under_the_pointer() {
		let mut view = view();
		view.reset_position();
		let b = view.index_of("b").unwrap();
		// b sits at world (100, 0); the origin is at the canvas center.
		let (sx, sy) = (400.0 + 100.0 * RESET_ZOOM, 300.0);
		assert_eq!(view.node_at_position(sx, sy), Some(b));
		assert_eq!(view.node_at_position(0.0, 0.0), None);

		view.set_selection(Some("d"));
		assert_eq!(view.node_at_position(sx, sy), None);
	}

	#[test]
	fn hover_collects_neighbors_and_fades() {
		let mut view = view();
		let b = view.index_of("b").unwrap();
		view.set_hover(Some(b));
		assert!(view.is_highlighted(view.index_of("a").unwrap()));
		assert!(view.is_highlighted(view.index_of("c").unwrap()));
		assert!(!view.is_highlighted(view.index_of("d").unwrap()));

		for _ in 0..200 {
			view.tick(0.016);
		}
		assert!(view.hover.highlight_t > 0.9);

		view.set_hover(None);
		assert!(view.is_hovered(b));
		for _ in 0..400 {
			view.tick(0.016);
		}
		assert!(!view.has_active_highlight());
	}

	#[test]
	fn zoom_is_clamped() {
		let mut view = view();
		for _ in 0..100 {
			view.zoom_at(10.0, 10.0, 1.1);
		}
		assert_eq!(view.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			view.zoom_at(10.0, 10.0, 0.9);
		}
		assert_eq!(view.transform.k, MIN_ZOOM);
	}
}
