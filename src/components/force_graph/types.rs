use force_graph::DefaultNodeIdx;

use crate::api::GraphNodeData;

/// How node positions are decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
	/// Nodes stay at the positions the backend computed.
	#[default]
	Preset,
	/// Nodes start at their preset positions and are then simulated.
	Force,
}

/// Per-node payload stored in the engine.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	/// World-space radius, from the log user count.
	pub radius: f64,
	pub font_size: f64,
	pub color: &'static str,
	pub data: GraphNodeData,
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub weight: f64,
	/// World-space line width, from the mention ratio.
	pub width: f64,
}
