//! Neighborhood of an instance, derived from the graph's edge list.

use std::collections::HashSet;
use std::hash::Hash;

use crate::api::GraphEdge;

#[derive(Clone, Debug, PartialEq)]
pub struct Neighbor {
	pub neighbor: String,
	/// Mention ratio, as received.
	pub weight: f64,
}

/// One entry per edge touching `focal`, heaviest first. Equal weights keep edge order.
///
/// A self-loop yields a single entry naming `focal` itself.
pub fn derive_neighborhood(edges: &[GraphEdge], focal: &str) -> Vec<Neighbor> {
	let mut neighbors: Vec<Neighbor> = edges
		.iter()
		.filter_map(|edge| {
			let data = &edge.data;
			let neighbor = if data.source == focal {
				&data.target
			} else if data.target == focal {
				&data.source
			} else {
				return None;
			};
			Some(Neighbor {
				neighbor: neighbor.clone(),
				weight: data.weight,
			})
		})
		.collect();
	neighbors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
	neighbors
}

/// `focal` and every node sharing an edge with it, over `(source, target)` pairs.
pub fn closed_neighborhood<T: Copy + Eq + Hash>(
	edges: impl IntoIterator<Item = (T, T)>,
	focal: T,
) -> HashSet<T> {
	let mut ids = HashSet::from([focal]);
	for (source, target) in edges {
		if source == focal {
			ids.insert(target);
		} else if target == focal {
			ids.insert(source);
		}
	}
	ids
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::GraphEdgeData;

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

	fn neighbor(name: &str, weight: f64) -> Neighbor {
		Neighbor {
			neighbor: name.into(),
			weight,
		}
	}

	#[test]
	fn orders_by_descending_weight() {
		let edges = [edge("a", "c", 0.2), edge("a", "b", 0.5)];
		assert_eq!(
			derive_neighborhood(&edges, "a"),
			vec![neighbor("b", 0.5), neighbor("c", 0.2)]
		);
	}

	#[test]
	fn direction_does_not_matter() {
		let edges = [edge("b", "a", 0.1), edge("a", "c", 0.3), edge("b", "c", 0.9)];
		assert_eq!(
			derive_neighborhood(&edges, "a"),
			vec![neighbor("c", 0.3), neighbor("b", 0.1)]
		);
	}

	#[test]
	fn ties_keep_edge_order() {
		let edges = [edge("a", "z", 0.4), edge("y", "a", 0.4), edge("a", "x", 0.4)];
		let names: Vec<_> = derive_neighborhood(&edges, "a")
			.into_iter()
			.map(|n| n.neighbor)
			.collect();
		assert_eq!(names, ["z", "y", "x"]);
	}

	#[test]
	fn insular_instance_has_no_neighbors() {
		let edges = [edge("b", "c", 0.5)];
		assert!(derive_neighborhood(&edges, "a").is_empty());
		assert!(derive_neighborhood(&[], "a").is_empty());
	}

	#[test]
	fn self_loop_is_counted_once() {
		let edges = [edge("a", "a", 0.7), edge("a", "b", 0.1)];
		assert_eq!(
			derive_neighborhood(&edges, "a"),
			vec![neighbor("a", 0.7), neighbor("b", 0.1)]
		);
	}

	#[test]
	fn closed_neighborhood_includes_focal() {
		let edges = [edge("a", "b", 0.5), edge("c", "a", 0.2), edge("c", "d", 0.2)];
		let pairs = edges
			.iter()
			.map(|e| (e.data.source.as_str(), e.data.target.as_str()));
		assert_eq!(closed_neighborhood(pairs, "a"), HashSet::from(["a", "b", "c"]));
		assert_eq!(closed_neighborhood(Vec::<(u8, u8)>::new(), 7), HashSet::from([7]));
	}
}
