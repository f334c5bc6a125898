use rand::Rng;

use crate::error::{ChainError, Result};
use super::tuple::Tuple;

/// Dense identifier of a node, also its index in the graph arena.
pub type NodeId = usize;

/// Node every phrase starts from.
pub const HEADER: NodeId = 0;

/// Node every phrase ends on. It never has outgoing edges.
pub const TRAILER: NodeId = 1;

/// A weighted transition toward another node.
///
/// The weight counts how many times the transition was learned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub target: NodeId,
	pub weight: u32,
}

/// Represents one distinct tuple of a Markov chain.
///
/// Conceptually, this is a vertex of the chain graph where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning (`promote`)
/// - Expose its outgoing edges for weighted selection
///
/// ## Invariants
/// - At most one edge per target
/// - Each edge weight is strictly positive
#[derive(Clone, Debug)]
pub struct Node<T> {
	pub(crate) id: NodeId,
	pub(crate) tuple: Tuple<T>,
	pub(crate) edges: Vec<Edge>,
}

impl<T> Node<T> {
	pub(crate) fn new(id: NodeId, tuple: Tuple<T>) -> Self {
		Self { id, tuple, edges: Vec::new() }
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn tuple(&self) -> &Tuple<T> {
		&self.tuple
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Number of symbols carried by this node.
	pub fn len(&self) -> usize {
		self.tuple.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tuple.is_empty()
	}

	/// Sentinels carry no data and end the terminal path search.
	pub fn is_terminal(&self) -> bool {
		self.tuple.is_empty()
	}

	/// Sum of all outgoing edge weights.
	pub fn total_weight(&self) -> u64 {
		self.edges.iter().map(|edge| u64::from(edge.weight)).sum()
	}

	/// Weight of the edge toward `target`, if any.
	pub fn weight_to(&self, target: NodeId) -> Option<u32> {
		self.edges.iter().find(|edge| edge.target == target).map(|edge| edge.weight)
	}

	/// Records one more occurrence of the transition toward `target`.
	///
	/// - If the edge already exists, its weight is increased.
	/// - Otherwise a new edge is appended with a weight of 1.
	///
	/// Returns `true` when a new edge was created.
	pub(crate) fn promote(&mut self, target: NodeId) -> bool {
		if let Some(edge) = self.edges.iter_mut().find(|edge| edge.target == target) {
			edge.weight = edge.weight.saturating_add(1);
			return false;
		}
		self.edges.push(Edge { target, weight: 1 });
		true
	}
}

/// Picks one edge target using weighted random sampling.
///
/// A uniform draw `r` in `[0, total)` is compared against the running sum
/// of weights; the first edge whose cumulative weight exceeds `r` wins, so an
/// edge of weight `w` is picked with probability `w / total`.
///
/// Returns `Ok(None)` when there is no edge to choose from.
///
/// # Errors
/// `ChainError::WeightAccounting` if the draw falls past every edge.
pub(crate) fn choose<R: Rng>(edges: &[Edge], rng: &mut R) -> Result<Option<NodeId>> {
	let total: u64 = edges.iter().map(|edge| u64::from(edge.weight)).sum();
	if total == 0 {
		return Ok(None);
	}

	let draw = rng.random_range(0..total);

	let mut seen = 0u64;
	for edge in edges {
		seen += u64::from(edge.weight);
		if draw < seen {
			return Ok(Some(edge.target));
		}
	}

	Err(ChainError::WeightAccounting { total, draw })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn promote_increments_existing_edge() {
		let mut node: Node<&str> = Node::new(2, Tuple::from(vec!["a"]));
		assert!(node.promote(3));
		assert!(!node.promote(3));
		assert!(node.promote(TRAILER));

		assert_eq!(node.edges().len(), 2);
		assert_eq!(node.weight_to(3), Some(2));
		assert_eq!(node.weight_to(TRAILER), Some(1));
		assert_eq!(node.total_weight(), 3);
	}

	#[test]
	fn choose_without_edges() {
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(choose(&[], &mut rng), Ok(None)));
	}

	#[test]
	fn choose_single_edge_is_deterministic() {
		let mut rng = StdRng::seed_from_u64(1);
		let edges = [Edge { target: 5, weight: 9 }];
		for _ in 0..100 {
			assert_eq!(choose(&edges, &mut rng).unwrap(), Some(5));
		}
	}

	#[test]
	fn choose_follows_weights() {
		let mut rng = StdRng::seed_from_u64(42);
		let edges = [Edge { target: 2, weight: 1 }, Edge { target: 3, weight: 3 }];

		let mut hits = [0usize; 2];
		for _ in 0..40_000 {
			match choose(&edges, &mut rng).unwrap() {
				Some(2) => hits[0] += 1,
				Some(3) => hits[1] += 1,
				other => panic!("unexpected choice {other:?}"),
			}
		}

		let ratio = hits[1] as f64 / hits[0] as f64;
		assert!((2.7..3.3).contains(&ratio), "ratio was {ratio}");
	}
}
