use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ChainError, Result};
use super::node::{Edge, HEADER, Node, NodeId, TRAILER};
use super::tuple::Tuple;

/// Storage of a Markov chain graph.
///
/// Nodes live in an arena addressed by their dense `NodeId`; edges are
/// `(target, weight)` pairs in each node's adjacency list, so cycles created
/// by repeated phrases need no shared ownership.
///
/// # Invariants
/// - Index 0 is the header and index 1 the trailer
/// - At most one node per distinct non-empty tuple
/// - The trailer never gets outgoing edges
#[derive(Clone, Debug)]
pub struct Graph<T> {
	/// Number of symbols grouped into one node.
	order: usize,

	/// All nodes, indexed by id.
	nodes: Vec<Node<T>>,

	/// Mapping from a tuple to the node that represents it.
	index: HashMap<Tuple<T>, NodeId>,

	/// Number of distinct edges created since the last clear.
	edge_count: usize,
}

impl<T: Clone + Eq + Hash> Graph<T> {
	/// Creates an empty graph holding only the sentinels.
	///
	/// # Errors
	/// Returns `ChainError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self {
			order,
			nodes: Self::sentinels(),
			index: HashMap::new(),
			edge_count: 0,
		})
	}

	fn sentinels() -> Vec<Node<T>> {
		vec![Node::new(HEADER, Tuple::empty()), Node::new(TRAILER, Tuple::empty())]
	}

	/// Forgets every node and edge. Fresh sentinels are created.
	pub fn clear(&mut self) {
		self.nodes = Self::sentinels();
		self.index.clear();
		self.edge_count = 0;
	}

	/// Finds the node representing `tuple`, or creates it with the next id.
	///
	/// # Errors
	/// Returns `ChainError::TupleTooLong` if the tuple exceeds the order.
	pub(crate) fn resolve(&mut self, tuple: Tuple<T>) -> Result<NodeId> {
		if tuple.len() > self.order {
			return Err(ChainError::TupleTooLong { length: tuple.len(), order: self.order });
		}
		if let Some(&id) = self.index.get(&tuple) {
			return Ok(id);
		}

		let id = self.nodes.len();
		self.nodes.push(Node::new(id, tuple.clone()));
		self.index.insert(tuple, id);
		Ok(id)
	}

	/// Adds weight to the edge `from -> to`, creating it if needed.
	pub(crate) fn promote(&mut self, from: NodeId, to: NodeId) {
		if self.nodes[from].promote(to) {
			self.edge_count += 1;
		}
	}

	/// Looks up the node id of a learned tuple.
	pub fn node_id(&self, tuple: &[T]) -> Option<NodeId> {
		self.index.get(tuple).copied()
	}

	/// Weight of the edge between two nodes, if it exists.
	pub fn weight(&self, from: NodeId, to: NodeId) -> Option<u32> {
		self.nodes.get(from)?.weight_to(to)
	}
}

impl<T> Graph<T> {
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of learned nodes, sentinels excluded.
	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	/// Number of nodes in the arena, sentinels included.
	pub fn total_node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
		self.nodes.get(id)
	}

	/// All nodes ordered by id, header and trailer first.
	pub fn nodes(&self) -> &[Node<T>] {
		&self.nodes
	}

	pub(crate) fn edges(&self, id: NodeId) -> &[Edge] {
		self.nodes.get(id).map(|node| node.edges.as_slice()).unwrap_or(&[])
	}
}
