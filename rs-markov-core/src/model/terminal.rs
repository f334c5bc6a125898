//! Terminal path lengths: how many hops separate a node from the end of a
//! phrase.
//!
//! A node's terminal path length is the hop count of the shortest path from
//! it to a terminal (data-less) node that never visits a node twice. Since a
//! shortest path never repeats a node, a breadth-first search guarded by a
//! visited bitmap gives the same answer as enumerating cycle-free paths,
//! without the exponential blow-up on heavily cyclic chains.
//!
//! The bitmap belongs to each call and is sized to the node count; nothing
//! is stored on the nodes themselves.

use std::collections::VecDeque;

use super::node::{Node, NodeId};

/// Shortest cycle-free hop count from `from` to a terminal node.
///
/// Returns `Some(0)` for a terminal node and `None` when no terminal node
/// can be reached (or `from` is unknown).
pub fn terminal_path_length<T>(nodes: &[Node<T>], from: NodeId) -> Option<usize> {
	let start = nodes.get(from)?;
	if start.is_terminal() {
		return Some(0);
	}

	let mut visited = vec![false; nodes.len()];
	let mut queue = VecDeque::new();
	visited[from] = true;
	queue.push_back((from, 0usize));

	while let Some((id, distance)) = queue.pop_front() {
		for edge in &nodes[id].edges {
			let Some(next) = nodes.get(edge.target) else { continue };
			if visited[next.id] {
				continue;
			}
			if next.is_terminal() {
				return Some(distance + 1);
			}
			visited[next.id] = true;
			queue.push_back((next.id, distance + 1));
		}
	}

	None
}

/// Terminal path length of every node, indexed by id.
///
/// Runs a single backward search from all terminal nodes, so the cost is
/// linear in the size of the graph.
pub fn terminal_path_lengths<T>(nodes: &[Node<T>]) -> Vec<Option<usize>> {
	let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); nodes.len()];
	for node in nodes {
		for edge in &node.edges {
			if let Some(list) = predecessors.get_mut(edge.target) {
				list.push(node.id);
			}
		}
	}

	let mut lengths = vec![None; nodes.len()];
	let mut queue = VecDeque::new();
	for node in nodes.iter().filter(|node| node.is_terminal()) {
		lengths[node.id] = Some(0);
		queue.push_back(node.id);
	}

	while let Some(id) = queue.pop_front() {
		let distance = lengths[id].unwrap_or(0);
		for &previous in &predecessors[id] {
			if lengths[previous].is_none() {
				lengths[previous] = Some(distance + 1);
				queue.push_back(previous);
			}
		}
	}

	lengths
}
