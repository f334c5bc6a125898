use std::hash::Hash;

use log::{debug, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::ChainConfig;
use crate::error::Result;
use super::graph::Graph;
use super::node::{self, Edge, HEADER, NodeId, TRAILER};
use super::terminal::terminal_path_lengths;
use super::tuple::Tuple;

/// Where a generation cursor currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Position {
	/// Not seeded yet, the next call starts from the header.
	#[default]
	Start,
	At(NodeId),
	/// The walk stopped before the trailer (no selectable successor).
	Exhausted,
}

/// Resumable generation state used by the `next*` family.
#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
	position: Position,
	/// Index of the next symbol inside the current node's tuple.
	tuple_index: usize,
	/// Symbols emitted since the last reset. Survives loop boundaries.
	emitted: usize,
}

/// Counters describing the size of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChainStats {
	pub order: usize,
	pub node_count: usize,
	pub edge_count: usize,
}

/// A Markov chain over arbitrary symbols.
///
/// The `MarkovChain` learns phrases as paths `header -> tuples -> trailer`
/// and generates new phrases by weighted random walks over that graph.
///
/// # Responsibilities
/// - Split phrases into tuples of `order` symbols and accumulate transitions
/// - Generate whole phrases, optionally biased to end within a length budget
/// - Serve symbols one at a time through a persistent cursor
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - One node per distinct tuple, one edge per ordered pair of nodes
#[derive(Debug)]
pub struct MarkovChain<T> {
	graph: Graph<T>,
	rng: StdRng,
	cursor: Cursor,
}

impl<T: Clone + Eq + Hash> MarkovChain<T> {
	/// Creates an empty chain grouping `order` symbols per node.
	///
	/// The random generator is seeded from the operating system.
	///
	/// # Errors
	/// Returns `ChainError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		Ok(Self { graph: Graph::new(order)?, rng: StdRng::from_os_rng(), cursor: Cursor::default() })
	}

	/// Creates an empty chain with a reproducible random generator.
	pub fn with_seed(order: usize, seed: u64) -> Result<Self> {
		Ok(Self { graph: Graph::new(order)?, rng: StdRng::seed_from_u64(seed), cursor: Cursor::default() })
	}

	/// Creates an empty chain from a configuration.
	pub fn from_config(config: &ChainConfig) -> Result<Self> {
		match config.seed {
			Some(seed) => Self::with_seed(config.order, seed),
			None => Self::new(config.order),
		}
	}

	/// Forgets everything. The cursor is reset too.
	pub fn clear(&mut self) {
		debug!("Clearing chain ({} nodes, {} edges)", self.graph.node_count(), self.graph.edge_count());
		self.graph.clear();
		self.cursor = Cursor::default();
	}

	/// Moves the cursor back to the header and zeroes the emitted count.
	pub fn reset(&mut self) {
		self.cursor = Cursor::default();
	}

	/// Learns one phrase.
	///
	/// The phrase is consumed in groups of `order` symbols, each group
	/// becoming (or resolving to) one node. A final group shorter than the
	/// order still becomes its own node. Every transition along
	/// `header -> ... -> trailer` gains one unit of weight.
	///
	/// An empty phrase is ignored.
	pub fn add_phrase(&mut self, phrase: &[T]) -> Result<()> {
		if phrase.is_empty() {
			return Ok(());
		}

		let mut current = HEADER;
		for group in phrase.chunks(self.graph.order()) {
			let next = self.graph.resolve(Tuple::from(group))?;
			self.graph.promote(current, next);
			current = next;
		}
		self.graph.promote(current, TRAILER);

		debug!(
			"Learned phrase of {} symbols ({} nodes, {} edges)",
			phrase.len(),
			self.graph.node_count(),
			self.graph.edge_count()
		);
		Ok(())
	}

	/// Picks a successor of `id` by weighted random sampling.
	///
	/// Returns `Ok(None)` if the node has no outgoing edge.
	pub fn next_node(&mut self, id: NodeId) -> Result<Option<NodeId>> {
		node::choose(self.graph.edges(id), &mut self.rng)
	}

	/// Picks a successor of `id` among those closest to the trailer.
	///
	/// Only the successors whose terminal path length is minimal are kept;
	/// the choice between them is still weighted. Returns `Ok(None)` if the
	/// node has no edge or no successor can reach the trailer.
	pub fn next_terminal(&mut self, id: NodeId) -> Result<Option<NodeId>> {
		if self.graph.edges(id).is_empty() {
			return Ok(None);
		}
		let lengths = terminal_path_lengths(self.graph.nodes());
		self.choose_terminal(id, &lengths)
	}

	/// `next_terminal` with terminal path lengths computed by the caller.
	fn choose_terminal(&mut self, id: NodeId, lengths: &[Option<usize>]) -> Result<Option<NodeId>> {
		let edges = self.graph.edges(id);
		let Some(shortest) = edges.iter().filter_map(|edge| lengths[edge.target]).min() else {
			warn!("No successor of node {id} reaches the trailer");
			return Ok(None);
		};

		let candidates: Vec<Edge> = edges
			.iter()
			.filter(|edge| lengths[edge.target] == Some(shortest))
			.copied()
			.collect();
		trace!("Node {id}: {} candidate(s) at terminal distance {shortest}", candidates.len());

		node::choose(&candidates, &mut self.rng)
	}

	/// Generates a whole phrase by walking from the header to the trailer.
	///
	/// The walk also stops on a node without successors.
	pub fn make_phrase(&mut self) -> Result<Vec<T>> {
		let mut phrase = Vec::new();
		let mut current = self.next_node(HEADER)?;

		while let Some(id) = current {
			if id == TRAILER {
				break;
			}
			if let Some(node) = self.graph.node(id) {
				phrase.extend(node.tuple().iter().cloned());
			}
			current = self.next_node(id)?;
		}

		Ok(phrase)
	}

	/// Generates a whole phrase that heads for the trailer once
	/// `max_length` symbols have been produced.
	///
	/// Uses its own cursor, the persistent one is left untouched.
	/// A `max_length` of 0 means unbounded.
	pub fn make_bounded_phrase(&mut self, max_length: usize) -> Result<Vec<T>> {
		let mut cursor = Cursor::default();
		// The graph cannot change during the walk, lengths are computed once
		let mut lengths = None;
		let mut phrase = Vec::new();
		while let Some(symbol) = self.advance(&mut cursor, &mut lengths, false, max_length)? {
			phrase.push(symbol);
		}
		Ok(phrase)
	}

	/// Next symbol of the gradual phrase, `None` at the end of it.
	pub fn next(&mut self) -> Result<Option<T>> {
		self.next_with(false, 0)
	}

	/// Next symbol, starting a new phrase whenever the trailer is reached.
	pub fn next_loop(&mut self) -> Result<Option<T>> {
		self.next_with(true, 0)
	}

	/// Next symbol, heading for the trailer once `max_length` symbols have
	/// been emitted since the last reset.
	pub fn next_bounded(&mut self, max_length: usize) -> Result<Option<T>> {
		self.next_with(false, max_length)
	}

	/// Emits one symbol and moves the persistent cursor.
	///
	/// - `looping`: reseed from the header instead of ending at the trailer.
	/// - `max_length`: once reached, successors are chosen with
	///   `next_terminal`. 0 means unbounded. The count is cumulative across
	///   loops.
	///
	/// Returns `Ok(None)` at the end of the phrase (never when looping over
	/// a non-empty chain).
	pub fn next_with(&mut self, looping: bool, max_length: usize) -> Result<Option<T>> {
		let mut cursor = self.cursor;
		let symbol = self.advance(&mut cursor, &mut None, looping, max_length)?;
		self.cursor = cursor;
		Ok(symbol)
	}

	/// `lengths` caches the terminal path lengths for as long as the caller
	/// guarantees the graph does not change.
	fn advance(
		&mut self,
		cursor: &mut Cursor,
		lengths: &mut Option<Vec<Option<usize>>>,
		looping: bool,
		max_length: usize,
	) -> Result<Option<T>> {
		if cursor.position == Position::Start {
			self.step(cursor, lengths, HEADER, max_length)?;
		}

		if matches!(cursor.position, Position::At(TRAILER) | Position::Exhausted) {
			if !looping {
				return Ok(None);
			}
			self.step(cursor, lengths, HEADER, max_length)?;
		}

		let Position::At(id) = cursor.position else {
			return Ok(None);
		};
		let Some(node) = self.graph.node(id) else {
			return Ok(None);
		};
		let Some(symbol) = node.tuple().get(cursor.tuple_index).cloned() else {
			// Sentinel reached right after a reseed (empty chain)
			return Ok(None);
		};
		let size = node.len();

		cursor.tuple_index += 1;
		cursor.emitted += 1;

		if cursor.tuple_index >= size {
			self.step(cursor, lengths, id, max_length)?;
		}

		Ok(Some(symbol))
	}

	/// Moves `cursor` to a successor of `from`.
	fn step(
		&mut self,
		cursor: &mut Cursor,
		lengths: &mut Option<Vec<Option<usize>>>,
		from: NodeId,
		max_length: usize,
	) -> Result<()> {
		let next = if max_length > 0 && cursor.emitted >= max_length {
			let lengths = lengths.get_or_insert_with(|| terminal_path_lengths(self.graph.nodes()));
			self.choose_terminal(from, lengths)?
		} else {
			self.next_node(from)?
		};

		cursor.position = next.map_or(Position::Exhausted, Position::At);
		cursor.tuple_index = 0;
		Ok(())
	}

	/// Weight of the transition between two learned tuples.
	pub fn weight_between(&self, from: &[T], to: &[T]) -> Option<u32> {
		self.graph.weight(self.graph.node_id(from)?, self.graph.node_id(to)?)
	}

	/// Weight of the transition from the header to a learned tuple.
	pub fn start_weight(&self, to: &[T]) -> Option<u32> {
		self.graph.weight(HEADER, self.graph.node_id(to)?)
	}

	/// Weight of the transition from a learned tuple to the trailer.
	pub fn end_weight(&self, from: &[T]) -> Option<u32> {
		self.graph.weight(self.graph.node_id(from)?, TRAILER)
	}
}

impl<T> MarkovChain<T> {
	pub fn order(&self) -> usize {
		self.graph.order()
	}

	/// Number of learned nodes, sentinels excluded.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			order: self.graph.order(),
			node_count: self.graph.node_count(),
			edge_count: self.graph.edge_count(),
		}
	}

	/// Read-only access to the underlying graph.
	pub fn graph(&self) -> &Graph<T> {
		&self.graph
	}
}
