use thiserror::Error;

/// Errors raised while building or walking a Markov chain.
///
/// Configuration problems are reported at construction time. The
/// `TupleTooLong` and `WeightAccounting` variants mean the graph is broken:
/// they abort the current operation instead of producing a wrong phrase.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Tuple order must be at least 1.
	#[error("invalid tuple order {0}, must be >= 1")]
	InvalidOrder(usize),

	/// A learned tuple is longer than the configured order.
	#[error("invalid tuple length {length}, this chain uses order {order}")]
	TupleTooLong { length: usize, order: usize },

	/// Weighted selection did not land on any edge.
	#[error("weighted selection missed every edge (total weight {total}, draw {draw})")]
	WeightAccounting { total: u64, draw: u64 },

	/// Another thread panicked while holding the chain lock.
	#[error("chain lock poisoned")]
	LockPoisoned,

	/// Invalid configuration value.
	#[error("configuration error: {0}")]
	Config(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, ChainError>;
