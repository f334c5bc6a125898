//! Top-level module for the Markov chain engine.
//!
//! - Symbol groups (`Tuple`) and graph vertices (`Node`)
//! - Tuple-keyed node storage (`Graph`)
//! - Learning and generation facade (`MarkovChain`)
//! - Shortest routes to the end of a phrase (`terminal`)
//! - Debug XML export, sentence tokenizer, shared handle

/// Learning, weighted generation and the gradual cursor.
pub mod chain;

/// XML debug export of a chain graph.
pub mod export;

/// Arena of nodes indexed by tuple.
pub mod graph;

/// Graph vertex, weighted edges and weighted selection.
pub mod node;

/// Text tokenizer feeding a chain of words, and sentence rendering.
pub mod sentence;

/// Thread-safe chain handle.
pub mod shared;

/// Terminal path length computation.
pub mod terminal;

/// Fixed-size ordered symbol group.
pub mod tuple;
