//! Markov chain phrase learning and generation library.
//!
//! This crate provides a graph-based Markov chain over arbitrary symbols:
//! - Learning of phrases grouped into fixed-order tuples
//! - Weighted random generation, whole-phrase or one symbol at a time
//! - Length-bounded generation biased toward ending the phrase
//! - A sentence tokenizer and renderer for text corpora
//! - A lock-guarded handle for sharing one chain between threads

/// Chain graph, learning and generation.
pub mod model;

/// Chain and tokenizer configuration.
pub mod config;

/// Error type shared by every module.
pub mod error;

/// Corpus file helpers (reading, listing, path handling).
pub mod io;

pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use model::chain::{ChainStats, MarkovChain};
pub use model::sentence::{Tokenizer, render_sentence};
pub use model::shared::SharedChain;
