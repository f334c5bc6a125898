use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::{ChainError, Result};
use super::chain::{ChainStats, MarkovChain};

/// Thread-safe handle to one `MarkovChain`.
///
/// Learning and generation may run on different threads against the same
/// chain. Every operation takes the chain lock for its own duration, so an
/// edge list is never observed half-updated. Use `with` when several calls
/// must happen without interleaving.
#[derive(Debug)]
pub struct SharedChain<T> {
	inner: Arc<Mutex<MarkovChain<T>>>,
}

impl<T> Clone for SharedChain<T> {
	fn clone(&self) -> Self {
		Self { inner: Arc::clone(&self.inner) }
	}
}

impl<T> SharedChain<T> {
	pub fn new(chain: MarkovChain<T>) -> Self {
		Self { inner: Arc::new(Mutex::new(chain)) }
	}

	/// Runs `f` with exclusive access to the chain.
	///
	/// # Errors
	/// `ChainError::LockPoisoned` if a previous holder panicked.
	pub fn with<R>(&self, f: impl FnOnce(&mut MarkovChain<T>) -> R) -> Result<R> {
		let mut chain = self.inner.lock().map_err(|_| ChainError::LockPoisoned)?;
		Ok(f(&mut chain))
	}

	pub fn stats(&self) -> Result<ChainStats> {
		self.with(|chain| chain.stats())
	}
}

impl<T: Clone + Eq + Hash> SharedChain<T> {
	pub fn add_phrase(&self, phrase: &[T]) -> Result<()> {
		self.with(|chain| chain.add_phrase(phrase))?
	}

	pub fn clear(&self) -> Result<()> {
		self.with(|chain| chain.clear())
	}

	pub fn reset(&self) -> Result<()> {
		self.with(|chain| chain.reset())
	}

	pub fn make_phrase(&self) -> Result<Vec<T>> {
		self.with(|chain| chain.make_phrase())?
	}

	pub fn make_bounded_phrase(&self, max_length: usize) -> Result<Vec<T>> {
		self.with(|chain| chain.make_bounded_phrase(max_length))?
	}

	pub fn next(&self) -> Result<Option<T>> {
		self.with(|chain| chain.next())?
	}

	pub fn next_loop(&self) -> Result<Option<T>> {
		self.with(|chain| chain.next_loop())?
	}

	pub fn next_bounded(&self, max_length: usize) -> Result<Option<T>> {
		self.with(|chain| chain.next_bounded(max_length))?
	}
}

impl<T: Clone + Eq + Hash + Display> SharedChain<T> {
	pub fn export_xml<W: Write>(&self, out: &mut W) -> Result<()> {
		self.with(|chain| chain.export_xml(out))?
	}
}

impl<T> From<MarkovChain<T>> for SharedChain<T> {
	fn from(chain: MarkovChain<T>) -> Self {
		Self::new(chain)
	}
}
