use std::borrow::Borrow;
use std::fmt;

/// An ordered group of symbols learned as one unit.
///
/// Every learned node is keyed by the `Tuple` it represents. Two tuples are
/// equal when they have the same length and equal elements, so the graph
/// index can be probed directly with a `&[T]` thanks to `Borrow<[T]>`.
///
/// # Invariants
/// - The empty tuple is only ever carried by the header and trailer.
/// - A learned tuple never exceeds the chain order. It may be shorter when
///   it closes a phrase whose length is not a multiple of the order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple<T>(Vec<T>);

impl<T> Tuple<T> {
	/// Creates the empty tuple used by the sentinels.
	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.0.get(index)
	}

	pub fn as_slice(&self) -> &[T] {
		&self.0
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.0.iter()
	}
}

impl<T> From<Vec<T>> for Tuple<T> {
	fn from(symbols: Vec<T>) -> Self {
		Self(symbols)
	}
}

impl<T: Clone> From<&[T]> for Tuple<T> {
	fn from(symbols: &[T]) -> Self {
		Self(symbols.to_vec())
	}
}

impl<T> Borrow<[T]> for Tuple<T> {
	fn borrow(&self) -> &[T] {
		self.as_slice()
	}
}

/// Renders as `[a, b, c]`.
impl<T: fmt::Display> fmt::Display for Tuple<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, symbol) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{symbol}")?;
		}
		f.write_str("]")
	}
}
