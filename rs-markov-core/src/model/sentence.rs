use std::io::BufRead;

use log::debug;

use crate::error::Result;
use super::chain::MarkovChain;

/// Characters accepted as word characters by `Tokenizer::alphanumeric`.
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default phrase terminators.
pub const PUNCTUATION: &str = ";.?!";

/// Splits raw text into phrases of lower-cased words.
///
/// # Behavior
/// - Whitespace ends the current word.
/// - A terminator character is kept at the end of the current word, ends it
///   and closes the phrase. A terminator with nothing before it in the
///   phrase is dropped.
/// - A token character extends the current word. When no token set is
///   configured, any non-control character is a token character.
/// - Any other character ends the current word and is dropped.
/// - Whatever remains at the end of the input forms the last phrase.
#[derive(Clone, Debug, Default)]
pub struct Tokenizer {
	token_chars: Option<String>,
	terminate_chars: Option<String>,
}

impl Tokenizer {
	pub fn new(token_chars: Option<String>, terminate_chars: Option<String>) -> Self {
		Self {
			token_chars: token_chars.filter(|s| !s.is_empty()),
			terminate_chars: terminate_chars.filter(|s| !s.is_empty()),
		}
	}

	/// Letters and digits only, phrases closed by `PUNCTUATION`.
	pub fn alphanumeric() -> Self {
		Self::new(Some(ALPHANUMERIC.to_owned()), Some(PUNCTUATION.to_owned()))
	}

	fn is_terminator(&self, c: char) -> bool {
		self.terminate_chars.as_deref().is_some_and(|chars| chars.contains(c))
	}

	fn is_token_char(&self, c: char) -> bool {
		match self.token_chars.as_deref() {
			Some(chars) => chars.contains(c),
			None => !c.is_control(),
		}
	}

	/// Splits `text` into phrases.
	pub fn phrases(&self, text: &str) -> Vec<Vec<String>> {
		let mut splitter = Splitter::new(self);
		let mut phrases: Vec<Vec<String>> = text.chars().filter_map(|c| splitter.feed(c)).collect();
		phrases.extend(splitter.finish());
		phrases
	}

	/// Learns every phrase of `text` into `chain`.
	///
	/// Returns the number of phrases learned.
	pub fn learn(&self, chain: &mut MarkovChain<String>, text: &str) -> Result<usize> {
		let phrases = self.phrases(text);
		for phrase in &phrases {
			chain.add_phrase(phrase)?;
		}
		debug!("Tokenizer learned {} phrase(s)", phrases.len());
		Ok(phrases.len())
	}

	/// Learns a corpus line by line without loading it whole.
	///
	/// Line breaks are whitespace, so a phrase may span several lines. Each
	/// phrase is learned as soon as its terminator is read.
	///
	/// Returns the number of phrases learned.
	pub fn learn_reader<R: BufRead>(&self, chain: &mut MarkovChain<String>, mut reader: R) -> Result<usize> {
		let mut splitter = Splitter::new(self);
		let mut line = String::new();
		let mut learned = 0;

		while reader.read_line(&mut line)? > 0 {
			for c in line.chars() {
				if let Some(phrase) = splitter.feed(c) {
					chain.add_phrase(&phrase)?;
					learned += 1;
				}
			}
			line.clear();
		}
		if let Some(phrase) = splitter.finish() {
			chain.add_phrase(&phrase)?;
			learned += 1;
		}

		debug!("Tokenizer learned {learned} phrase(s) from reader");
		Ok(learned)
	}
}

/// Character-at-a-time state of a `Tokenizer`.
struct Splitter<'a> {
	tokenizer: &'a Tokenizer,
	phrase: Vec<String>,
	word: String,
}

impl<'a> Splitter<'a> {
	fn new(tokenizer: &'a Tokenizer) -> Self {
		Self { tokenizer, phrase: Vec::new(), word: String::new() }
	}

	/// Consumes one character, returns the phrase it closed if any.
	fn feed(&mut self, c: char) -> Option<Vec<String>> {
		if c.is_whitespace() {
			self.push_word();
		} else if self.tokenizer.is_terminator(c) {
			if self.word.is_empty() && self.phrase.is_empty() {
				return None;
			}
			self.word.push(c);
			self.push_word();
			return self.take_phrase();
		} else if self.tokenizer.is_token_char(c) {
			self.word.push(c);
		} else {
			self.push_word();
		}
		None
	}

	/// Closes whatever is left at the end of the input.
	fn finish(mut self) -> Option<Vec<String>> {
		self.push_word();
		self.take_phrase()
	}

	fn push_word(&mut self) {
		if !self.word.is_empty() {
			self.phrase.push(self.word.to_lowercase());
			self.word.clear();
		}
	}

	fn take_phrase(&mut self) -> Option<Vec<String>> {
		(!self.phrase.is_empty()).then(|| std::mem::take(&mut self.phrase))
	}
}

/// Joins words with single spaces and capitalizes the first one.
pub fn render_sentence(words: &[String]) -> String {
	let mut sentence = String::new();
	for (i, word) in words.iter().enumerate() {
		if i == 0 {
			let mut chars = word.chars();
			if let Some(first) = chars.next() {
				sentence.extend(first.to_uppercase());
				sentence.push_str(chars.as_str());
			}
		} else {
			sentence.push(' ');
			sentence.push_str(word);
		}
	}
	sentence
}

impl MarkovChain<String> {
	/// Generates a phrase and renders it as a sentence.
	pub fn make_sentence(&mut self) -> Result<String> {
		Ok(render_sentence(&self.make_phrase()?))
	}

	/// Generates a length-biased phrase and renders it as a sentence.
	pub fn make_bounded_sentence(&mut self, max_length: usize) -> Result<String> {
		Ok(render_sentence(&self.make_bounded_phrase(max_length)?))
	}
}
