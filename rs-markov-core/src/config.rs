//! Chain and tokenizer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};
use crate::model::sentence::{PUNCTUATION, Tokenizer};

/// Parameters fixed when a chain is created.
///
/// Every field has a default, so a JSON file only needs the values it
/// changes:
///
/// ```json
/// { "order": 2, "terminate_chars": ".!?" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
	/// Number of symbols grouped into one node.
	pub order: usize,
	/// Characters the tokenizer treats as word characters. `None` accepts
	/// any printable character.
	pub token_chars: Option<String>,
	/// Characters that end a word and close the current phrase.
	pub terminate_chars: Option<String>,
	/// Seed of the random generator. `None` seeds from the OS.
	pub seed: Option<u64>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			order: 1,
			token_chars: None,
			terminate_chars: Some(PUNCTUATION.to_owned()),
			seed: None,
		}
	}
}

impl ChainConfig {
	/// Loads a configuration from a JSON file.
	///
	/// # Errors
	/// I/O and parse errors, or `ChainError::Config` on invalid values.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let config: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(ChainError::Config("order must be >= 1".to_owned()));
		}
		Ok(())
	}

	/// Builds the tokenizer described by this configuration.
	pub fn tokenizer(&self) -> Tokenizer {
		Tokenizer::new(self.token_chars.clone(), self.terminate_chars.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_uses_defaults() {
		let config: ChainConfig = serde_json::from_str(r#"{ "order": 3 }"#).unwrap();
		assert_eq!(config.order, 3);
		assert_eq!(config.terminate_chars.as_deref(), Some(PUNCTUATION));
		assert_eq!(config.seed, None);
	}

	#[test]
	fn order_zero_is_invalid() {
		let config = ChainConfig { order: 0, ..ChainConfig::default() };
		assert!(matches!(config.validate(), Err(ChainError::Config(_))));
	}

	#[test]
	fn load_from_json_file() {
		let dir = std::env::temp_dir().join(format!("rs-markov-config-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();

		let valid = dir.join("valid.json");
		fs::write(&valid, r#"{ "order": 2, "terminate_chars": "!", "seed": 7 }"#).unwrap();
		let config = ChainConfig::from_json_file(&valid).unwrap();
		assert_eq!(config.order, 2);
		assert_eq!(config.terminate_chars.as_deref(), Some("!"));
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.token_chars, None);

		let broken = dir.join("broken.json");
		fs::write(&broken, "{ order: ").unwrap();
		assert!(matches!(ChainConfig::from_json_file(&broken), Err(ChainError::Json(_))));

		let zero = dir.join("zero.json");
		fs::write(&zero, r#"{ "order": 0 }"#).unwrap();
		assert!(matches!(ChainConfig::from_json_file(&zero), Err(ChainError::Config(_))));

		assert!(matches!(ChainConfig::from_json_file(dir.join("missing.json")), Err(ChainError::Io(_))));

		fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn tokenizer_follows_config() {
		let config = ChainConfig { terminate_chars: Some("!".to_owned()), ..ChainConfig::default() };
		let phrases = config.tokenizer().phrases("hi! there. you");
		assert_eq!(phrases.len(), 2);
		assert_eq!(phrases[1], vec!["there.", "you"]);
	}
}
