use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::error::Result;

/// Opens a corpus file for buffered, line by line reading.
///
/// Pair with `Tokenizer::learn_reader` to learn a corpus without holding
/// it in memory.
pub fn open_file<P: AsRef<Path>>(filename: P) -> Result<BufReader<File>> {
	Ok(BufReader::new(File::open(filename)?))
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"xml"` → `data/input.xml`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// `"./data/speeches.txt"` → `"speeches"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Returns file names only (no paths).
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/speeches.txt", "xml").unwrap();
		assert_eq!(path, PathBuf::from("data/speeches.xml"));
	}

	#[test]
	fn filename_without_extension() {
		assert_eq!(get_filename("./data/speeches.txt").unwrap(), "speeches");
	}

	#[test]
	fn open_and_list_corpus_files() {
		let dir = env::temp_dir().join(format!("rs-markov-io-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("b.txt"), "first line\n\n  second line  \r\n").unwrap();
		fs::write(dir.join("a.txt"), "x").unwrap();
		fs::write(dir.join("c.xml"), "<chain/>").unwrap();

		assert_eq!(list_files(&dir, "txt").unwrap(), vec!["a.txt", "b.txt"]);
		let lines: Vec<String> = io::BufRead::lines(open_file(dir.join("b.txt")).unwrap()).map(|line| line.unwrap()).collect();
		assert_eq!(lines, vec!["first line", "", "  second line  "]);
		assert!(open_file(dir.join("missing.txt")).is_err());

		fs::remove_dir_all(&dir).unwrap();
	}
}
