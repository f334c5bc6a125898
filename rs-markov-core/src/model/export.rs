//! Debug export of a chain graph as XML.
//!
//! The output lists the header, every learned node in id order and the
//! trailer, each with its outgoing edges:
//!
//! ```text
//! <chain order='1'>
//! 	<header id='0'>
//! 		<edge id='2' weight='1' />
//! 	</header>
//! 	<node id='2'>
//! 		[foo]
//! 		<edge trailer='true' weight='1' />
//! 	</node>
//! 	<trailer id='1'>
//! 	</trailer>
//! </chain>
//! ```
//!
//! It is meant for inspection only and cannot be loaded back.

use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use super::chain::MarkovChain;
use super::graph::Graph;
use super::node::{HEADER, Node, TRAILER};

impl<T: Display> Graph<T> {
	/// Writes the whole graph to `out`.
	pub fn export_xml<W: Write>(&self, out: &mut W) -> Result<()> {
		writeln!(out, "<chain order='{}'>", self.order())?;
		// The trailer goes last so the output reads in phrase order
		for node in self.nodes().iter().filter(|node| node.id() != TRAILER) {
			let name = if node.id() == HEADER { "header" } else { "node" };
			write_node(out, name, node)?;
		}
		if let Some(trailer) = self.node(TRAILER) {
			write_node(out, "trailer", trailer)?;
		}
		writeln!(out, "</chain>")?;
		Ok(())
	}
}

impl<T: Clone + Eq + Hash + Display> MarkovChain<T> {
	/// Writes the chain graph as XML to `out`.
	pub fn export_xml<W: Write>(&self, out: &mut W) -> Result<()> {
		self.graph().export_xml(out)
	}

	/// Writes the chain graph as XML to a file, replacing it if it exists.
	pub fn export_xml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let mut out = BufWriter::new(File::create(path)?);
		self.export_xml(&mut out)?;
		out.flush()?;
		Ok(())
	}
}

fn write_node<T: Display, W: Write>(out: &mut W, name: &str, node: &Node<T>) -> Result<()> {
	writeln!(out, "\t<{name} id='{}'>", node.id())?;
	if !node.is_empty() {
		writeln!(out, "\t\t{}", escape(&node.tuple().to_string()))?;
	}
	for edge in node.edges() {
		if edge.target == TRAILER {
			writeln!(out, "\t\t<edge trailer='true' weight='{}' />", edge.weight)?;
		} else {
			writeln!(out, "\t\t<edge id='{}' weight='{}' />", edge.target, edge.weight)?;
		}
	}
	writeln!(out, "\t</{name}>")?;
	Ok(())
}

fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'\'' => escaped.push_str("&apos;"),
			'"' => escaped.push_str("&quot;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;

	fn export(chain: &MarkovChain<&'static str>) -> String {
		let mut buffer = Vec::new();
		chain.export_xml(&mut buffer).unwrap();
		String::from_utf8(buffer).unwrap()
	}

	#[test]
	fn empty_chain() {
		let chain = MarkovChain::<&str>::with_seed(1, 0).unwrap();
		assert_eq!(
			export(&chain),
			"<chain order='1'>\n\t<header id='0'>\n\t</header>\n\t<trailer id='1'>\n\t</trailer>\n</chain>\n"
		);
	}

	#[test]
	fn nodes_and_edges() {
		let mut chain = MarkovChain::with_seed(1, 0).unwrap();
		chain.add_phrase(&["foo", "b<r"]).unwrap();
		chain.add_phrase(&["foo"]).unwrap();

		let expected = "<chain order='1'>\n\
			\t<header id='0'>\n\
			\t\t<edge id='2' weight='2' />\n\
			\t</header>\n\
			\t<node id='2'>\n\
			\t\t[foo]\n\
			\t\t<edge id='3' weight='1' />\n\
			\t\t<edge trailer='true' weight='1' />\n\
			\t</node>\n\
			\t<node id='3'>\n\
			\t\t[b&lt;r]\n\
			\t\t<edge trailer='true' weight='1' />\n\
			\t</node>\n\
			\t<trailer id='1'>\n\
			\t</trailer>\n\
			</chain>\n";
		assert_eq!(export(&chain), expected);
	}
}
