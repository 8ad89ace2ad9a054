//! HTML rendering of a Lexis live tree.
//!
//! Paragraphs become `<p>` blocks (an empty paragraph keeps a `<br>` so it
//! stays visible), text leaves become escaped runs. The default output is a
//! compact body fragment; an empty document renders as an empty string.

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{compile_to_html, escape_html, CompileError, CompileOptions};
