//! domtree - markup to DOM tree parser
//!
//! Parses a small, strict subset of HTML-like markup into an owned tree of
//! [`Node`]s and renders that tree as an indented debug dump.
//!
//! # Quick Start
//!
//! ```rust
//! use domtree::{parse, tree_dump};
//!
//! let root = parse("<div id='main'><p>hi</p></div>").expect("Parse failed");
//! assert_eq!(root.tag_name(), Some("div"));
//! print!("{}", tree_dump(&root));
//! ```
//!
//! # Grammar
//!
//! - Elements: `<name attr="value">children</name>`, names `[a-zA-Z0-9]+`
//! - Attribute values in single or double quotes
//! - Text: any run of characters other than `<`
//! - Only the space character counts as whitespace between nodes
//!
//! Self-closing tags, comments, doctypes and entities are not recognized,
//! and any violation fails the whole parse.

pub mod dom_node;
pub mod dom_parser;
pub mod input_stream;
pub mod parse_error;

// WASM bindings (only when compiling for wasm32)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export main API
pub use dom_node::{print_tree, tree_dump, write_tree, AttrMap, ElementData, Node};
pub use dom_parser::{parse, DomParser, SYNTHETIC_ROOT};
pub use parse_error::{ParseError, ParseResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
