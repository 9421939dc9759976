//! Recursive descent parser for the markup subset
//!
//! Grammar, with `S` standing for a run of ASCII spaces:
//!
//! ```text
//! document   = nodes
//! nodes      = (S? node)* S?          stops at end of input or at "</"
//! node       = element | text
//! element    = "<" name attributes ">" nodes "</" name ">"
//! attributes = (S? name? "=" value)* S?
//! value      = '"' [^"]* '"' | "'" [^']* "'"
//! text       = [^<]+
//! name       = [a-zA-Z0-9]+
//! ```
//!
//! The parser never backtracks: one character of lookahead (plus the `"</"`
//! check in `nodes`) decides every branch. The first violation aborts the
//! whole parse.

use crate::dom_node::{AttrMap, Node};
use crate::input_stream::InputStream;
use crate::parse_error::{ParseError, ParseResult};

/// Tag name of the element synthesized around multiple (or zero) top-level nodes
pub const SYNTHETIC_ROOT: &str = "html";

/// Parse a whole document into a single rooted tree.
///
/// A document whose only top-level node is an element returns that element.
/// Anything else (several siblings, a lone text run, nothing at all) is
/// wrapped in an `html` element without attributes.
pub fn parse(source: &str) -> ParseResult<Node> {
    DomParser::new(source).parse_document()
}

fn is_tag_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// An element whose opening tag has been read but whose closing tag has not
struct OpenElement {
    tag_name: String,
    attributes: AttrMap,
    /// Siblings that precede this element in its parent
    siblings: Vec<Node>,
}

/// Grammar rules over a cursor for one document
#[derive(Debug)]
pub struct DomParser {
    stream: InputStream,
}

impl DomParser {
    /// Create a parser positioned at the start of `source`
    pub fn new(source: &str) -> Self {
        DomParser {
            stream: InputStream::new(source),
        }
    }

    /// Parse the remaining input as a document, consuming the parser
    pub fn parse_document(mut self) -> ParseResult<Node> {
        let nodes = self.parse_nodes()?;
        tracing::debug!(
            top_level = nodes.len(),
            length = self.stream.len(),
            "document parsed"
        );

        // Only a lone element can stand as the root; a lone text run is
        // wrapped like any other sibling list.
        match <[Node; 1]>::try_from(nodes) {
            Ok([root @ Node::Element(_)]) => Ok(root),
            Ok([text]) => Ok(Node::element(SYNTHETIC_ROOT, None, vec![text])),
            Err(nodes) => Ok(Node::element(SYNTHETIC_ROOT, None, nodes)),
        }
    }

    /// Parse a run of tag-name characters; may be empty
    pub fn parse_tag_name(&mut self) -> String {
        self.stream.consume_while(is_tag_name_char)
    }

    /// Parse a single node: an element if the next character is `<`, text otherwise
    pub fn parse_node(&mut self) -> ParseResult<Node> {
        if self.stream.peek_char()? == '<' {
            self.parse_element()
        } else {
            Ok(self.parse_text())
        }
    }

    /// Parse a text node up to the next `<` or end of input
    pub fn parse_text(&mut self) -> Node {
        Node::text(self.stream.consume_while(|ch| ch != '<'))
    }

    /// Parse an element with its attributes, children and closing tag
    pub fn parse_element(&mut self) -> ParseResult<Node> {
        let (tag_name, attributes) = self.parse_open_tag()?;
        let children = self.parse_nodes()?;
        self.parse_close_tag(&tag_name)?;
        Ok(Node::element(tag_name, Some(attributes), children))
    }

    /// Parse sibling nodes until end of input or a closing tag.
    ///
    /// Nested elements are tracked on an explicit stack rather than by
    /// recursion, so nesting depth is bounded by memory only.
    pub fn parse_nodes(&mut self) -> ParseResult<Vec<Node>> {
        let mut open: Vec<OpenElement> = Vec::new();
        let mut nodes = Vec::new();
        loop {
            self.stream.consume_whitespace();
            if self.stream.is_eof() || self.stream.starts_with("</") {
                let Some(element) = open.pop() else {
                    return Ok(nodes);
                };
                self.parse_close_tag(&element.tag_name)?;
                let children = std::mem::replace(&mut nodes, element.siblings);
                nodes.push(Node::element(
                    element.tag_name,
                    Some(element.attributes),
                    children,
                ));
            } else if self.stream.peek_char()? == '<' {
                let (tag_name, attributes) = self.parse_open_tag()?;
                open.push(OpenElement {
                    tag_name,
                    attributes,
                    siblings: std::mem::take(&mut nodes),
                });
            } else {
                nodes.push(self.parse_text());
            }
        }
    }

    /// Parse `<name attributes>`, rejecting an empty tag name
    fn parse_open_tag(&mut self) -> ParseResult<(String, AttrMap)> {
        self.stream.expect_char('<')?;
        let position = self.stream.position();
        let tag_name = self.parse_tag_name();
        if tag_name.is_empty() {
            return Err(ParseError::UnexpectedChar {
                expected: "tag name".to_string(),
                actual: self.stream.peek_char()?,
                position,
            });
        }
        let attributes = self.parse_attributes()?;
        self.stream.expect_char('>')?;
        Ok((tag_name, attributes))
    }

    /// Parse `</name>` and check it closes `open_tag`
    fn parse_close_tag(&mut self, open_tag: &str) -> ParseResult<()> {
        self.stream.expect_char('<')?;
        self.stream.expect_char('/')?;
        let position = self.stream.position();
        let close_tag = self.parse_tag_name();
        if close_tag != open_tag {
            return Err(ParseError::MismatchedClosingTag {
                expected: open_tag.to_string(),
                found: close_tag,
                position,
            });
        }
        self.stream.expect_char('>')
    }

    /// Parse attributes up to (not including) the `>` that ends an opening tag
    pub fn parse_attributes(&mut self) -> ParseResult<AttrMap> {
        let mut attributes = AttrMap::new();
        loop {
            self.stream.consume_whitespace();
            if self.stream.peek_char()? == '>' {
                break;
            }
            let (name, value) = self.parse_attr()?;
            attributes.insert(name, value);
        }
        Ok(attributes)
    }

    /// Parse one `name=value` pair
    pub fn parse_attr(&mut self) -> ParseResult<(String, String)> {
        let name = self.parse_tag_name();
        self.stream.expect_char('=')?;
        let value = self.parse_attr_value()?;
        Ok((name, value))
    }

    /// Parse a single- or double-quoted value, returning it without quotes
    pub fn parse_attr_value(&mut self) -> ParseResult<String> {
        let position = self.stream.position();
        let quote = self.stream.consume_char()?;
        if quote != '"' && quote != '\'' {
            return Err(ParseError::UnexpectedChar {
                expected: "quote (' or \")".to_string(),
                actual: quote,
                position,
            });
        }
        let value = self.stream.consume_while(|ch| ch != quote);
        self.stream.expect_char(quote)?;
        Ok(value)
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.stream.position()
    }
}
