//! DOM node representation for parse results
//!
//! A tree is built once by the parser and never mutated afterwards. Each
//! element owns its children outright; there are no parent links.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// Attribute name to value. Names are unique within an element.
pub type AttrMap = BTreeMap<String, String>;

/// DOM node types
///
/// Equality and drop walk the tree with an explicit stack, so arbitrarily
/// deep trees do not exhaust the call stack.
#[derive(Debug, Clone)]
#[cfg_attr(target_arch = "wasm32", derive(serde::Serialize))]
pub enum Node {
    /// The literal characters between two markup delimiters
    Text(String),
    Element(ElementData),
}

/// Payload of an element node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(serde::Serialize))]
pub struct ElementData {
    pub tag_name: String,
    /// `None` when the element was built without an attribute map at all,
    /// which the tree dump renders differently from an empty map.
    pub attributes: Option<AttrMap>,
    pub children: Vec<Node>,
}

impl Drop for ElementData {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Node::Text(a), Node::Text(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Node::Element(a), Node::Element(b)) => {
                    if a.tag_name != b.tag_name
                        || a.attributes != b.attributes
                        || a.children.len() != b.children.len()
                    {
                        return false;
                    }
                    pending.extend(a.children.iter().zip(&b.children));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Node {}

/// One step of a depth-first walk that also visits closing tags
enum Step<'a> {
    Enter(&'a Node),
    Leave(&'a str),
}

impl Node {
    /// Build a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Build an element node. The tag name is not validated here.
    pub fn element(
        tag_name: impl Into<String>,
        attributes: Option<AttrMap>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element(ElementData {
            tag_name: tag_name.into(),
            attributes,
            children,
        })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Tag name of an element, `None` for text
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.tag_name),
            Node::Text(_) => None,
        }
    }

    /// Attribute map of an element, if it has one
    pub fn attributes(&self) -> Option<&AttrMap> {
        match self {
            Node::Element(element) => element.attributes.as_ref(),
            Node::Text(_) => None,
        }
    }

    /// Children in document order; always empty for text
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all of its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Text(s) => out.push_str(s),
                Node::Element(element) => pending.extend(element.children.iter().rev()),
            }
        }
        out
    }

    /// Serialize back to markup that `parse` accepts.
    ///
    /// No escaping is performed, so text containing `<` will not survive a
    /// second parse.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        let mut steps = vec![Step::Enter(self)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Leave(tag_name) => {
                    out.push_str("</");
                    out.push_str(tag_name);
                    out.push('>');
                }
                Step::Enter(Node::Text(s)) => out.push_str(s),
                Step::Enter(Node::Element(element)) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (name, value) in element.attributes.iter().flatten() {
                        let quote = if value.contains('"') { '\'' } else { '"' };
                        out.push(' ');
                        out.push_str(name);
                        out.push('=');
                        out.push(quote);
                        out.push_str(value);
                        out.push(quote);
                    }
                    out.push('>');
                    steps.push(Step::Leave(&element.tag_name));
                    steps.extend(element.children.iter().rev().map(Step::Enter));
                }
            }
        }
        out
    }
}

/// Write the indented debug dump of `root` to `out`.
///
/// Pre-order, one line per node, indented by one space per level of depth.
pub fn write_tree<W: Write>(out: &mut W, root: &Node) -> io::Result<()> {
    let mut spaces = String::new();
    let mut pending = vec![(root, 0)];
    while let Some((node, depth)) = pending.pop() {
        while spaces.len() < depth {
            spaces.push(' ');
        }
        let indent = &spaces[..depth];
        match node {
            Node::Text(content) => writeln!(out, "{}text: {}", indent, content)?,
            Node::Element(element) => {
                write!(out, "{}tag: {}", indent, element.tag_name)?;
                if let Some(attributes) = &element.attributes {
                    write!(out, " attrs: {:?}", attributes)?;
                }
                writeln!(out)?;
                pending.extend(element.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
    }
    Ok(())
}

/// The debug dump of `root` as a string
pub fn tree_dump(root: &Node) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_tree(&mut buf, root);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Print the debug dump of `root` to standard output
pub fn print_tree(root: &Node) {
    print!("{}", tree_dump(root));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttrMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_constructors() {
        let text = Node::text("hi");
        assert!(text.is_text());
        assert!(text.children().is_empty());
        assert_eq!(text.tag_name(), None);

        let element = Node::element("div", None, vec![text.clone()]);
        assert_eq!(element.tag_name(), Some("div"));
        assert_eq!(element.attributes(), None);
        assert_eq!(element.children(), &[text]);
    }

    #[test]
    fn test_text_content() {
        let tree = Node::element(
            "div",
            None,
            vec![
                Node::text("a"),
                Node::element("b", None, vec![Node::text("c")]),
                Node::text("d"),
            ],
        );
        assert_eq!(tree.text_content(), "acd");
    }

    #[test]
    fn test_dump_indentation() {
        let tree = Node::element(
            "div",
            None,
            vec![Node::element("p", None, vec![Node::text("hi")])],
        );
        assert_eq!(tree_dump(&tree), "tag: div\n tag: p\n  text: hi\n");
    }

    #[test]
    fn test_dump_attrs_present_vs_absent() {
        let empty = Node::element("a", Some(AttrMap::new()), vec![]);
        assert_eq!(tree_dump(&empty), "tag: a attrs: {}\n");

        let absent = Node::element("a", None, vec![]);
        assert_eq!(tree_dump(&absent), "tag: a\n");

        let with = Node::element("a", Some(attrs(&[("id", "x"), ("class", "y")])), vec![]);
        assert_eq!(
            tree_dump(&with),
            "tag: a attrs: {\"class\": \"y\", \"id\": \"x\"}\n"
        );
    }

    #[test]
    fn test_dump_empty_text() {
        assert_eq!(tree_dump(&Node::text("")), "text: \n");
    }

    #[test]
    fn test_write_tree_to_writer() {
        let mut buf = Vec::new();
        write_tree(&mut buf, &Node::text("x")).unwrap();
        assert_eq!(buf, b"text: x\n");
    }

    #[test]
    fn test_to_markup() {
        let tree = Node::element(
            "div",
            Some(attrs(&[("b", "y"), ("a", "say \"hi\"")])),
            vec![Node::text("one"), Node::element("br", None, vec![])],
        );
        assert_eq!(
            tree.to_markup(),
            "<div a='say \"hi\"' b=\"y\">one<br></br></div>"
        );
    }

    fn nested(depth: usize, leaf: &str) -> Node {
        let mut node = Node::text(leaf);
        for _ in 0..depth {
            node = Node::element("a", None, vec![node]);
        }
        node
    }

    #[test]
    fn test_deep_tree_walks() {
        let tree = nested(100_000, "x");
        assert_eq!(tree, nested(100_000, "x"));
        assert_ne!(tree, nested(100_000, "y"));
        assert_eq!(tree.text_content(), "x");

        let markup = tree.to_markup();
        assert!(markup.starts_with("<a><a>"));
        assert!(markup.ends_with("x</a></a>"));
        assert_eq!(markup.len(), 100_000 * 7 + 1);

        write_tree(&mut io::sink(), &tree).unwrap();
    }

    #[test]
    fn test_dump_nested_indentation() {
        assert_eq!(
            tree_dump(&nested(3, "x")),
            "tag: a\n tag: a\n  tag: a\n   text: x\n"
        );
    }
}
