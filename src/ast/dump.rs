//! The textual AST dump.
//!
//! The dump is a pre-order walk printing one line per node:
//!
//! - an absent node prints `;`;
//! - a leaf prints its kind name and value (`Integer 65`, `Identifier x`,
//!   `String "hi"`);
//! - any other node prints its kind name, followed by the dumps of its left
//!   and right children (absent children still print `;`).

use std::fmt::Write;

use super::{Node, NodeKind};

/// Writes the dump of `node` to `out`.
pub fn write_dump<W: Write>(out: &mut W, node: Option<&Node>) -> std::fmt::Result {
    let Some(node) = node else {
        return writeln!(out, ";");
    };

    match (node.kind(), node.value()) {
        (NodeKind::String, Some(value)) => writeln!(out, "{} \"{value}\"", node.kind()),
        (_, Some(value)) => writeln!(out, "{} {value}", node.kind()),
        (kind, None) => {
            writeln!(out, "{kind}")?;
            write_dump(out, node.left())?;
            write_dump(out, node.right())
        }
    }
}

/// Returns the dump of `node` as a [`String`].
pub fn dump(node: Option<&Node>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_dump(&mut out, node);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_tree_dumps_as_semicolon() {
        assert_eq!(dump(None), ";\n");
    }

    #[test]
    fn check_leaf_dumps() {
        assert_eq!(dump(Some(&Node::leaf(NodeKind::Integer, "65"))), "Integer 65\n");
        assert_eq!(dump(Some(&Node::leaf(NodeKind::Ident, "count"))), "Identifier count\n");
        assert_eq!(
            dump(Some(&Node::leaf(NodeKind::String, "Hello, World!\\n"))),
            "String \"Hello, World!\\n\"\n"
        );
    }

    #[test]
    fn interior_nodes_dump_both_children() {
        let node = Node::sequence(
            None,
            Some(Box::new(Node::unary(
                NodeKind::Prtc,
                Node::leaf(NodeKind::Integer, "65"),
            ))),
        );
        assert_eq!(dump(Some(&node)), "Sequence\n;\nPrtc\nInteger 65\n;\n");
    }

    #[test]
    fn dumping_is_idempotent() {
        let node = Node::binary(
            NodeKind::Add,
            Node::leaf(NodeKind::Integer, "1"),
            Node::binary(
                NodeKind::Mul,
                Node::leaf(NodeKind::Integer, "2"),
                Node::leaf(NodeKind::Integer, "3"),
            ),
        );
        let first = dump(Some(&node));
        assert_eq!(first, dump(Some(&node)));
        assert_eq!(first, "Add\nInteger 1\nMultiply\nInteger 2\nInteger 3\n");
    }
}
