//! Abstract syntax trees for Tiny programs.
//!
//! Every construct is encoded in a strictly binary [`Node`]: statement lists
//! become left-leaning chains of [`NodeKind::Sequence`] nodes, and the else
//! branch of a conditional hangs off a second, nested [`NodeKind::If`]. The
//! shape matters, because the [`dump`] format is a direct pre-order walk of it.

use std::{fmt::Display, str::FromStr};

use crate::{
    error::Error,
    lexer::{token::Tokens, Lexer},
    parser::Parser,
};

pub mod dump;

/// The closed set of syntactic roles a [`Node`] can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A variable reference (leaf).
    Ident,
    /// An integer literal (leaf).
    Integer,
    /// A string literal (leaf).
    String,
    /// A sequence of two statements.
    Sequence,
    /// A conditional; see [`Node::conditional`] for its shape.
    If,
    /// A loop with a condition on the left and a body on the right.
    While,
    /// Assignment of the right expression to the left identifier.
    Assign,
    /// Print an expression as a character.
    Prtc,
    /// Print a string literal.
    Prts,
    /// Print an expression as an integer.
    Prti,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// Binary `+`.
    Add,
    /// Binary `-`.
    Sub,
    /// Unary `-`.
    Negate,
    /// `!`
    Not,
    /// `<`
    Lss,
    /// `<=`
    Leq,
    /// `>`
    Gtr,
    /// `>=`
    Geq,
    /// `==`
    Eql,
    /// `!=`
    Neq,
    /// `&&`
    And,
    /// `||`
    Or,
    /// An empty marker.
    None,
}

impl NodeKind {
    /// Returns the name used for this kind in AST dumps.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Ident => "Identifier",
            NodeKind::Integer => "Integer",
            NodeKind::String => "String",
            NodeKind::Sequence => "Sequence",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::Assign => "Assign",
            NodeKind::Prtc => "Prtc",
            NodeKind::Prts => "Prts",
            NodeKind::Prti => "Prti",
            NodeKind::Mul => "Multiply",
            NodeKind::Div => "Divide",
            NodeKind::Mod => "Mod",
            NodeKind::Add => "Add",
            NodeKind::Sub => "Subtract",
            NodeKind::Negate => "Negate",
            NodeKind::Not => "Not",
            NodeKind::Lss => "Less",
            NodeKind::Leq => "LessEqual",
            NodeKind::Gtr => "Greater",
            NodeKind::Geq => "GreaterEqual",
            NodeKind::Eql => "Equal",
            NodeKind::Neq => "NotEqual",
            NodeKind::And => "And",
            NodeKind::Or => "Or",
            NodeKind::None => "",
        }
    }

    /// Returns `true` for the kinds that carry a value and no children.
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Ident | NodeKind::Integer | NodeKind::String)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// An optional, owned child of a [`Node`].
pub type Link = Option<Box<Node>>;

/// A node in a binary syntax tree.
///
/// A node is either a leaf (an identifier or literal, with a value and no
/// children) or an interior node (no value, with either child possibly
/// absent). The constructors uphold this; nodes are never modified after
/// they are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The syntactic role of this node.
    kind: NodeKind,
    /// The left child.
    left: Link,
    /// The right child.
    right: Link,
    /// The text of a leaf.
    value: Option<String>,
}

impl Node {
    /// Constructs a leaf node holding `value`.
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        debug_assert!(kind.is_leaf(), "{kind:?} is not a leaf kind");
        Self {
            kind,
            left: None,
            right: None,
            value: Some(value.into()),
        }
    }

    /// Constructs an interior node from its (possibly absent) children.
    pub fn interior(kind: NodeKind, left: Link, right: Link) -> Self {
        debug_assert!(!kind.is_leaf(), "{kind:?} is a leaf kind");
        Self {
            kind,
            left,
            right,
            value: None,
        }
    }

    /// Constructs an interior node with only a left child.
    pub fn unary(kind: NodeKind, operand: Node) -> Self {
        Self::interior(kind, Some(Box::new(operand)), None)
    }

    /// Constructs an interior node with both children present.
    pub fn binary(kind: NodeKind, left: Node, right: Node) -> Self {
        Self::interior(kind, Some(Box::new(left)), Some(Box::new(right)))
    }

    /// Appends `statement` to the statement chain `chain`.
    pub fn sequence(chain: Link, statement: Link) -> Self {
        Self::interior(NodeKind::Sequence, chain, statement)
    }

    /// Constructs a conditional as `If(cond, If(then, else))`.
    pub fn conditional(cond: Node, then_branch: Link, else_branch: Link) -> Self {
        let branches = Self::interior(NodeKind::If, then_branch, else_branch);
        Self::binary(NodeKind::If, cond, branches)
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the left child, if present.
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// Returns the right child, if present.
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Returns the value of a leaf node.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the statements of a [`NodeKind::Sequence`] chain in source
    /// order, where absent statements appear as [`None`].
    ///
    /// Any other node is treated as a chain of one.
    pub fn statements(&self) -> Vec<Option<&Node>> {
        let mut statements = Vec::new();
        let mut cursor = Some(self);
        while let Some(node) = cursor {
            if node.kind != NodeKind::Sequence {
                statements.push(Some(node));
                break;
            }
            statements.push(node.right());
            cursor = node.left();
        }
        statements.reverse();
        statements
    }
}

/// The syntax tree of a whole program.
///
/// An empty program has no root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ast {
    /// The root of this tree.
    root: Link,
}

impl Ast {
    /// Constructs an [`Ast`] from its root.
    pub fn new(root: Link) -> Self {
        Self { root }
    }

    /// Returns the root, if the program is not empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Returns the top-level statements in source order, or nothing for an
    /// empty program.
    pub fn statements(&self) -> Vec<Option<&Node>> {
        self.root().map(Node::statements).unwrap_or_default()
    }
}

impl FromStr for Ast {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(Lexer::new(s))?.parse()
    }
}

impl TryFrom<Tokens> for Ast {
    type Error = Error;

    fn try_from(value: Tokens) -> Result<Self, Self::Error> {
        Parser::new(value.into_iter())?.parse()
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dump::write_dump(f, self.root())
    }
}
