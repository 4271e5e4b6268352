//! Typed JavaScript syntax tree
//!
//! Abstracts tree-sitter nodes for use in domain logic. Only the shapes the
//! pattern detectors inspect get their own variant; everything else is kept
//! as `Other` so the walk still reaches every descendant. Every structural
//! slot a malformed program may leave empty is an `Option`.

use std::fmt;
use std::ops::Range;

use crate::shared::models::Span;

/// Loop statement flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    /// `for (init; test; update)`
    For,
    /// `while (test)`
    While,
    /// `do { } while (test)`
    DoWhile,
    /// `for (x in y)` / `for (x of y)`
    ForIn,
}

/// Binary operator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Eq,
    StrictEq,
    NotEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    And,
    Or,
    Nullish,
    In,
    InstanceOf,
    Other(String),
}

impl BinaryOperator {
    pub fn parse(op: &str) -> Self {
        match op {
            "==" => Self::Eq,
            "===" => Self::StrictEq,
            "!=" => Self::NotEq,
            "!==" => Self::StrictNotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "**" => Self::Exp,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "&&" => Self::And,
            "||" => Self::Or,
            "??" => Self::Nullish,
            "in" => Self::In,
            "instanceof" => Self::InstanceOf,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Eq => "==",
            Self::StrictEq => "===",
            Self::NotEq => "!=",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Nullish => "??",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::Other(op) => op.as_str(),
        }
    }

    /// `==` or `===`
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Eq | Self::StrictEq)
    }

    /// Binding power, higher binds tighter (JS precedence table)
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Nullish => 1,
            Self::Or => 2,
            Self::And => 3,
            Self::BitOr => 4,
            Self::BitXor => 5,
            Self::BitAnd => 6,
            Self::Eq | Self::StrictEq | Self::NotEq | Self::StrictNotEq => 7,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::In | Self::InstanceOf => 8,
            Self::Shl | Self::Shr | Self::UShr => 9,
            Self::Add | Self::Sub => 10,
            Self::Mul | Self::Div | Self::Mod => 11,
            Self::Exp => 12,
            Self::Other(_) => 0,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a member access
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `obj.name` (also `obj.#name`)
    Named(String),
    /// `obj[expr]`
    Computed(Box<SyntaxNode>),
    /// Error recovery dropped the property
    Missing,
}

/// Syntax node kind with its typed children
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxKind {
    Program {
        body: Vec<SyntaxNode>,
    },
    /// `function name(...) {}`; also generator/async declarations and the
    /// anonymous `export default function () {}`
    FunctionDecl {
        name: Option<String>,
        params: Vec<SyntaxNode>,
        body: Vec<SyntaxNode>,
    },
    /// Loop header parts and body in source order
    Loop {
        kind: LoopKind,
        parts: Vec<SyntaxNode>,
    },
    If {
        test: Option<Box<SyntaxNode>>,
        consequent: Option<Box<SyntaxNode>>,
        alternate: Option<Box<SyntaxNode>>,
    },
    Binary {
        operator: BinaryOperator,
        left: Option<Box<SyntaxNode>>,
        right: Option<Box<SyntaxNode>>,
    },
    /// `optional` marks `obj?.name`; `chained` marks any link of an optional
    /// chain (`a?.b.c` is chained at both accesses)
    Member {
        object: Option<Box<SyntaxNode>>,
        property: MemberProperty,
        optional: bool,
        chained: bool,
    },
    /// `optional` marks `f?.()`; `chained` as for `Member`
    Call {
        callee: Option<Box<SyntaxNode>>,
        arguments: Vec<SyntaxNode>,
        optional: bool,
        chained: bool,
    },
    Identifier(String),
    /// Numeric literal (BigInt literals are `Other`)
    Number {
        raw: String,
        value: f64,
    },
    /// Region the parser could not make sense of
    Error {
        children: Vec<SyntaxNode>,
    },
    /// Any other construct, identified by its grammar kind
    Other {
        kind: String,
        children: Vec<SyntaxNode>,
    },
}

/// Typed syntax node
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,

    /// `None` for nodes synthesized by error recovery
    pub span: Option<Span>,

    /// Byte range into the parsed source
    pub bytes: Range<usize>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Option<Span>, bytes: Range<usize>) -> Self {
        Self { kind, span, bytes }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&SyntaxNode> {
        fn opt(node: &Option<Box<SyntaxNode>>) -> Option<&SyntaxNode> {
            node.as_deref()
        }

        match &self.kind {
            SyntaxKind::Program { body } => body.iter().collect(),
            SyntaxKind::FunctionDecl { params, body, .. } => params.iter().chain(body).collect(),
            SyntaxKind::Loop { parts, .. } => parts.iter().collect(),
            SyntaxKind::If {
                test,
                consequent,
                alternate,
            } => [opt(test), opt(consequent), opt(alternate)]
                .into_iter()
                .flatten()
                .collect(),
            SyntaxKind::Binary { left, right, .. } => {
                [opt(left), opt(right)].into_iter().flatten().collect()
            }
            SyntaxKind::Member { object, property, .. } => {
                let computed = match property {
                    MemberProperty::Computed(expr) => Some(expr.as_ref()),
                    MemberProperty::Named(_) | MemberProperty::Missing => None,
                };
                [opt(object), computed].into_iter().flatten().collect()
            }
            SyntaxKind::Call { callee, arguments, .. } => {
                opt(callee).into_iter().chain(arguments).collect()
            }
            SyntaxKind::Identifier(_) | SyntaxKind::Number { .. } => Vec::new(),
            SyntaxKind::Error { children } | SyntaxKind::Other { children, .. } => {
                children.iter().collect()
            }
        }
    }

    /// Preorder walk over this node and all descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn start_line(&self) -> Option<u32> {
        self.span.map(|s| s.start_line)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, SyntaxKind::Error { .. })
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }
}

/// Iterative preorder traversal (no recursion, safe on deep trees)
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: SyntaxKind, line: u32) -> SyntaxNode {
        SyntaxNode::new(kind, Some(Span::new(line, 0, line, 1)), 0..0)
    }

    #[test]
    fn test_operator_roundtrip() {
        for op in ["===", "%", ">>>", "instanceof", "??"] {
            assert_eq!(BinaryOperator::parse(op).as_str(), op);
        }
        assert!(BinaryOperator::parse("==").is_equality());
        assert!(!BinaryOperator::parse("!==").is_equality());
    }

    #[test]
    fn test_descendants_preorder() {
        let tree = leaf(
            SyntaxKind::Binary {
                operator: BinaryOperator::Add,
                left: Some(Box::new(leaf(SyntaxKind::Identifier("a".into()), 1))),
                right: Some(Box::new(leaf(SyntaxKind::Identifier("b".into()), 2))),
            },
            1,
        );

        let names: Vec<_> = tree
            .descendants()
            .filter_map(|n| match &n.kind {
                SyntaxKind::Identifier(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_missing_slots_are_skipped() {
        let node = leaf(
            SyntaxKind::If {
                test: None,
                consequent: None,
                alternate: None,
            },
            4,
        );
        assert!(node.children().is_empty());
        assert_eq!(node.start_line(), Some(4));
    }
}
