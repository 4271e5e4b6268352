//! Canonical expression printer
//!
//! Renders expressions the same way regardless of how the author spaced
//! them: binary operators get one space on each side, member chains and
//! calls none. Parentheses are re-inserted only where precedence needs
//! them. Constructs without a typed variant keep their own source text
//! between children (whitespace runs collapsed to one space) while every
//! child is printed canonically, so `-(2*Math.PI)` prints as
//! `-(2 * Math.PI)`.

use super::syntax_node::{BinaryOperator, MemberProperty, SyntaxKind, SyntaxNode};

/// Print `node` canonically
pub fn print_expression(node: &SyntaxNode, source: &str) -> String {
    let mut out = String::new();
    write_node(node, source, &mut out);
    out
}

fn write_node(node: &SyntaxNode, source: &str, out: &mut String) {
    match &node.kind {
        SyntaxKind::Identifier(name) => out.push_str(name),
        SyntaxKind::Number { raw, .. } => out.push_str(raw),
        SyntaxKind::Binary {
            operator,
            left,
            right,
        } => {
            if let Some(left) = left {
                write_operand(left, operator, Side::Left, source, out);
            }
            out.push(' ');
            out.push_str(operator.as_str());
            out.push(' ');
            if let Some(right) = right {
                write_operand(right, operator, Side::Right, source, out);
            }
        }
        SyntaxKind::Member {
            object,
            property,
            optional,
            ..
        } => {
            if let Some(object) = object {
                write_tight(object, source, out);
            }
            let dot = if *optional { "?." } else { "." };
            match property {
                MemberProperty::Named(name) => {
                    out.push_str(dot);
                    out.push_str(name);
                }
                MemberProperty::Computed(expr) => {
                    if *optional {
                        out.push_str(dot);
                    }
                    out.push('[');
                    write_node(expr, source, out);
                    out.push(']');
                }
                MemberProperty::Missing => out.push_str(dot),
            }
        }
        SyntaxKind::Call {
            callee,
            arguments,
            optional,
            ..
        } => {
            if let Some(callee) = callee {
                write_tight(callee, source, out);
            }
            if *optional {
                out.push_str("?.");
            }
            out.push('(');
            for (i, arg) in arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_node(arg, source, out);
            }
            out.push(')');
        }
        _ => write_spliced(node, source, out),
    }
}

/// Source text of `node` with each child replaced by its canonical form
fn write_spliced(node: &SyntaxNode, source: &str, out: &mut String) {
    let end = node.bytes.end;
    let mut cursor = node.bytes.start;

    for child in node.children() {
        let range = &child.bytes;
        // Recovered nodes may not sit inside their parent
        if range.start < cursor || range.end > end {
            continue;
        }
        write_collapsed(source.get(cursor..range.start).unwrap_or(""), out);
        write_node(child, source, out);
        cursor = range.end;
    }
    write_collapsed(source.get(cursor..end).unwrap_or(""), out);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn write_operand(
    operand: &SyntaxNode,
    parent: &BinaryOperator,
    side: Side,
    source: &str,
    out: &mut String,
) {
    let needs_parens = match &operand.kind {
        SyntaxKind::Binary { operator, .. } => {
            let (child, outer) = (operator.precedence(), parent.precedence());
            // `**` is right-associative, everything else left-associative
            let associates_here = if *parent == BinaryOperator::Exp {
                side == Side::Right
            } else {
                side == Side::Left
            };
            child < outer || (child == outer && !associates_here)
        }
        _ => false,
    };

    if needs_parens {
        out.push('(');
        write_node(operand, source, out);
        out.push(')');
    } else {
        write_node(operand, source, out);
    }
}

/// Operand of `.`, `[]` or `()` binds tighter than any binary operator
fn write_tight(node: &SyntaxNode, source: &str, out: &mut String) {
    if matches!(node.kind, SyntaxKind::Binary { .. }) {
        out.push('(');
        write_node(node, source, out);
        out.push(')');
    } else {
        write_node(node, source, out);
    }
}

/// Copy `text`, folding each whitespace run into one space
fn write_collapsed(text: &str, out: &mut String) {
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
}
