//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives. Source is parsed with the
//! TSX grammar (a superset of modern JavaScript + JSX) and lowered into the
//! typed `SyntaxNode` tree.

use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::errors::{QscanError, Result};
use crate::features::parsing::domain::{
    BinaryOperator, LoopKind, MemberProperty, ParseError, ParsedTree, SyntaxKind, SyntaxNode,
};
use crate::features::parsing::ports::Parser;
use crate::shared::models::Span;

/// Deepest syntax nesting accepted before the input is rejected.
///
/// Lowering itself keeps its stack on the heap; the limit bounds the
/// recursive printing and dropping of the finished tree.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Tree-sitter based JavaScript parser
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterParser;

impl TreeSitterParser {
    pub fn new() -> Self {
        Self
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::language_tsx()
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str) -> Result<ParsedTree> {
        let root_node = tree.root_node();
        let root = Lowering { source }.lower_tree(root_node)?;
        let errors = collect_errors(root_node);

        let parsed = ParsedTree::new(root, source.to_string(), self.language_name().to_string())
            .with_errors(errors);

        // Nothing but error regions: there is no program to analyze
        if root_node.has_error() && parsed.recovered_statements() == 0 {
            let at = parsed
                .errors
                .first()
                .map(|e| format!(" ({}:{})", e.span.start_line, e.span.start_col))
                .unwrap_or_default();
            return Err(QscanError::parse(format!("Unexpected token{}", at)));
        }

        if parsed.has_errors {
            tracing::debug!(
                errors = parsed.errors.len(),
                "parser recovered from syntax errors"
            );
        }

        Ok(parsed)
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| QscanError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| QscanError::parse("Failed to parse source code"))?;

        self.convert_tree(&tree, source)
    }

    fn language_name(&self) -> &'static str {
        "jsx"
    }
}

fn span_of(node: Node<'_>) -> Option<Span> {
    if node.is_missing() {
        return None;
    }
    Some(full_span(node))
}

fn full_span(node: Node<'_>) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

/// Collect parse errors in document order
fn collect_errors(root: Node<'_>) -> Vec<ParseError> {
    let mut errors = Vec::new();
    if !root.has_error() {
        return errors;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let message = if node.is_missing() {
                format!("Missing {}", node.kind())
            } else {
                "Unexpected token".to_string()
            };
            errors.push(ParseError {
                message,
                span: full_span(node),
            });
        }

        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return errors;
            }
        }
    }
}

/// Parse a JavaScript numeric literal. `None` for BigInt literals.
fn parse_js_number(raw: &str) -> Option<f64> {
    if raw.ends_with('n') {
        return None;
    }
    let digits: String = raw.chars().filter(|c| *c != '_').collect();

    let radix_value = |body: &str, radix: u32| -> Option<f64> {
        if body.is_empty() {
            return None;
        }
        body.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
    };

    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return radix_value(hex, 16);
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return radix_value(oct, 8);
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return radix_value(bin, 2);
    }
    // Legacy octal: 0777
    if lower.len() > 1
        && lower.starts_with('0')
        && lower.chars().all(|c| ('0'..='7').contains(&c))
    {
        return radix_value(&lower[1..], 8);
    }

    lower.parse::<f64>().ok()
}

/// `?.` written directly on this access or call. Accesses carry an
/// `optional_chain` node, calls the bare token.
fn has_optional_token(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| matches!(c.kind(), "optional_chain" | "?."));
    found
}

/// Whether `node` belongs to an optional chain. Parentheses end a chain.
fn in_optional_chain(mut node: Node<'_>) -> bool {
    loop {
        let link = match node.kind() {
            "member_expression" | "subscript_expression" => "object",
            "call_expression" => "function",
            _ => return false,
        };
        if has_optional_token(node) {
            return true;
        }
        match node.child_by_field_name(link) {
            Some(next) => node = next,
            None => return false,
        }
    }
}

/// How the lowered children of a node are reassembled
enum Shape {
    Program,
    Error,
    Function { name: Option<String>, params: usize },
    Loop(LoopKind),
    /// Slots: condition, consequence, alternative
    If,
    /// Slots: left, right
    Binary(BinaryOperator),
    /// Slot: object
    Member {
        property: MemberProperty,
        optional: bool,
        chained: bool,
    },
    /// Slots: object, index
    Subscript { optional: bool, chained: bool },
    /// Slot: callee, then every argument
    Call { optional: bool, chained: bool },
    Other(String),
}

/// A child slot still to lower; `None` when the grammar left it empty
type Slot<'t> = Option<Pending<'t>>;

struct Pending<'t> {
    node: Node<'t>,
    /// Lower a function expression as a declaration
    as_declaration: bool,
}

impl<'t> Pending<'t> {
    fn of(node: Node<'t>) -> Self {
        Self {
            node,
            as_declaration: false,
        }
    }
}

/// Node whose children are being lowered
struct Frame<'t> {
    node: Node<'t>,
    shape: Shape,
    pending: std::vec::IntoIter<Slot<'t>>,
    done: Vec<Option<SyntaxNode>>,
}

enum Opened<'t> {
    Leaf(SyntaxNode),
    Frame(Frame<'t>),
}

fn next_boxed(slots: &mut impl Iterator<Item = Option<SyntaxNode>>) -> Option<Box<SyntaxNode>> {
    slots.next().flatten().map(Box::new)
}

impl Frame<'_> {
    fn finish(self) -> SyntaxNode {
        let mut slots = self.done.into_iter();
        let kind = match self.shape {
            Shape::Program => SyntaxKind::Program {
                body: slots.flatten().collect(),
            },
            Shape::Error => SyntaxKind::Error {
                children: slots.flatten().collect(),
            },
            Shape::Function { name, params } => SyntaxKind::FunctionDecl {
                name,
                params: slots.by_ref().take(params).flatten().collect(),
                body: slots.flatten().collect(),
            },
            Shape::Loop(kind) => SyntaxKind::Loop {
                kind,
                parts: slots.flatten().collect(),
            },
            Shape::If => SyntaxKind::If {
                test: next_boxed(&mut slots),
                consequent: next_boxed(&mut slots),
                alternate: next_boxed(&mut slots),
            },
            Shape::Binary(operator) => SyntaxKind::Binary {
                operator,
                left: next_boxed(&mut slots),
                right: next_boxed(&mut slots),
            },
            Shape::Member {
                property,
                optional,
                chained,
            } => SyntaxKind::Member {
                object: next_boxed(&mut slots),
                property,
                optional,
                chained,
            },
            Shape::Subscript { optional, chained } => SyntaxKind::Member {
                object: next_boxed(&mut slots),
                property: match next_boxed(&mut slots) {
                    Some(index) => MemberProperty::Computed(index),
                    None => MemberProperty::Missing,
                },
                optional,
                chained,
            },
            Shape::Call { optional, chained } => SyntaxKind::Call {
                callee: next_boxed(&mut slots),
                arguments: slots.flatten().collect(),
                optional,
                chained,
            },
            Shape::Other(kind) => SyntaxKind::Other {
                kind,
                children: slots.flatten().collect(),
            },
        };

        SyntaxNode::new(kind, span_of(self.node), self.node.byte_range())
    }
}

/// Lowers tree-sitter nodes into typed syntax nodes.
///
/// Works on an explicit stack of frames, so arbitrarily deep input costs
/// heap, not thread stack.
struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> String {
        self.source
            .get(node.byte_range())
            .unwrap_or("")
            .to_string()
    }

    fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|c| !c.is_extra())
            .collect();
        children
    }

    fn child_slots<'t>(&self, node: Node<'t>) -> Vec<Slot<'t>> {
        self.named_children(node)
            .into_iter()
            .map(|c| Some(Pending::of(c)))
            .collect()
    }

    fn field_slot<'t>(&self, node: Node<'t>, field: &str) -> Slot<'t> {
        node.child_by_field_name(field).map(Pending::of)
    }

    fn lower_tree(&self, root: Node<'_>) -> Result<SyntaxNode> {
        let mut stack = match self.open(Pending::of(root)) {
            Opened::Leaf(node) => return Ok(node),
            Opened::Frame(frame) => vec![frame],
        };

        loop {
            let depth = stack.len();
            let Some(top) = stack.last_mut() else {
                return Err(QscanError::parse("Failed to lower syntax tree"));
            };

            match top.pending.next() {
                Some(Some(child)) => {
                    if depth >= MAX_NESTING_DEPTH {
                        return Err(QscanError::parse(format!(
                            "Nesting deeper than {} levels",
                            MAX_NESTING_DEPTH
                        )));
                    }
                    match self.open(child) {
                        Opened::Leaf(node) => top.done.push(Some(node)),
                        Opened::Frame(frame) => stack.push(frame),
                    }
                }
                Some(None) => top.done.push(None),
                None => {
                    let Some(frame) = stack.pop() else {
                        return Err(QscanError::parse("Failed to lower syntax tree"));
                    };
                    let node = frame.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.done.push(Some(node)),
                        None => return Ok(node),
                    }
                }
            }
        }
    }

    /// Classify one node: a finished leaf, or a frame with its child slots
    fn open<'t>(&self, pending: Pending<'t>) -> Opened<'t> {
        let mut node = pending.node;

        // Parentheses carry no meaning once the tree is built
        while node.kind() == "parenthesized_expression" {
            match self.named_children(node).as_slice() {
                [only] => node = *only,
                _ => break,
            }
        }

        if pending.as_declaration {
            return self.open_function(node);
        }

        let (shape, slots) = match node.kind() {
            "identifier" => {
                let kind = SyntaxKind::Identifier(self.text(node));
                return Opened::Leaf(SyntaxNode::new(kind, span_of(node), node.byte_range()));
            }
            "number" => {
                let raw = self.text(node);
                let kind = match parse_js_number(&raw) {
                    Some(value) => SyntaxKind::Number { raw, value },
                    None => SyntaxKind::Other {
                        kind: "bigint".to_string(),
                        children: Vec::new(),
                    },
                };
                return Opened::Leaf(SyntaxNode::new(kind, span_of(node), node.byte_range()));
            }
            "function_declaration" | "generator_function_declaration" => {
                return self.open_function(node)
            }
            "program" => (Shape::Program, self.child_slots(node)),
            "ERROR" => (Shape::Error, self.child_slots(node)),
            "export_statement" => (
                Shape::Other(node.kind().to_string()),
                self.export_slots(node),
            ),
            "for_statement" => (Shape::Loop(LoopKind::For), self.child_slots(node)),
            "while_statement" => (Shape::Loop(LoopKind::While), self.child_slots(node)),
            "do_statement" => (Shape::Loop(LoopKind::DoWhile), self.child_slots(node)),
            "for_in_statement" => (Shape::Loop(LoopKind::ForIn), self.child_slots(node)),
            "if_statement" => (
                Shape::If,
                vec![
                    self.field_slot(node, "condition"),
                    self.field_slot(node, "consequence"),
                    self.field_slot(node, "alternative"),
                ],
            ),
            "binary_expression" => (
                Shape::Binary(
                    node.child_by_field_name("operator")
                        .map(|op| BinaryOperator::parse(&self.text(op)))
                        .unwrap_or_else(|| BinaryOperator::Other(String::new())),
                ),
                vec![self.field_slot(node, "left"), self.field_slot(node, "right")],
            ),
            "member_expression" => (
                Shape::Member {
                    property: match node.child_by_field_name("property") {
                        Some(prop) if !prop.is_missing() => MemberProperty::Named(self.text(prop)),
                        _ => MemberProperty::Missing,
                    },
                    optional: has_optional_token(node),
                    chained: in_optional_chain(node),
                },
                vec![self.field_slot(node, "object")],
            ),
            "subscript_expression" => (
                Shape::Subscript {
                    optional: has_optional_token(node),
                    chained: in_optional_chain(node),
                },
                vec![self.field_slot(node, "object"), self.field_slot(node, "index")],
            ),
            "call_expression" => self.call_parts(node),
            other => (Shape::Other(other.to_string()), self.child_slots(node)),
        };

        Opened::Frame(Frame {
            node,
            shape,
            pending: slots.into_iter(),
            done: Vec::new(),
        })
    }

    fn open_function<'t>(&self, node: Node<'t>) -> Opened<'t> {
        let name = node
            .child_by_field_name("name")
            .filter(|n| !n.is_missing())
            .map(|n| self.text(n));

        let mut slots = match node.child_by_field_name("parameters") {
            Some(params) => self.child_slots(params),
            None => Vec::new(),
        };
        let params = slots.len();
        slots.push(self.field_slot(node, "body"));

        Opened::Frame(Frame {
            node,
            shape: Shape::Function { name, params },
            pending: slots.into_iter(),
            done: Vec::new(),
        })
    }

    /// `export default function () {}` is a declaration without a name;
    /// the grammar files it under expressions.
    fn export_slots<'t>(&self, node: Node<'t>) -> Vec<Slot<'t>> {
        let mut cursor = node.walk();
        let is_default = node.children(&mut cursor).any(|c| c.kind() == "default");

        self.named_children(node)
            .into_iter()
            .map(|child| {
                let as_declaration = is_default
                    && matches!(
                        child.kind(),
                        "function_expression" | "function" | "generator_function"
                    );
                Some(Pending {
                    node: child,
                    as_declaration,
                })
            })
            .collect()
    }

    fn call_parts<'t>(&self, node: Node<'t>) -> (Shape, Vec<Slot<'t>>) {
        let args_node = node.child_by_field_name("arguments");

        // tag`...` is a tagged template, not a call
        if args_node.is_some_and(|a| a.kind() == "template_string") {
            return (
                Shape::Other("tagged_template".to_string()),
                self.child_slots(node),
            );
        }

        let mut slots = vec![self.field_slot(node, "function")];
        if let Some(args) = args_node {
            slots.extend(self.child_slots(args));
        }

        let shape = Shape::Call {
            optional: has_optional_token(node),
            chained: in_optional_chain(node),
        };
        (shape, slots)
    }
}
