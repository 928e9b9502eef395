//! The expression tree.
//!
//! A [`Node`] is either an atom (a number or a variable name), an operator applied to one operand,
//! or an operator applied to two operands. The arity of a node is encoded in its variant, so a
//! unary node can never be missing its operand and an atom can never have children.
//!
//! # Construction
//!
//! Building a node with [`Node::unary`] or [`Node::binary`] immediately normalizes it: numeric
//! coefficients are pushed to the left (see [`simplify::push_coefficients`]) and the node is
//! collapsed locally (see [`simplify::primary`]). Every component that builds trees (the parser
//! conversion, the differentiator, and the simplifier itself) goes through these constructors, so
//! no tree is ever left in an obviously reducible state. To build a node exactly as written, use
//! the enum variants directly.
//!
//! ```
//! use symdiff_compute::{Node, Op};
//!
//! let node = Node::binary(Op::Add, Node::symbol("x"), Node::number(1.0));
//! assert_eq!(node.to_string(), "(+ 1 x)");
//!
//! let node = Node::binary(Op::Mul, Node::number(2.0), Node::number(3.0));
//! assert_eq!(node, Node::number(6.0));
//! ```
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation compares trees structurally: same variant, same token, and
//! recursively equal children. No algebraic knowledge is involved; `(+ x y)` and `(+ y x)` are
//! different trees. Numbers compare by their exact bit pattern, which agrees with comparing their
//! printed tokens.
//!
//! [`simplify::push_coefficients`]: crate::simplify::push_coefficients
//! [`simplify::primary`]: crate::simplify::primary

mod op;

pub use op::Op;

use crate::simplify::{self, step::Step};
use crate::step_collector::StepCollector;
use std::{borrow::Cow, fmt, str::FromStr};
use symdiff_error::Error;
use symdiff_parser::parser::{ast::Expr as AstExpr, Parser};

/// A node in an expression tree. Each node exclusively owns its children.
#[derive(Debug, Clone)]
pub enum Node {
    /// A numeric literal, such as `2` or `-0.5`.
    Number(f64),

    /// A variable name, such as `x`.
    Symbol(String),

    /// An operator applied to a single operand, such as `(sin x)`.
    Unary(Op, Box<Node>),

    /// An operator applied to two operands, such as `(+ x 1)`.
    Binary(Op, Box<Node>, Box<Node>),
}

impl Node {
    /// Creates a numeric literal.
    pub fn number(n: f64) -> Self {
        Node::Number(n)
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(name.into())
    }

    /// Creates an atom from a token: a numeric literal if the token is written with digits (after
    /// an optional sign) and parses as a floating-point number, otherwise a variable.
    ///
    /// Tokens such as `inf` or `nan` are variables, even though [`f64`] can parse them.
    pub fn atom(token: &str) -> Self {
        let unsigned = token.strip_prefix(|c| c == '+' || c == '-').unwrap_or(token);
        if unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            if let Ok(n) = token.parse::<f64>() {
                return Node::Number(n);
            }
        }

        Node::Symbol(token.to_string())
    }

    /// Creates a normalized unary node.
    pub fn unary(op: Op, operand: Node) -> Self {
        Self::unary_with(op, operand, &mut ())
    }

    /// Creates a normalized unary node, reporting the simplification steps taken to the given
    /// collector.
    pub fn unary_with(op: Op, operand: Node, steps: &mut dyn StepCollector<Step>) -> Self {
        let mut node = Node::Unary(op, Box::new(operand));
        simplify::primary(&mut node, steps);
        node
    }

    /// Creates a normalized binary node.
    pub fn binary(op: Op, left: Node, right: Node) -> Self {
        Self::binary_with(op, left, right, &mut ())
    }

    /// Creates a normalized binary node, reporting the simplification steps taken to the given
    /// collector.
    pub fn binary_with(op: Op, left: Node, right: Node, steps: &mut dyn StepCollector<Step>) -> Self {
        let mut node = Node::Binary(op, Box::new(left), Box::new(right));
        simplify::push_coefficients(&mut node, steps);
        simplify::primary(&mut node, steps);
        node
    }

    /// Returns true if this node has no children.
    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Symbol(_))
    }

    /// Returns true if this node has exactly one child.
    pub fn is_unary(&self) -> bool {
        matches!(self, Node::Unary(..))
    }

    /// Returns true if this node has two children.
    pub fn is_binary(&self) -> bool {
        matches!(self, Node::Binary(..))
    }

    /// Returns the value of this node if it is a numeric literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if this node is a numeric literal.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns the token of this node: the operator for unary and binary nodes, the literal text
    /// for atoms.
    pub fn token(&self) -> Cow<str> {
        match self {
            Node::Number(n) => Cow::Owned(n.to_string()),
            Node::Symbol(name) => Cow::Borrowed(name),
            Node::Unary(op, _) | Node::Binary(op, ..) => Cow::Borrowed(op.as_str()),
        }
    }

    /// Returns the first operand, if any.
    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Unary(_, left) | Node::Binary(_, left, _) => Some(left),
            _ => None,
        }
    }

    /// Returns the second operand, if any.
    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Binary(_, _, right) => Some(right),
            _ => None,
        }
    }

    /// Resets this node in place to the given node, replacing its token and children.
    ///
    /// Whoever holds this node (a parent, or a [`Function`](crate::Function)) keeps holding it;
    /// only its contents change.
    pub fn set(&mut self, node: Node) {
        *self = node;
    }
}

/// A placeholder literal `0`, used to move a node out of a slot before its replacement is built.
impl Default for Node {
    fn default() -> Self {
        Node::Number(0.0)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Number(a), Node::Number(b)) => a.to_bits() == b.to_bits(),
            (Node::Symbol(a), Node::Symbol(b)) => a == b,
            (Node::Unary(op_a, a), Node::Unary(op_b, b)) => op_a == op_b && a == b,
            (Node::Binary(op_a, left_a, right_a), Node::Binary(op_b, left_b, right_b)) => {
                op_a == op_b && left_a == left_b && right_a == right_b
            },
            _ => false,
        }
    }
}

impl Eq for Node {}

/// Prints the tree in fully parenthesized prefix notation, the same notation the parser accepts.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::Unary(op, operand) => write!(f, "({} {})", op, operand),
            Node::Binary(op, left, right) => write!(f, "({} {} {})", op, left, right),
        }
    }
}

/// Converts a syntax tree into a normalized expression tree.
impl From<&AstExpr> for Node {
    fn from(expr: &AstExpr) -> Self {
        match expr {
            AstExpr::Atom(atom) => Node::atom(&atom.lexeme),
            AstExpr::Apply(apply) => {
                let op = Op::from(apply.op.lexeme.as_str());
                let left = Node::from(apply.left());
                match apply.right() {
                    Some(right) => Node::binary(op, left, Node::from(right)),
                    None => Node::unary(op, left),
                }
            },
        }
    }
}

impl From<AstExpr> for Node {
    fn from(expr: AstExpr) -> Self {
        Node::from(&expr)
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s).try_parse_full().map(|expr| Node::from(&expr))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(s: &str) -> Node {
        s.parse().unwrap()
    }

    #[test]
    fn atoms_are_classified() {
        assert_eq!(Node::atom("2.5"), Node::Number(2.5));
        assert_eq!(Node::atom("-1"), Node::Number(-1.0));
        assert_eq!(Node::atom("x"), Node::Symbol("x".to_string()));
        assert_eq!(Node::atom("e^"), Node::Symbol("e^".to_string()));
        assert_eq!(Node::atom(".5"), Node::Number(0.5));
        assert_eq!(Node::atom("+2e3"), Node::Number(2000.0));
        assert_eq!(Node::atom("1x"), Node::symbol("1x"));
    }

    #[test]
    fn float_keywords_are_symbols() {
        for token in ["inf", "-inf", "infinity", "NaN", "nan", "+Infinity"] {
            assert_eq!(Node::atom(token), Node::symbol(token));
        }
    }

    #[test]
    fn arity_queries() {
        let node = parse("(+ x (sin y))");
        assert!(node.is_binary());
        assert!(!node.is_unary());
        assert!(node.right().unwrap().is_unary());
        assert!(node.left().unwrap().is_atom());
        assert_eq!(node.right().unwrap().left(), Some(&Node::symbol("y")));
        assert_eq!(node.token(), "+");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(parse("(+ x (* 2 y))"), parse("(+ x (* 2 y))"));
        assert_ne!(parse("(+ x y)"), parse("(+ y x)"));
        assert_ne!(parse("(sin x)"), parse("(cos x)"));
        assert_ne!(Node::number(0.0), Node::number(-0.0));
        assert_ne!(Node::number(1.0), Node::symbol("1"));
    }

    #[test]
    fn construction_pushes_coefficients() {
        assert_eq!(parse("(+ x 1)").to_string(), "(+ 1 x)");
        assert_eq!(parse("(* x 3)").to_string(), "(* 3 x)");
        assert_eq!(parse("(- x 2)").to_string(), "(+ -2 x)");
        assert_eq!(parse("(/ x 4)").to_string(), "(* 0.25 x)");
        assert_eq!(parse("(pow x 3)").to_string(), "(pow x 3)");
    }

    #[test]
    fn construction_folds_constants() {
        assert_eq!(parse("(+ 1 2)"), Node::number(3.0));
        assert_eq!(parse("(* 2 (+ 1 2))"), Node::number(6.0));
        assert_eq!(parse("(cos 0)"), Node::number(1.0));
        assert_eq!(parse("(* 2 (* 3 x))").to_string(), "(* 6 x)");
    }

    #[test]
    fn unfoldable_constants_are_kept() {
        assert_eq!(parse("(/ 1 0)").to_string(), "(/ 1 0)");
        assert_eq!(parse("(ln -1)").to_string(), "(ln -1)");
        assert_eq!(parse("(tan 1)").to_string(), "(tan 1)");
    }

    #[test]
    fn reset_in_place() {
        let mut node = parse("(+ x (sin y))");
        if let Node::Binary(_, _, right) = &mut node {
            right.set(parse("(cos y)"));
        }
        assert_eq!(node.to_string(), "(+ x (cos y))");
    }

    #[test]
    fn serialize_then_parse() {
        for source in [
            "x",
            "(+ x (* 2 y))",
            "(/ (sin x) (pow x 3))",
            "(- x (e^ (ln x)))",
            "(* 2 (* 0.5 x))",
            "(+ 0 (+ x 1))",
            "(sqrt (- x 3))",
            "(tan (+ x 1))",
        ] {
            let node = parse(source);
            let reparsed = parse(&node.to_string());
            assert_eq!(reparsed, node, "round trip of `{}` through `{}`", source, node);
        }
    }

    #[test]
    fn parse_errors_propagate() {
        assert!("(+ x y z)".parse::<Node>().is_err());
        assert!("(+ x".parse::<Node>().is_err());
    }
}
