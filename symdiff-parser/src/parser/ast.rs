//! The syntax tree produced by the [`Parser`](super::Parser).
//!
//! The tree is a faithful picture of the source text: nothing has been classified as a number,
//! variable, or known operator yet, and every node remembers the region of source code it was
//! parsed from.

use std::{fmt, ops::Range};

/// A single token that is not a parenthesis, such as `x`, `2.5`, or `sin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The text of the atom.
    pub lexeme: String,

    /// The region of the source code that this atom was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// An operator applied to one or two operands, such as `(sin x)` or `(+ x 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Apply {
    /// The operator token.
    ///
    /// If the operator position held a parenthesized group, the raw source text of that group is
    /// used as the token.
    pub op: Atom,

    /// The operands; either one or two of them.
    pub args: Vec<Expr>,

    /// The region of the source code that this form was parsed from, including its parentheses.
    pub span: Range<usize>,
}

impl Apply {
    /// Returns the first operand.
    pub fn left(&self) -> &Expr {
        &self.args[0]
    }

    /// Returns the second operand, if this is a binary form.
    pub fn right(&self) -> Option<&Expr> {
        self.args.get(1)
    }
}

impl fmt::Display for Apply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.op)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

/// Any expression in prefix notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A lone atom, such as `x`.
    Atom(Atom),

    /// A parenthesized operator application, such as `(+ x 1)`.
    Apply(Apply),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Atom(atom) => atom.span.clone(),
            Expr::Apply(apply) => apply.span.clone(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Atom(atom) => atom.fmt(f),
            Expr::Apply(apply) => apply.fmt(f),
        }
    }
}
