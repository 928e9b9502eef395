//! Error kinds raised while evaluating, differentiating, or building functions.
//!
//! These errors come from walking an expression tree rather than reading source code, so they are
//! created with [`Error::spanless`](symdiff_error::Error::spanless). Their labels only show up if a
//! caller attaches spans of its own.

use ariadne::Fmt;
use crate::node::Op;
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;

/// A variable appeared in the tree, but no value was bound to it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not bound to a value", self.name),
    labels = ["this variable"],
    help = format!("add {} to the function's variables", (&self.name).fg(EXPR)),
)]
pub struct UnboundSymbol {
    /// The name of the variable.
    pub name: String,
}

/// An operator outside of the supported vocabulary, or a supported operator used with the wrong
/// number of operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` operator is not supported with {} operand(s)", self.op, self.arity),
    labels = ["this operator"],
    help = format!(
        "the supported unary operators are {}, and the supported binary operators are {}",
        "`e^`, `ln`, `sin`, `cos`, `sqrt`".fg(EXPR),
        "`+`, `-`, `*`, `/`, `pow`".fg(EXPR),
    ),
)]
pub struct UnsupportedOperator {
    /// The operator that was used.
    pub op: Op,

    /// The number of operands it was applied to.
    pub arity: usize,
}

/// The operand of `ln` or `sqrt` was not positive, or the divisor of `/` was zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match self.op {
        Op::Div => "division by zero".to_string(),
        _ => format!("`{}` is only defined for positive values", self.op),
    },
    labels = ["this operand"],
    help = format!("the operand evaluated to {}", self.value.to_string().fg(EXPR)),
)]
pub struct DomainError {
    /// The operator that was applied.
    pub op: Op,

    /// The offending operand.
    pub value: f64,
}

/// A function was evaluated with a different number of values than it has variables.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {} value(s), but {} were given", self.expected, self.given),
    labels = ["these values"],
    help = "provide exactly one value for each of the function's variables, in order",
)]
pub struct BindingCountMismatch {
    /// The number of variables of the function.
    pub expected: usize,

    /// The number of values that were given.
    pub given: usize,
}

/// The same variable name was listed twice for one function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the variable `{}` is listed more than once", self.name),
    labels = ["this variable"],
)]
pub struct DuplicateVariable {
    /// The name of the repeated variable.
    pub name: String,
}

/// The tree contains an operator that has no differentiation rule.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate the `{}` operator with {} operand(s)", self.op, self.arity),
    labels = ["this operator"],
)]
pub struct NotDifferentiable {
    /// The operator that was used.
    pub op: Op,

    /// The number of operands it was applied to.
    pub arity: usize,
}
