use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;

/// The source code contained nothing but whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [format!("I expected to see an {} here", "expression".fg(EXPR))],
    help = format!("write an atom such as {} or a form such as {}", "`x`".fg(EXPR), "`(+ x 1)`".fg(EXPR)),
)]
pub struct EmptyExpression;

/// A parenthesized form had a number of elements other than 1, 2, or 3.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected 1, 2, or 3 elements in this form, found {}", self.count),
    labels = ["this form"],
    help = format!(
        "write unary operations as {} and binary operations as {}",
        "`(op arg)`".fg(EXPR),
        "`(op left right)`".fg(EXPR),
    ),
)]
pub struct InvalidTokenCount {
    /// The number of elements that were found.
    pub count: usize,
}

/// An opening parenthesis was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis", "you might need to add a `)` here"],
)]
pub struct UnclosedParenthesis;

/// A closing parenthesis was found with no matching opening parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected closing parenthesis",
    labels = ["this parenthesis has no matching `(`"],
)]
pub struct UnexpectedCloseParen;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "to apply an operator to operands, wrap them in parentheses: `(op arg1 arg2)`",
)]
pub struct ExpectedEof;
