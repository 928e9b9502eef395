//! Parser for the fully parenthesized prefix notation used by symdiff.
//!
//! An expression is either an atom, such as `x` or `2.5`, or a parenthesized form holding an
//! operator and one or two operands, such as `(sin x)` or `(+ x (* 2 y))`. The [`Parser`] turns
//! source text into an [`Expr`] tree that remembers where each piece came from, so that errors
//! can be reported against the original text.
//!
//! ```
//! use symdiff_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("(+ x (* 2 y))").try_parse_full().unwrap();
//! assert!(matches!(expr, Expr::Apply(_)));
//! assert_eq!(expr.to_string(), "(+ x (* 2 y))");
//! ```
//!
//! [`Parser`]: parser::Parser
//! [`Expr`]: parser::ast::Expr

pub mod parser;
pub mod tokenizer;
