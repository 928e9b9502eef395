pub mod ast;
pub mod error;

use ast::{Apply, Atom, Expr};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use symdiff_error::{Error, ErrorKind};
use std::ops::Range;

/// A parser for fully parenthesized prefix notation, such as `(+ x (* 2 y))`.
///
/// Each parenthesized form holds an operator followed by one or two operands, every one of which
/// is either an atom or another parenthesized form. A form with a single element, such as `(x)`,
/// stands for that element. Atoms are not classified here: whether `2.5` is a number or `sin` an
/// operator is decided by whoever consumes the tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source code being parsed.
    source: &'source str,

    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the given spans.
    fn error(&self, spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Error {
        Error::new(spans, kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Moves the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next non-whitespace token without consuming it.
    pub fn peek_token(&mut self) -> Option<&Token<'source>> {
        self.skip_whitespace();
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token to be parsed, then advances the cursor.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        self.skip_whitespace();
        let token = self.tokens.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(token)
    }

    /// Parses the entire source code as a single expression. Fails if the source is empty, is
    /// malformed, or has anything left over after the first complete expression.
    pub fn try_parse_full(&mut self) -> Result<Expr, Error> {
        if self.peek_token().is_none() {
            return Err(self.error(vec![0..self.source.len()], error::EmptyExpression));
        }

        let expr = self.parse_expr()?;
        if let Some(token) = self.next_token() {
            return Err(self.error(
                vec![token.span.start..self.source.trim_end().len()],
                error::ExpectedEof,
            ));
        }

        Ok(expr)
    }

    /// Parses one atom or parenthesized form.
    fn parse_expr(&mut self) -> Result<Expr, Error> {
        let Some(token) = self.next_token() else {
            return Err(self.error(vec![self.eof_span()], error::EmptyExpression));
        };

        match token.kind {
            TokenKind::Atom => Ok(Expr::Atom(Atom {
                lexeme: token.lexeme.to_string(),
                span: token.span,
            })),
            TokenKind::OpenParen => self.parse_form(token.span),
            TokenKind::CloseParen => Err(self.error(vec![token.span], error::UnexpectedCloseParen)),
            TokenKind::Whitespace => unreachable!("whitespace is skipped by `next_token`"),
        }
    }

    /// Parses the contents of a parenthesized form, given the span of its opening parenthesis.
    fn parse_form(&mut self, open: Range<usize>) -> Result<Expr, Error> {
        let mut items = Vec::new();
        let close = loop {
            match self.peek_token() {
                Some(token) if token.kind == TokenKind::CloseParen => {
                    let span = token.span.clone();
                    self.cursor += 1;
                    break span;
                },
                Some(_) => items.push(self.parse_expr()?),
                None => return Err(self.error(vec![open, self.eof_span()], error::UnclosedParenthesis)),
            }
        };

        let span = open.start..close.end;
        match items.len() {
            1 => Ok(items.remove(0)),
            2 | 3 => {
                let op = match items.remove(0) {
                    Expr::Atom(atom) => atom,
                    group => {
                        let span = group.span();
                        Atom { lexeme: self.source[span.clone()].to_string(), span }
                    },
                };
                Ok(Expr::Apply(Apply { op, args: items, span }))
            },
            count => Err(self.error(vec![span], error::InvalidTokenCount { count })),
        }
    }
}
