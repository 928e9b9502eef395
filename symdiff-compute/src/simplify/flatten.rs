//! Flattening of `+`/`-` and `*`/`/` chains into like terms and like factors.
//!
//! A chain is the maximal run of additive (or multiplicative) operators below a node. Its operands
//! are collected into a list of `(coefficient, factor)` pairs (or `(exponent, base)` pairs), where
//! entries whose factors are structurally equal are merged by adding their coefficients. The list
//! is then folded back into a right-leaning tree through the normalizing constructors.
//!
//! Merging relies on structural equality only, so this is only guaranteed to reach a canonical
//! form for expressions of a single variable.

use crate::node::{Node, Op};
use crate::step_collector::StepCollector;
use super::{secondary, step::Step};

/// Inserts `weight` for `key` into the list, adding it onto the first structurally equal entry if
/// there is one.
fn accumulate(entries: &mut Vec<(f64, Node)>, weight: f64, key: Node) {
    match entries.iter_mut().find(|(_, existing)| *existing == key) {
        Some((total, _)) => *total += weight,
        None => entries.push((weight, key)),
    }
}

/// Splits a simplified term into its numeric coefficient and the remaining factor.
///
/// `(* k f)` gives `(k, f)`, anything else has coefficient `1`. A simplified term can only still be
/// a `/` if it divides by zero, so it is kept whole and fails when evaluated.
fn split_coefficient(term: Node) -> (f64, Node) {
    match term {
        Node::Binary(Op::Mul, left, right) => match left.as_number() {
            Some(k) => (k, *right),
            None => (1.0, Node::Binary(Op::Mul, left, right)),
        },
        term => (1.0, term),
    }
}

/// Splits a simplified factor into its numeric exponent and the remaining base.
///
/// `(pow b k)` gives `(k, b)`, anything else has exponent `1`.
fn split_exponent(factor: Node) -> (f64, Node) {
    match factor {
        Node::Binary(Op::Pow, left, right) => match right.as_number() {
            Some(k) => (k, *left),
            None => (1.0, Node::Binary(Op::Pow, left, right)),
        },
        factor => (1.0, factor),
    }
}

/// The flattened operands of a chain of `+` and `-`.
#[derive(Debug, Default)]
pub struct Terms {
    /// The sum of all numeric operands.
    constant: f64,

    /// Each distinct non-numeric factor with its accumulated coefficient, in order of first
    /// appearance.
    terms: Vec<(f64, Node)>,
}

impl Terms {
    /// Flattens the chain rooted at `node`.
    pub fn collect(node: Node, steps: &mut dyn StepCollector<Step>) -> Self {
        let mut terms = Self::default();
        terms.add(node, 1.0, steps);
        terms
    }

    /// Adds `node` to the sum with the given sign. The sign flips for the right side of every `-`.
    fn add(&mut self, node: Node, sign: f64, steps: &mut dyn StepCollector<Step>) {
        match node {
            Node::Binary(Op::Add, left, right) => {
                self.add(*left, sign, steps);
                self.add(*right, sign, steps);
            },
            Node::Binary(Op::Sub, left, right) => {
                self.add(*left, sign, steps);
                self.add(*right, -sign, steps);
            },
            mut term => {
                secondary(&mut term, steps);
                if let Some(n) = term.as_number() {
                    self.constant += sign * n;
                    return;
                }

                let (coefficient, factor) = split_coefficient(term);
                accumulate(&mut self.terms, sign * coefficient, factor);
            },
        }
    }

    /// Folds the terms back into `(+ (* c0 1) (+ (* c1 f1) ... (+ (* cn fn) 0)))`.
    pub fn rebuild(self, steps: &mut dyn StepCollector<Step>) -> Node {
        let tail = self.terms
            .into_iter()
            .rev()
            .fold(Node::number(0.0), |rest, (coefficient, factor)| {
                let term = Node::binary_with(Op::Mul, Node::number(coefficient), factor, steps);
                Node::binary_with(Op::Add, term, rest, steps)
            });
        let constant = Node::binary_with(Op::Mul, Node::number(self.constant), Node::number(1.0), steps);
        Node::binary_with(Op::Add, constant, tail, steps)
    }
}

/// The flattened operands of a chain of `*` and `/`.
#[derive(Debug)]
pub struct Factors {
    /// The product of all numeric operands.
    coefficient: f64,

    /// Each distinct non-numeric base with its accumulated exponent, in order of first appearance.
    factors: Vec<(f64, Node)>,
}

impl Default for Factors {
    fn default() -> Self {
        Self { coefficient: 1.0, factors: Vec::new() }
    }
}

impl Factors {
    /// Flattens the chain rooted at `node`. Returns [`None`] if the chain divides by a literal
    /// zero, in which case it cannot be rewritten without changing its meaning.
    pub fn collect(node: Node, steps: &mut dyn StepCollector<Step>) -> Option<Self> {
        let mut factors = Self::default();
        factors.multiply(node, 1.0, steps)?;
        Some(factors)
    }

    /// Multiplies `node` into the product, raised to the given sign. The sign flips for the right
    /// side of every `/`.
    fn multiply(&mut self, node: Node, sign: f64, steps: &mut dyn StepCollector<Step>) -> Option<()> {
        match node {
            Node::Binary(Op::Mul, left, right) => {
                self.multiply(*left, sign, steps)?;
                self.multiply(*right, sign, steps)
            },
            Node::Binary(Op::Div, left, right) => {
                self.multiply(*left, sign, steps)?;
                self.multiply(*right, -sign, steps)
            },
            mut factor => {
                secondary(&mut factor, steps);
                if let Some(n) = factor.as_number() {
                    if sign < 0.0 {
                        if n == 0.0 {
                            return None;
                        }
                        self.coefficient /= n;
                    } else {
                        self.coefficient *= n;
                    }
                    return Some(());
                }

                let (exponent, base) = split_exponent(factor);
                accumulate(&mut self.factors, sign * exponent, base);
                Some(())
            },
        }
    }

    /// Folds the factors back into `(* c (* (pow b1 e1) ... (* (pow bn en) 1)))`.
    pub fn rebuild(self, steps: &mut dyn StepCollector<Step>) -> Node {
        let tail = self.factors
            .into_iter()
            .rev()
            .fold(Node::number(1.0), |rest, (exponent, base)| {
                let factor = Node::binary_with(Op::Pow, base, Node::number(exponent), steps);
                Node::binary_with(Op::Mul, factor, rest, steps)
            });
        let coefficient = Node::binary_with(Op::Pow, Node::number(self.coefficient), Node::number(1.0), steps);
        Node::binary_with(Op::Mul, coefficient, tail, steps)
    }
}
