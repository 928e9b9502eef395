//! Module to simplify expression trees.
//!
//! Simplification happens in two independent passes:
//!
//! - The **primary** pass ([`primary`]) looks at a single node and collapses it if it is an
//!   identity (`0+a`, `1*a`, `a^1`), an annihilator (`0*a`), two stacked coefficients (`2*(3*a)`),
//!   or an operation on numeric literals only (`2+3`, `cos(0)`). Together with [`push_coefficients`],
//!   which moves numeric literals into the left operand, it runs every time a node is constructed.
//! - The **secondary** pass ([`secondary`]) flattens whole chains of `+`/`-` and `*`/`/` into like
//!   terms and like factors, then rebuilds them. This is what turns `x + x + x` into `3x` and `x*x`
//!   into `x^2`.
//!
//! The [`simplify`] function runs the full sequence (push, primary, secondary, primary) to bring
//! an expression into canonical form. Canonical form is only guaranteed for expressions with a
//! single variable: like terms are found by structural equality, which knows nothing about
//! different variables commuting.
//!
//! ```
//! use symdiff_compute::{simplify::simplify, Node};
//!
//! let expr: Node = "(+ x (+ x x))".parse().unwrap();
//! assert_eq!(simplify(&expr).to_string(), "(* 3 x)");
//! ```

mod flatten;
pub mod step;

use crate::eval::{Ctxt, Eval};
use crate::node::{Node, Op};
use crate::step_collector::StepCollector;
use flatten::{Factors, Terms};
use step::Step;

/// Moves a numeric right operand of a binary node into the left, coefficient position.
///
/// - `(+ a k)` and `(* a k)` swap their operands.
/// - `(- a k)` becomes `(+ -k a)`.
/// - `(/ a k)` becomes `(* 1/k a)`, unless `k` is zero.
///
/// Any other node is left untouched.
pub fn push_coefficients(node: &mut Node, steps: &mut dyn StepCollector<Step>) {
    let Node::Binary(op, left, right) = node else {
        return;
    };
    let Some(k) = right.as_number() else {
        return;
    };

    match op {
        Op::Add | Op::Mul => std::mem::swap(left, right),
        Op::Sub => {
            **right = std::mem::replace(&mut **left, Node::number(-k));
            *op = Op::Add;
        },
        Op::Div if k != 0.0 => {
            **right = std::mem::replace(&mut **left, Node::number(1.0 / k));
            *op = Op::Mul;
        },
        _ => return,
    }

    steps.push(Step::PushCoefficient);
}

/// Replaces a constant node with its value, if it can be evaluated to a finite number.
///
/// A fold that fails (`(/ 1 0)`, `(ln -1)`, an unsupported operator) leaves the node as it was.
fn fold(node: Node) -> Result<(Node, Step), Node> {
    match node.eval(&Ctxt::default()) {
        Ok(value) if value.is_finite() => Ok((Node::number(value), Step::FoldConstant)),
        _ => Err(node),
    }
}

/// Applies one local collapse to the node. Returns the unchanged node as the error if no collapse
/// applies.
fn collapse(node: Node) -> Result<(Node, Step), Node> {
    let constant = match &node {
        Node::Number(_) | Node::Symbol(_) => return Err(node),
        Node::Unary(_, operand) => operand.is_number(),
        Node::Binary(_, left, right) => left.is_number() && right.is_number(),
    };
    if constant {
        return fold(node);
    }

    match node {
        Node::Binary(Op::Add, left, right) if left.as_number() == Some(0.0) => {
            Ok((*right, Step::AddZero))
        },
        Node::Binary(Op::Mul, left, _) if left.as_number() == Some(0.0) => {
            Ok((Node::number(0.0), Step::MultiplyZero))
        },
        Node::Binary(Op::Mul, left, right) if left.as_number() == Some(1.0) => {
            Ok((*right, Step::MultiplyOne))
        },
        Node::Binary(Op::Mul, left, right) => match (left.as_number(), *right) {
            (Some(k), Node::Binary(Op::Mul, inner, rest)) => match inner.as_number() {
                Some(j) => Ok((
                    Node::Binary(Op::Mul, Box::new(Node::number(k * j)), rest),
                    Step::MergeCoefficients,
                )),
                None => Err(Node::Binary(Op::Mul, left, Box::new(Node::Binary(Op::Mul, inner, rest)))),
            },
            (_, right) => Err(Node::Binary(Op::Mul, left, Box::new(right))),
        },
        Node::Binary(Op::Pow, left, right) if right.as_number() == Some(1.0) => {
            Ok((*left, Step::PowerOne))
        },
        node => Err(node),
    }
}

/// Collapses the node locally until no more collapses apply. Only the node itself is considered;
/// its operands are assumed to have been collapsed when they were built.
///
/// Running this twice gives the same tree as running it once.
pub fn primary(node: &mut Node, steps: &mut dyn StepCollector<Step>) {
    let mut current = std::mem::take(node);
    loop {
        match collapse(current) {
            Ok((next, step)) => {
                steps.push(step);
                current = next;
            },
            Err(unchanged) => {
                *node = unchanged;
                return;
            },
        }
    }
}

/// Flattens and rebuilds `+`/`-` and `*`/`/` chains, recursing into every operand.
///
/// This expects coefficients to have been pushed already (which the node constructors do).
pub fn secondary(node: &mut Node, steps: &mut dyn StepCollector<Step>) {
    match node {
        Node::Binary(Op::Add | Op::Sub, ..) => {
            let terms = Terms::collect(std::mem::take(node), steps);
            *node = terms.rebuild(steps);
            steps.push(Step::CombineLikeTerms);
        },
        Node::Binary(Op::Mul | Op::Div, ..) => {
            // the chain is rewritten on a copy, since it is left alone if it divides by zero
            let mut attempt = Vec::new();
            if let Some(factors) = Factors::collect(node.clone(), &mut attempt) {
                *node = factors.rebuild(&mut attempt);
                attempt.into_iter().for_each(|step| steps.push(step));
                steps.push(Step::CombineLikeFactors);
            }
        },
        Node::Binary(_, left, right) => {
            secondary(left, steps);
            secondary(right, steps);
            primary(node, steps);
        },
        Node::Unary(_, operand) => {
            secondary(operand, steps);
            primary(node, steps);
        },
        Node::Number(_) | Node::Symbol(_) => {},
    }
}

/// Brings the tree into canonical form in place: push, primary, secondary, primary.
pub fn canonicalize(node: &mut Node, steps: &mut dyn StepCollector<Step>) {
    push_coefficients(node, steps);
    primary(node, steps);
    secondary(node, steps);
    primary(node, steps);
}

/// Simplify the given expression into canonical form.
pub fn simplify(node: &Node) -> Node {
    let mut node = node.clone();
    canonicalize(&mut node, &mut ());
    node
}

/// Simplify the given expression into canonical form. The steps taken by the simplifier will also
/// be collected and returned. This is useful for debugging, and also for displaying the steps taken
/// to the user.
pub fn simplify_with_steps(node: &Node) -> (Node, Vec<Step>) {
    let mut steps = Vec::new();
    let mut node = node.clone();
    canonicalize(&mut node, &mut steps);
    (node, steps)
}

#[cfg(test)]
mod tests {
    use crate::error::DomainError;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(s: &str) -> Node {
        s.parse().unwrap()
    }

    fn raw(op: Op, left: Node, right: Node) -> Node {
        Node::Binary(op, Box::new(left), Box::new(right))
    }

    fn x() -> Node {
        Node::symbol("x")
    }

    #[test]
    fn push_add_and_mul() {
        let mut node = raw(Op::Add, x(), Node::number(2.0));
        let mut steps = Vec::new();
        push_coefficients(&mut node, &mut steps);
        assert_eq!(node, raw(Op::Add, Node::number(2.0), x()));
        assert_eq!(steps, vec![Step::PushCoefficient]);

        let mut node = raw(Op::Mul, x(), Node::number(2.0));
        push_coefficients(&mut node, &mut ());
        assert_eq!(node, raw(Op::Mul, Node::number(2.0), x()));
    }

    #[test]
    fn push_sub_and_div() {
        let mut node = raw(Op::Sub, x(), Node::number(2.0));
        push_coefficients(&mut node, &mut ());
        assert_eq!(node, raw(Op::Add, Node::number(-2.0), x()));

        let mut node = raw(Op::Div, x(), Node::number(4.0));
        push_coefficients(&mut node, &mut ());
        assert_eq!(node, raw(Op::Mul, Node::number(0.25), x()));
    }

    #[test]
    fn push_leaves_other_shapes() {
        for node in [
            raw(Op::Pow, x(), Node::number(2.0)),
            raw(Op::Div, x(), Node::number(0.0)),
            raw(Op::Add, Node::number(2.0), x()),
            Node::Unary(Op::Sin, Box::new(Node::number(2.0))),
            x(),
        ] {
            let mut pushed = node.clone();
            let mut steps = Vec::new();
            push_coefficients(&mut pushed, &mut steps);
            assert_eq!(pushed, node);
            assert!(steps.is_empty());
        }
    }

    #[test]
    fn primary_identities() {
        let cases = [
            (raw(Op::Add, Node::number(0.0), x()), x(), Step::AddZero),
            (raw(Op::Mul, Node::number(0.0), x()), Node::number(0.0), Step::MultiplyZero),
            (raw(Op::Mul, Node::number(1.0), x()), x(), Step::MultiplyOne),
            (raw(Op::Pow, x(), Node::number(1.0)), x(), Step::PowerOne),
            (raw(Op::Sub, Node::number(5.0), Node::number(7.0)), Node::number(-2.0), Step::FoldConstant),
            (Node::Unary(Op::Sqrt, Box::new(Node::number(9.0))), Node::number(3.0), Step::FoldConstant),
        ];

        for (mut node, expected, expected_step) in cases {
            let mut steps = Vec::new();
            primary(&mut node, &mut steps);
            assert_eq!(node, expected);
            assert_eq!(steps, vec![expected_step]);
        }
    }

    #[test]
    fn primary_merges_coefficients() {
        let mut node = raw(Op::Mul, Node::number(2.0), raw(Op::Mul, Node::number(3.0), x()));
        primary(&mut node, &mut ());
        assert_eq!(node, raw(Op::Mul, Node::number(6.0), x()));

        // the merged coefficient can itself be an identity
        let mut node = raw(Op::Mul, Node::number(2.0), raw(Op::Mul, Node::number(0.5), x()));
        let mut steps = Vec::new();
        primary(&mut node, &mut steps);
        assert_eq!(node, x());
        assert_eq!(steps, vec![Step::MergeCoefficients, Step::MultiplyOne]);
    }

    #[test]
    fn primary_keeps_failed_folds() {
        for node in [
            raw(Op::Div, Node::number(1.0), Node::number(0.0)),
            Node::Unary(Op::Ln, Box::new(Node::number(-1.0))),
            Node::Unary(Op::Sqrt, Box::new(Node::number(0.0))),
            Node::Unary(Op::from("tan"), Box::new(Node::number(1.0))),
            raw(Op::Pow, Node::number(0.0), Node::number(-1.0)),
        ] {
            let mut folded = node.clone();
            primary(&mut folded, &mut ());
            assert_eq!(folded, node);
        }
    }

    #[test]
    fn primary_leaves_other_shapes() {
        for node in [
            raw(Op::Add, x(), Node::number(0.0)),
            raw(Op::Sub, Node::number(0.0), x()),
            raw(Op::Pow, x(), Node::number(0.0)),
            raw(Op::Pow, Node::number(1.0), x()),
            raw(Op::Mul, x(), raw(Op::Mul, Node::number(2.0), x())),
            Node::Unary(Op::Sin, Box::new(x())),
        ] {
            let mut collapsed = node.clone();
            primary(&mut collapsed, &mut ());
            assert_eq!(collapsed, node);
        }
    }

    #[test]
    fn primary_is_idempotent() {
        let trees = [
            raw(Op::Add, Node::number(0.0), raw(Op::Add, Node::number(0.0), x())),
            raw(Op::Mul, Node::number(1.0), raw(Op::Mul, Node::number(0.0), x())),
            raw(Op::Mul, Node::number(4.0), raw(Op::Mul, Node::number(0.25), raw(Op::Pow, x(), Node::number(1.0)))),
            raw(Op::Pow, raw(Op::Pow, x(), Node::number(1.0)), Node::number(1.0)),
            raw(Op::Add, raw(Op::Add, Node::number(0.0), x()), Node::number(3.0)),
            parse("(/ (sin x) (pow x 3))"),
        ];

        for tree in trees {
            let mut once = tree.clone();
            primary(&mut once, &mut ());
            let mut twice = once.clone();
            primary(&mut twice, &mut ());
            assert_eq!(twice, once, "primary simplification of `{}`", tree);
        }
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplify(&parse("(+ x (+ x x))")), raw(Op::Mul, Node::number(3.0), x()));
        assert_eq!(simplify(&parse("(- (* 5 x) (* 2 x))")).to_string(), "(* 3 x)");
        assert_eq!(simplify(&parse("(+ 2 (+ x 3))")).to_string(), "(+ 5 x)");
        assert_eq!(simplify(&parse("(- (+ x 1) x)")), Node::number(1.0));
        assert_eq!(simplify(&parse("(+ (pow x 2) (pow x 2))")).to_string(), "(* 2 (pow x 2))");
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplify(&parse("(* x x)")), raw(Op::Pow, x(), Node::number(2.0)));
        assert_eq!(simplify(&parse("(* 2 (* x (* 3 x)))")).to_string(), "(* 6 (pow x 2))");
        assert_eq!(simplify(&parse("(/ (* x x) x)")), x());
        assert_eq!(simplify(&parse("(/ x x)")).to_string(), "(pow x 0)");
        assert_eq!(simplify(&parse("(/ 1 x)")).to_string(), "(pow x -1)");
    }

    #[test]
    fn recurses_into_other_operators() {
        assert_eq!(simplify(&parse("(sin (+ x x))")).to_string(), "(sin (* 2 x))");
        assert_eq!(simplify(&parse("(pow (* x x) 3)")).to_string(), "(pow (pow x 2) 3)");
        assert_eq!(simplify(&parse("(cos (- x x))")), Node::number(1.0));
    }

    #[test]
    fn division_by_zero_is_left_alone() {
        let node = parse("(/ x 0)");
        assert_eq!(simplify(&node), node);
    }

    #[test]
    fn division_by_zero_inside_sum_still_fails() {
        let names = ["x".to_string()];
        let values = [1.0];
        let ctxt = Ctxt::new(&names, &values).unwrap();

        for source in ["(+ x (/ 2 0))", "(+ x (/ 1 (- x x)))"] {
            let simplified = simplify(&parse(source));
            assert_eq!(simplified.to_string(), source);

            let error = simplified.eval(&ctxt).unwrap_err();
            assert!(error.is::<DomainError>(), "evaluating simplified `{}`", source);
        }
    }

    #[test]
    fn canonical_form_is_stable() {
        for source in [
            "(+ x (+ x x))",
            "(* x x)",
            "(- (pow x 3) (* 4 x))",
            "(/ (+ x 1) (* x x))",
            "(* (sin x) (sin x))",
        ] {
            let once = simplify(&parse(source));
            assert_eq!(simplify(&once), once, "simplification of `{}`", source);
        }
    }

    #[test]
    fn steps_are_collected() {
        let (node, steps) = simplify_with_steps(&parse("(+ x x)"));
        assert_eq!(node.to_string(), "(* 2 x)");
        assert_eq!(steps.last(), Some(&Step::CombineLikeTerms));
        assert!(steps.contains(&Step::AddZero));

        let (_, steps) = simplify_with_steps(&parse("(* x x)"));
        assert_eq!(steps.last(), Some(&Step::CombineLikeFactors));
        assert!(steps.contains(&Step::MultiplyOne));
    }
}
