//! Symbolic differentiation of expression trees.
//!
//! Derivatives are built node by node with the normalizing constructors, so coefficients end up on
//! the left and trivial nodes (`(* 1 f)`, `(+ 0 f)`, constant subtrees) never appear in the
//! result. Like terms are not combined; run the result through [`simplify`](crate::simplify) or
//! [`secondary`](crate::simplify::secondary) for that.
//!
//! ```
//! use symdiff_compute::{derivative, Node};
//!
//! let f: Node = "(pow x 3)".parse().unwrap();
//! assert_eq!(derivative(&f, "x").unwrap().to_string(), "(* 3 (pow x 2))");
//! ```

use crate::error::NotDifferentiable;
use crate::node::{Node, Op};
use symdiff_error::Error;

/// Computes the partial derivative of `f` with respect to the variable `with`. The input tree is
/// not modified.
///
/// Variables other than `with` are treated as constants. The exponent of `pow` is always treated
/// as a constant, so the power rule is applied even if the exponent contains `with`.
///
/// Returns an error if the tree contains an operator that has no differentiation rule.
pub fn derivative(f: &Node, with: &str) -> Result<Node, Error> {
    match f {
        Node::Number(_) => Ok(Node::number(0.0)),
        Node::Symbol(name) => Ok(Node::number(if name == with { 1.0 } else { 0.0 })),
        Node::Unary(op, operand) => {
            if !op.is_unary() {
                return Err(Error::spanless(NotDifferentiable { op: op.clone(), arity: 1 }));
            }

            let d = derivative(operand, with)?;
            let l = (**operand).clone();
            match op {
                Op::Exp => Ok(Node::binary(Op::Mul, d, Node::unary(Op::Exp, l))),
                Op::Ln => Ok(Node::binary(Op::Div, d, l)),
                Op::Sin => Ok(Node::binary(Op::Mul, d, Node::unary(Op::Cos, l))),
                Op::Cos => Ok(Node::binary(
                    Op::Mul,
                    d,
                    Node::binary(Op::Mul, Node::number(-1.0), Node::unary(Op::Sin, l)),
                )),
                _ => {
                    // sqrt
                    Ok(Node::binary(
                        Op::Div,
                        Node::binary(Op::Mul, Node::number(0.5), d),
                        f.clone(),
                    ))
                },
            }
        },
        Node::Binary(op, left, right) => {
            if !op.is_binary() {
                return Err(Error::spanless(NotDifferentiable { op: op.clone(), arity: 2 }));
            }

            let dl = derivative(left, with)?;
            let dr = derivative(right, with)?;
            let l = (**left).clone();
            let r = (**right).clone();
            match op {
                Op::Add | Op::Sub => Ok(Node::binary(op.clone(), dl, dr)),
                Op::Mul => Ok(Node::binary(
                    Op::Add,
                    Node::binary(Op::Mul, dl, r),
                    Node::binary(Op::Mul, dr, l),
                )),
                Op::Div => {
                    let numerator = Node::binary(
                        Op::Sub,
                        Node::binary(Op::Mul, dl, r.clone()),
                        Node::binary(Op::Mul, dr, l),
                    );
                    Ok(Node::binary(Op::Div, numerator, Node::binary(Op::Pow, r, Node::number(2.0))))
                },
                _ => {
                    // pow
                    let exponent = Node::binary(Op::Sub, r.clone(), Node::number(1.0));
                    Ok(Node::binary(
                        Op::Mul,
                        dl,
                        Node::binary(Op::Mul, r, Node::binary(Op::Pow, l, exponent)),
                    ))
                },
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::eval::{Ctxt, Eval};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Step of the central difference.
    const H: f64 = 1e-5;

    /// Allowed absolute difference between the symbolic and numerical derivatives.
    const TOLERANCE: f64 = 1e-4;

    fn parse(s: &str) -> Node {
        s.parse().unwrap()
    }

    fn at(node: &Node, x: f64) -> f64 {
        let names = ["x".to_string()];
        let values = [x];
        node.eval(&Ctxt::new(&names, &values).unwrap()).unwrap()
    }

    /// Compares the symbolic derivative of `source` with respect to `x` against a central
    /// difference at a few points.
    fn check(source: &str) {
        let f = parse(source);
        let d = derivative(&f, "x").unwrap();
        for x in [0.5, 1.0, 1.5, 2.5] {
            let numerical = (at(&f, x + H) - at(&f, x - H)) / (2.0 * H);
            assert_float_absolute_eq!(at(&d, x), numerical, TOLERANCE);
        }
    }

    #[test]
    fn symbolic_forms() {
        let cases = [
            ("(pow x 3)", "(* 3 (pow x 2))"),
            ("(sin x)", "(cos x)"),
            ("(cos x)", "(* -1 (sin x))"),
            ("(* x x)", "(+ x x)"),
            ("(e^ x)", "(e^ x)"),
            ("(ln x)", "(/ 1 x)"),
            ("(+ x 5)", "1"),
            ("(* 4 x)", "4"),
        ];

        for (source, expected) in cases {
            assert_eq!(derivative(&parse(source), "x").unwrap().to_string(), expected);
        }
    }

    #[test]
    fn other_variables_are_constant() {
        assert_eq!(derivative(&parse("(* x y)"), "x").unwrap(), Node::symbol("y"));
        assert_eq!(derivative(&parse("(+ x y)"), "y").unwrap(), Node::number(1.0));
        assert_eq!(derivative(&parse("(sin y)"), "x").unwrap(), Node::number(0.0));
        assert_eq!(derivative(&parse("7"), "x").unwrap(), Node::number(0.0));
    }

    #[test]
    fn input_is_unchanged() {
        let f = parse("(/ (sin x) (pow x 2))");
        let before = f.clone();
        derivative(&f, "x").unwrap();
        assert_eq!(f, before);
    }

    #[test]
    fn square() {
        // d/dx x^2 = 2x
        let d = derivative(&parse("(* x x)"), "x").unwrap();
        for x in [-3.0, -0.5, 0.0, 1.0, 4.0] {
            assert_eq!(at(&d, x), 2.0 * x);
        }
    }

    #[test]
    fn sine() {
        let d = derivative(&parse("(sin x)"), "x").unwrap();
        for x in [-2.0, 0.0, 0.75, 3.0] {
            assert_eq!(at(&d, x), f64::cos(x));
        }
    }

    #[test]
    fn finite_differences() {
        for source in [
            "(* x x)",
            "(sin x)",
            "(cos (* 3 x))",
            "(pow x 3)",
            "(- (pow x 2) (* 3 x))",
            "(e^ (* 2 x))",
            "(ln (* x x))",
            "(sqrt (+ x 1))",
            "(/ (sin x) x)",
            "(/ 1 (+ x 2))",
            "(* (e^ x) (cos x))",
            "(pow (sin x) 2)",
            "(sqrt (ln (+ x 1)))",
        ] {
            check(source);
        }
    }

    #[test]
    fn higher_order() {
        // d²/dx² sin(x) = -sin(x)
        let f = parse("(sin x)");
        let d2 = derivative(&derivative(&f, "x").unwrap(), "x").unwrap();
        assert_eq!(d2.to_string(), "(* -1 (sin x))");
    }

    #[test]
    fn unknown_operator() {
        let error = derivative(&parse("(+ x (tan x))"), "x").unwrap_err();
        assert_eq!(
            error.downcast_ref::<NotDifferentiable>(),
            Some(&NotDifferentiable { op: Op::from("tan"), arity: 1 }),
        );

        let error = derivative(&parse("(sin x y)"), "x").unwrap_err();
        assert!(error.is::<NotDifferentiable>());
    }
}
