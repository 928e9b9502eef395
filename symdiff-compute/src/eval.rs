//! Numerical evaluation of expression trees.

use crate::error::{BindingCountMismatch, DomainError, UnboundSymbol, UnsupportedOperator};
use crate::node::{Node, Op};
use symdiff_error::Error;

/// The variable bindings an expression is evaluated under: the `i`th name is bound to the `i`th
/// value.
///
/// The default context binds nothing, so only constant expressions can be evaluated under it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ctxt<'a> {
    names: &'a [String],
    values: &'a [f64],
}

impl<'a> Ctxt<'a> {
    /// Creates a context binding each name to the value at the same position.
    ///
    /// Returns an error if there are not exactly as many values as names.
    pub fn new(names: &'a [String], values: &'a [f64]) -> Result<Self, Error> {
        if names.len() != values.len() {
            return Err(Error::spanless(BindingCountMismatch {
                expected: names.len(),
                given: values.len(),
            }));
        }

        Ok(Self { names, values })
    }

    /// Returns the value bound to the given name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|bound| bound == name)
            .map(|i| self.values[i])
    }
}

/// Any type that can be numerically evaluated.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error>;

    /// Evaluate the expression to produce a value, using the default context.
    fn eval_default(&self) -> Result<f64, Error> {
        self.eval(&Ctxt::default())
    }
}

/// Fails with a [`DomainError`] unless `value` is strictly positive.
fn positive(op: Op, value: f64) -> Result<f64, Error> {
    if value <= 0.0 {
        Err(Error::spanless(DomainError { op, value }))
    } else {
        Ok(value)
    }
}

impl Eval for Node {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        match self {
            Node::Number(n) => Ok(*n),
            Node::Symbol(name) => ctxt.get(name)
                .ok_or_else(|| Error::spanless(UnboundSymbol { name: name.clone() })),
            Node::Unary(op, operand) => {
                let apply: fn(f64) -> Result<f64, Error> = match op {
                    Op::Exp => |value: f64| Ok(value.exp()),
                    Op::Ln => |value: f64| positive(Op::Ln, value).map(f64::ln),
                    Op::Sin => |value: f64| Ok(value.sin()),
                    Op::Cos => |value: f64| Ok(value.cos()),
                    Op::Sqrt => |value: f64| positive(Op::Sqrt, value).map(f64::sqrt),
                    _ => return Err(Error::spanless(UnsupportedOperator { op: op.clone(), arity: 1 })),
                };
                apply(operand.eval(ctxt)?)
            },
            Node::Binary(op, left, right) => {
                let apply: fn(f64, f64) -> Result<f64, Error> = match op {
                    Op::Add => |left: f64, right: f64| Ok(left + right),
                    Op::Sub => |left: f64, right: f64| Ok(left - right),
                    Op::Mul => |left: f64, right: f64| Ok(left * right),
                    Op::Div => |left: f64, right: f64| if right == 0.0 {
                        Err(Error::spanless(DomainError { op: Op::Div, value: right }))
                    } else {
                        Ok(left / right)
                    },
                    Op::Pow => |left: f64, right: f64| Ok(left.powf(right)),
                    _ => return Err(Error::spanless(UnsupportedOperator { op: op.clone(), arity: 2 })),
                };
                apply(left.eval(ctxt)?, right.eval(ctxt)?)
            },
        }
    }
}
