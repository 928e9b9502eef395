//! Evaluation, symbolic differentiation, and simplification of expressions written in prefix
//! notation.
//!
//! Expressions are parsed by [`symdiff_parser`] and converted into [`Node`] trees, which are
//! normalized as they are built. A [`Function`] pairs a tree with the ordered list of variables it
//! is defined over, and is the main entry point of this crate:
//!
//! ```
//! use symdiff_compute::Function;
//!
//! let f = Function::single("x", "(+ x (+ x x))").unwrap();
//! assert_eq!(f.eval(&[2.0]).unwrap(), 6.0);
//!
//! let mut g = f.clone();
//! g.simplify();
//! assert_eq!(g.to_string(), "(* 3 x)");
//!
//! let df = Function::single("x", "(* x x)").unwrap().derivative("x").unwrap();
//! assert_eq!(df.to_string_with_vars(), "(x): (* 2 x)");
//! ```
//!
//! The building blocks are also available on their own: [`Eval`] for numerical evaluation of a
//! tree, [`derivative`] for symbolic differentiation, and the [`simplify`] module for the
//! simplification passes.

pub mod derivative;
pub mod error;
pub mod eval;
pub mod function;
pub mod node;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use eval::{Ctxt, Eval};
pub use function::Function;
pub use node::{Node, Op};
pub use simplify::{simplify, simplify_with_steps, step::Step};
pub use step_collector::StepCollector;
