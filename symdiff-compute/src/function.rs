//! Functions: an expression tree together with the ordered list of variables it is defined over.

use crate::derivative::derivative;
use crate::error::DuplicateVariable;
use crate::eval::{Ctxt, Eval};
use crate::node::Node;
use crate::simplify::{self, step::Step};
use std::fmt;
use symdiff_error::Error;

/// An expression of zero or more variables.
///
/// The order of the variables matters: values passed to [`Function::eval`] and replacements passed
/// to [`Function::transform`] are matched to variables by position.
///
/// ```
/// use symdiff_compute::Function;
///
/// let f = Function::new(["x", "y"], "(+ (* x x) y)").unwrap();
/// assert_eq!(f.eval(&[3.0, 1.0]).unwrap(), 10.0);
///
/// let df = f.derivative("x").unwrap();
/// assert_eq!(df.to_string_named("f_x"), "f_x(x, y): (* 2 x)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The names of the variables, in order.
    variables: Vec<String>,

    /// The root of the expression tree.
    root: Node,
}

impl Function {
    /// Parses `expr` into a function of the given variables.
    ///
    /// Returns an error if the expression cannot be parsed, or if a variable is listed twice.
    pub fn new<I, S>(variables: I, expr: &str) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = expr.parse()?;
        Self::with_root(variables.into_iter().map(Into::into).collect(), root)
    }

    /// Parses `expr` into a function of a single variable.
    pub fn single(variable: impl Into<String>, expr: &str) -> Result<Self, Error> {
        Self::new([variable.into()], expr)
    }

    /// Creates a function of no variables from an existing tree. Only constant trees can be
    /// evaluated this way.
    pub fn from_root(root: Node) -> Self {
        Self { variables: Vec::new(), root }
    }

    /// Creates a function from an existing tree, checking that the variables are distinct.
    pub fn with_root(variables: Vec<String>, root: Node) -> Result<Self, Error> {
        for (i, name) in variables.iter().enumerate() {
            if variables[..i].contains(name) {
                return Err(Error::spanless(DuplicateVariable { name: name.clone() }));
            }
        }

        Ok(Self { variables, root })
    }

    /// Returns the variables of this function, in order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Returns the root of the expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns the position of the given variable, if it is a variable of this function.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|variable| variable == name)
    }

    /// Evaluates the function, binding each variable to the value at the same position.
    ///
    /// Returns an error if the number of values differs from the number of variables, or if
    /// evaluation fails.
    pub fn eval(&self, values: &[f64]) -> Result<f64, Error> {
        let ctxt = Ctxt::new(&self.variables, values)?;
        self.root.eval(&ctxt)
    }

    /// Returns the partial derivative of this function with respect to the given variable, as a
    /// function of the same variables.
    ///
    /// Like terms and like factors of the derivative are combined, but the result is not fully
    /// simplified; use [`Function::simplify`] for that.
    pub fn derivative(&self, with: &str) -> Result<Self, Error> {
        let mut root = derivative(&self.root, with)?;
        simplify::secondary(&mut root, &mut ());
        Ok(Self { variables: self.variables.clone(), root })
    }

    /// Simplifies the expression tree into canonical form, in place.
    pub fn simplify(&mut self) {
        simplify::canonicalize(&mut self.root, &mut ());
    }

    /// Simplifies the expression tree into canonical form, in place, returning the steps taken.
    pub fn simplify_with_steps(&mut self) -> Vec<Step> {
        let mut steps = Vec::new();
        simplify::canonicalize(&mut self.root, &mut steps);
        steps
    }

    /// Substitutes the `i`th variable of this function with the tree of the `i`th replacement,
    /// everywhere it appears. The variables of this function become the variables of the
    /// replacements.
    ///
    /// Nothing happens unless there is exactly one replacement per variable and all replacements
    /// share the same variable list. Returns whether the substitution took place.
    pub fn transform(&mut self, replacements: &[Function]) -> bool {
        let Some(first) = replacements.first() else {
            return false;
        };
        if replacements.len() != self.variables.len()
            || replacements.iter().any(|f| f.variables != first.variables)
        {
            return false;
        }

        substitute(&mut self.root, &self.variables, replacements);
        self.variables = first.variables.clone();
        true
    }

    /// Returns the expression tree prefixed with the variable list, as in `(x, y): (+ x y)`.
    pub fn to_string_with_vars(&self) -> String {
        format!("({}): {}", self.variables.join(", "), self.root)
    }

    /// Returns the expression tree prefixed with the given name and the variable list, as in
    /// `f(x, y): (+ x y)`.
    pub fn to_string_named(&self, name: &str) -> String {
        format!("{}{}", name, self.to_string_with_vars())
    }
}

/// Replaces every variable leaf below `node` with the root of its replacement.
fn substitute(node: &mut Node, variables: &[String], replacements: &[Function]) {
    match node {
        Node::Symbol(name) => {
            if let Some(i) = variables.iter().position(|variable| variable == name) {
                node.set(replacements[i].root.clone());
            }
        },
        Node::Number(_) => {},
        Node::Unary(_, operand) => substitute(operand, variables, replacements),
        Node::Binary(_, left, right) => {
            substitute(left, variables, replacements);
            substitute(right, variables, replacements);
        },
    }
}

/// Prints the expression tree only.
impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
