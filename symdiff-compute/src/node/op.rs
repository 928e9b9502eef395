use std::fmt;

/// The operator of a unary or binary [`Node`](super::Node).
///
/// The vocabulary is closed, but trees may still carry tokens outside of it (they come straight
/// from user input); those are kept as [`Op::Other`] and rejected when the tree is evaluated or
/// differentiated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Add,

    /// `-`
    Sub,

    /// `*`
    Mul,

    /// `/`
    Div,

    /// `pow`, raising the left operand to the power of the right operand.
    Pow,

    /// `e^`, the exponential function.
    Exp,

    /// `ln`, the natural logarithm.
    Ln,

    /// `sin`
    Sin,

    /// `cos`
    Cos,

    /// `sqrt`
    Sqrt,

    /// Any token outside of the supported vocabulary.
    Other(String),
}

impl Op {
    /// Returns the token that spells this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "pow",
            Op::Exp => "e^",
            Op::Ln => "ln",
            Op::Sin => "sin",
            Op::Cos => "cos",
            Op::Sqrt => "sqrt",
            Op::Other(token) => token,
        }
    }

    /// Returns true if this is one of the supported binary operators.
    pub fn is_binary(&self) -> bool {
        matches!(self, Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Pow)
    }

    /// Returns true if this is one of the supported unary operators.
    pub fn is_unary(&self) -> bool {
        matches!(self, Op::Exp | Op::Ln | Op::Sin | Op::Cos | Op::Sqrt)
    }
}

impl From<&str> for Op {
    fn from(token: &str) -> Self {
        match token {
            "+" => Op::Add,
            "-" => Op::Sub,
            "*" => Op::Mul,
            "/" => Op::Div,
            "pow" => Op::Pow,
            "e^" => Op::Exp,
            "ln" => Op::Ln,
            "sin" => Op::Sin,
            "cos" => Op::Cos,
            "sqrt" => Op::Sqrt,
            other => Op::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
