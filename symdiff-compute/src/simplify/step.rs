/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `x+2 = 2+x`
    /// `x*2 = 2*x`
    /// `x-2 = -2+x`
    /// `x/2 = 0.5*x`
    PushCoefficient,

    /// `2+3 = 5`
    /// `cos(0) = 1`
    FoldConstant,

    /// `0+a = a`
    AddZero,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*(3*a) = 6*a`
    MergeCoefficients,

    /// `a^1 = a`
    PowerOne,

    /// `a+a = 2a`
    /// `a+2a-a = 2a`
    /// etc.
    CombineLikeTerms,

    /// `a*a = a^2`
    /// `a*a/a = a`
    /// etc.
    CombineLikeFactors,
}
