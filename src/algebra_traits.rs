//! The symbolic algebra seam. Everything in this crate that needs a computer algebra system
//! (simplification, partial derivatives, determinants) goes through the [`Algebra`] trait,
//! so the backend can be replaced without touching the kinematics.

use std::fmt;
use crate::expr::Expr;

/// Failures reported by the algebra backend. Callers on the arithmetic path never see these:
/// they are logged and the unsimplified expression is used instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// The text could not be parsed. `position` is the character offset of the problem.
    Parse { input: String, position: usize, message: String },
    UnknownFunction(String),
    NonIntegerExponent(String),
    DivisionByZero,
    /// Expansion produced more monomials than allowed by [`AlgebraOptions::max_terms`].
    TooManyTerms { limit: usize },
    /// An integer exponent left the `i32` range.
    ExponentOverflow,
    /// Numeric evaluation met a symbol with no value bound to it.
    UnboundSymbol(String),
    NotSquare { rows: usize, cols: usize },
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AlgebraError::Parse { ref input, position, ref message } =>
                write!(f, "Parse Error in '{}' at {}: {}", input, position, message),
            AlgebraError::UnknownFunction(ref name) =>
                write!(f, "Unknown function: {}", name),
            AlgebraError::NonIntegerExponent(ref exponent) =>
                write!(f, "Only integer exponents are supported, got {}", exponent),
            AlgebraError::DivisionByZero =>
                write!(f, "Division by zero"),
            AlgebraError::TooManyTerms { limit } =>
                write!(f, "Expansion exceeds {} terms", limit),
            AlgebraError::ExponentOverflow =>
                write!(f, "Exponent out of range"),
            AlgebraError::UnboundSymbol(ref name) =>
                write!(f, "No value bound to symbol {}", name),
            AlgebraError::NotSquare { rows, cols } =>
                write!(f, "Determinant needs a square matrix, got {}x{}", rows, cols),
        }
    }
}

impl std::error::Error for AlgebraError {}

/// Tuning of the symbolic backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgebraOptions {
    /// Maximal number of monomials a fully expanded expression may have.
    pub max_terms: usize,
}

impl Default for AlgebraOptions {
    fn default() -> Self {
        AlgebraOptions { max_terms: 4096 }
    }
}

/// Computer algebra operations used by the kinematics engine. Angles inside `sin` and `cos`
/// are in degrees whenever they are evaluated to numbers.
pub trait Algebra: Send + Sync {
    /// Parse infix text like `L1*cos(θ1 + 90)` into an expression tree.
    fn parse(&self, text: &str) -> Result<Expr, AlgebraError>;

    /// Bring the expression to canonical expanded form and apply the trigonometric
    /// angle-sum identities.
    fn simplify(&self, expr: &Expr) -> Result<Expr, AlgebraError>;

    /// Simplified partial derivative of `expr` with respect to `symbol`.
    fn derivative(&self, expr: &Expr, symbol: &str) -> Result<Expr, AlgebraError>;

    /// Determinant of a square matrix. The result is not simplified.
    fn determinant(&self, matrix: &[Vec<Expr>]) -> Result<Expr, AlgebraError>;
}
