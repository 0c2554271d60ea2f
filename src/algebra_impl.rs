//! The default symbolic backend, implemented in this crate.

use crate::algebra_traits::{Algebra, AlgebraError, AlgebraOptions};
use crate::expr::Expr;
use crate::{derivative, determinant, parser, simplify};

/// Stateless computer algebra backend. It is cheap to create and safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicAlgebra {
    pub options: AlgebraOptions,
}

impl SymbolicAlgebra {
    pub fn new(options: AlgebraOptions) -> Self {
        SymbolicAlgebra { options }
    }
}

impl Algebra for SymbolicAlgebra {
    fn parse(&self, text: &str) -> Result<Expr, AlgebraError> {
        parser::parse(text)
    }

    fn simplify(&self, expr: &Expr) -> Result<Expr, AlgebraError> {
        simplify::simplify(expr, &self.options)
    }

    fn derivative(&self, expr: &Expr, symbol: &str) -> Result<Expr, AlgebraError> {
        self.simplify(&derivative::derivative(expr, symbol)?)
    }

    fn determinant(&self, matrix: &[Vec<Expr>]) -> Result<Expr, AlgebraError> {
        determinant::determinant(matrix)
    }
}
