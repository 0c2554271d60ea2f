//! Zero-eliding hybrid arithmetic on [`Value`]s.
//!
//! Numbers are combined directly. As soon as an expression is involved the operation is built
//! as an expression and handed to the algebra backend for simplification. Simplification is
//! fail-soft: if the backend gives up, the warning is logged and the unsimplified expression
//! is used, so a matrix is always produced.

use std::sync::Arc;
use tracing::warn;

use crate::algebra_impl::SymbolicAlgebra;
use crate::algebra_traits::Algebra;
use crate::expr::Expr;
use crate::utils::snap_to_zero;
use crate::value::Value;

/// Arithmetic over values, backed by a shared algebra backend.
#[derive(Clone)]
pub struct Arithmetic {
    algebra: Arc<dyn Algebra>,
}

impl Default for Arithmetic {
    fn default() -> Self {
        Arithmetic::new(Arc::new(SymbolicAlgebra::default()))
    }
}

impl Arithmetic {
    pub fn new(algebra: Arc<dyn Algebra>) -> Self {
        Arithmetic { algebra }
    }

    pub fn algebra(&self) -> &dyn Algebra {
        self.algebra.as_ref()
    }

    pub fn add(&self, x: &Value, y: &Value) -> Value {
        if x.is_zero() {
            return y.clone();
        }
        if y.is_zero() {
            return x.clone();
        }
        match (x, y) {
            (Value::Number(a), Value::Number(b)) => Value::Number(snap_to_zero(a + b)),
            _ => self.simplify(Expr::Add(vec![x.to_expr(), y.to_expr()])),
        }
    }

    pub fn subtract(&self, x: &Value, y: &Value) -> Value {
        if y.is_zero() {
            return x.clone();
        }
        if x.is_zero() {
            return self.negate(y);
        }
        match (x, y) {
            (Value::Number(a), Value::Number(b)) => Value::Number(snap_to_zero(a - b)),
            _ => self.simplify(Expr::Add(vec![x.to_expr(), Expr::neg(y.to_expr())])),
        }
    }

    pub fn multiply(&self, x: &Value, y: &Value) -> Value {
        if x.is_zero() || y.is_zero() {
            return Value::zero();
        }
        match (x, y) {
            (Value::Number(a), Value::Number(b)) => Value::Number(snap_to_zero(a * b)),
            _ => self.simplify(Expr::Mul(vec![x.to_expr(), y.to_expr()])),
        }
    }

    pub fn negate(&self, x: &Value) -> Value {
        match x {
            Value::Number(a) => Value::Number(snap_to_zero(-a)),
            Value::Symbolic(expr) => self.simplify(Expr::neg(expr.clone())),
        }
    }

    /// Simplify through the backend. Never fails: on error the input is returned as is.
    pub fn simplify(&self, expr: Expr) -> Value {
        match self.algebra.simplify(&expr) {
            Ok(simplified) => Value::from_expr(simplified),
            Err(err) => {
                warn!(expression = %expr, error = %err, "Could not simplify, keeping the expression as is");
                Value::from_expr(expr)
            }
        }
    }
}
