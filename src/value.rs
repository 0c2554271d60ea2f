//! The hybrid scalar every kinematic quantity is made of: either a plain number or a
//! symbolic expression.

use std::collections::HashMap;
use std::fmt;

use crate::algebra_traits::AlgebraError;
use crate::expr::Expr;
use crate::parameter_error::ParameterError;
use crate::parser;
use crate::utils::{format_number, snap_to_zero};

/// Number or expression. Arithmetic on two numbers stays numeric, anything touching an
/// expression becomes an expression. An expression that turns out constant is stored as a
/// number, so there is a single representation of every constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Symbolic(Expr),
}

impl Value {
    pub fn zero() -> Self {
        Value::Number(0.0)
    }

    pub fn one() -> Self {
        Value::Number(1.0)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbolic(Expr::symbol(name))
    }

    /// Wrap an expression. An expression without symbols (`2*45`, `1/2`) is evaluated and
    /// stored as a number, unless its value is not finite.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Const(c) => Value::Number(snap_to_zero(c)),
            other if other.symbols().is_empty() => match other.evaluate(&HashMap::new()) {
                Ok(x) if x.is_finite() => Value::Number(snap_to_zero(x)),
                _ => Value::Symbolic(other),
            },
            other => Value::Symbolic(other),
        }
    }

    /// Parse a user supplied field. Empty text is zero, numeric-looking text is a number and
    /// everything else must be a valid expression.
    pub fn parse(text: &str) -> Result<Self, ParameterError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::zero());
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return Ok(Value::Number(number));
            }
        }
        parser::parse(trimmed)
            .map(Value::from_expr)
            .map_err(|err| ParameterError::ParseError(format!("'{}': {}", trimmed, err)))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Number(x) => *x == 0.0,
            Value::Symbolic(expr) => expr.is_zero(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Value::Number(x) => Some(x),
            Value::Symbolic(_) => None,
        }
    }

    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Number(x) => Expr::Const(*x),
            Value::Symbolic(expr) => expr.clone(),
        }
    }

    /// Substitute the bound symbols. The result is numeric once nothing free remains.
    pub fn bind(&self, bindings: &HashMap<String, f64>) -> Value {
        match self {
            Value::Number(_) => self.clone(),
            Value::Symbolic(expr) => Value::from_expr(expr.substitute(bindings)),
        }
    }

    /// Numeric value under the bindings (trigonometry in degrees).
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<f64, AlgebraError> {
        match self {
            Value::Number(x) => Ok(*x),
            Value::Symbolic(expr) => expr.evaluate(bindings),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::from_expr(expr)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", format_number(*x)),
            Value::Symbolic(expr) => write!(f, "{}", expr),
        }
    }
}
