//! Cosine and sine of DH angles. Angles are in degrees.
//!
//! A symbolic angle that ends in an integer offset, like `θ1+90` or `θ2-180`, is resolved with
//! the exact quarter-turn identities instead of being left to the algebra backend:
//!
//! | offset (mod 360) | cos(b + offset) | sin(b + offset) |
//! |------------------|-----------------|-----------------|
//! | 0                | cos(b)          | sin(b)          |
//! | 90               | −sin(b)         | cos(b)          |
//! | 180              | −cos(b)         | −sin(b)         |
//! | 270              | sin(b)          | −cos(b)         |
//!
//! Other offsets are passed to the backend as `cos((b) + (offset))`.

use crate::arithmetic::Arithmetic;
use crate::expr::{cos_degrees, sin_degrees, Expr};
use crate::value::Value;

impl Arithmetic {
    /// Cosine of an angle in degrees.
    pub fn cos(&self, angle: &Value) -> Value {
        match angle {
            Value::Number(degrees) => Value::Number(cos_degrees(*degrees)),
            Value::Symbolic(expr) => match split_offset(expr) {
                Some((base, offset)) => match offset.rem_euclid(360) {
                    0 => Value::Symbolic(Expr::cos(base)),
                    90 => Value::Symbolic(Expr::neg(Expr::sin(base))),
                    180 => Value::Symbolic(Expr::neg(Expr::cos(base))),
                    270 => Value::Symbolic(Expr::sin(base)),
                    _ => self.simplify(Expr::cos(Expr::Add(vec![base, Expr::Const(offset as f64)]))),
                },
                None => Value::Symbolic(Expr::cos(expr.clone())),
            },
        }
    }

    /// Sine of an angle in degrees.
    pub fn sin(&self, angle: &Value) -> Value {
        match angle {
            Value::Number(degrees) => Value::Number(sin_degrees(*degrees)),
            Value::Symbolic(expr) => match split_offset(expr) {
                Some((base, offset)) => match offset.rem_euclid(360) {
                    0 => Value::Symbolic(Expr::sin(base)),
                    90 => Value::Symbolic(Expr::cos(base)),
                    180 => Value::Symbolic(Expr::neg(Expr::sin(base))),
                    270 => Value::Symbolic(Expr::neg(Expr::cos(base))),
                    _ => self.simplify(Expr::sin(Expr::Add(vec![base, Expr::Const(offset as f64)]))),
                },
                None => Value::Symbolic(Expr::sin(expr.clone())),
            },
        }
    }
}

/// Split `base + k` where `k` is the run of trailing integer literals of a sum (`θ+90+45`
/// gives `θ` and 135). Anything else has no offset.
fn split_offset(expr: &Expr) -> Option<(Expr, i64)> {
    let Expr::Add(terms) = expr else {
        return None;
    };
    let mut offset = 0i64;
    let mut base_len = terms.len();
    while base_len > 0 {
        match terms[base_len - 1] {
            Expr::Const(c) if c.fract() == 0.0 && c.abs() < 1e15 => {
                offset += c as i64;
                base_len -= 1;
            }
            _ => break,
        }
    }
    if base_len == terms.len() || base_len == 0 {
        return None;
    }
    let base = if base_len == 1 { terms[0].clone() } else { Expr::Add(terms[..base_len].to_vec()) };
    Some((base, offset))
}
