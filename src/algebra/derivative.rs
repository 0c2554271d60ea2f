//! Symbolic partial derivatives. The result is raw and is expected to be simplified.
//! `sin` and `cos` are differentiated with the usual rules, `d sin(u) = cos(u)·du`.

use crate::algebra_traits::AlgebraError;
use crate::expr::Expr;

pub(crate) fn derivative(expr: &Expr, symbol: &str) -> Result<Expr, AlgebraError> {
    Ok(match expr {
        Expr::Const(_) => Expr::Const(0.0),
        Expr::Symbol(name) => Expr::Const(if name == symbol { 1.0 } else { 0.0 }),
        Expr::Add(items) => Expr::Add(
            items.iter().map(|item| derivative(item, symbol)).collect::<Result<Vec<_>, _>>()?,
        ),
        Expr::Mul(items) => {
            // Product rule: Σ_i f_i' Π_{j≠i} f_j
            let mut terms = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let d = derivative(item, symbol)?;
                if d.is_zero() {
                    continue;
                }
                let mut product = Vec::with_capacity(items.len());
                product.push(d);
                product.extend(items.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, f)| f.clone()));
                terms.push(Expr::Mul(product));
            }
            Expr::Add(terms)
        }
        Expr::Neg(inner) => Expr::neg(derivative(inner, symbol)?),
        Expr::Pow(base, exp) => {
            let d = derivative(base, symbol)?;
            if d.is_zero() {
                return Ok(Expr::Const(0.0));
            }
            let lowered = exp.checked_sub(1).ok_or(AlgebraError::ExponentOverflow)?;
            Expr::Mul(vec![
                Expr::Const(*exp as f64),
                Expr::Pow(base.clone(), lowered),
                d,
            ])
        }
        Expr::Sin(arg) => {
            let d = derivative(arg, symbol)?;
            if d.is_zero() {
                return Ok(Expr::Const(0.0));
            }
            Expr::Mul(vec![Expr::cos((**arg).clone()), d])
        }
        Expr::Cos(arg) => {
            let d = derivative(arg, symbol)?;
            if d.is_zero() {
                return Ok(Expr::Const(0.0));
            }
            Expr::Mul(vec![Expr::neg(Expr::sin((**arg).clone())), d])
        }
    })
}
