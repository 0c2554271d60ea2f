//! Expression tree of the symbolic backend.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::algebra_traits::AlgebraError;
use crate::utils::{format_number, snap_to_zero};

/// Algebraic expression. Sums and products are n-ary, exponents are integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Symbol(String),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Neg(Box<Expr>),
    Pow(Box<Expr>, i32),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// Negation that folds constants so `-90` stays a literal.
    pub fn neg(expr: Expr) -> Self {
        match expr {
            Expr::Const(c) => Expr::Const(if c == 0.0 { 0.0 } else { -c }),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }

    pub fn sin(expr: Expr) -> Self {
        Expr::Sin(Box::new(expr))
    }

    pub fn cos(expr: Expr) -> Self {
        Expr::Cos(Box::new(expr))
    }

    pub fn as_const(&self) -> Option<f64> {
        match *self {
            Expr::Const(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(*self, Expr::Const(c) if c == 0.0)
    }

    /// All symbol names the expression depends on.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_symbols(&mut names);
        names
    }

    fn collect_symbols(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Symbol(name) => {
                names.insert(name.clone());
            }
            Expr::Add(items) | Expr::Mul(items) => {
                items.iter().for_each(|item| item.collect_symbols(names))
            }
            Expr::Neg(inner) | Expr::Pow(inner, _) | Expr::Sin(inner) | Expr::Cos(inner) => {
                inner.collect_symbols(names)
            }
        }
    }

    /// Replace bound symbols by constants, leaving the others in place.
    pub fn substitute(&self, bindings: &HashMap<String, f64>) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(*c),
            Expr::Symbol(name) => match bindings.get(name) {
                Some(value) => Expr::Const(*value),
                None => self.clone(),
            },
            Expr::Add(items) => Expr::Add(items.iter().map(|x| x.substitute(bindings)).collect()),
            Expr::Mul(items) => Expr::Mul(items.iter().map(|x| x.substitute(bindings)).collect()),
            Expr::Neg(inner) => Expr::neg(inner.substitute(bindings)),
            Expr::Pow(base, e) => Expr::Pow(Box::new(base.substitute(bindings)), *e),
            Expr::Sin(arg) => Expr::sin(arg.substitute(bindings)),
            Expr::Cos(arg) => Expr::cos(arg.substitute(bindings)),
        }
    }

    /// Numeric value under the given bindings. Trigonometric arguments are degrees.
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<f64, AlgebraError> {
        let value = match self {
            Expr::Const(c) => *c,
            Expr::Symbol(name) => *bindings
                .get(name)
                .ok_or_else(|| AlgebraError::UnboundSymbol(name.clone()))?,
            Expr::Add(items) => {
                let mut sum = 0.0;
                for item in items {
                    sum += item.evaluate(bindings)?;
                }
                sum
            }
            Expr::Mul(items) => {
                let mut product = 1.0;
                for item in items {
                    product *= item.evaluate(bindings)?;
                }
                product
            }
            Expr::Neg(inner) => -inner.evaluate(bindings)?,
            Expr::Pow(base, e) => {
                let b = base.evaluate(bindings)?;
                if b == 0.0 && *e < 0 {
                    return Err(AlgebraError::DivisionByZero);
                }
                b.powi(*e)
            }
            Expr::Sin(arg) => sin_degrees(arg.evaluate(bindings)?),
            Expr::Cos(arg) => cos_degrees(arg.evaluate(bindings)?),
        };
        Ok(snap_to_zero(value))
    }

    fn is_atom(&self) -> bool {
        match *self {
            Expr::Const(c) => c >= 0.0,
            Expr::Symbol(_) | Expr::Sin(_) | Expr::Cos(_) => true,
            _ => false,
        }
    }
}

pub(crate) fn sin_degrees(angle: f64) -> f64 {
    snap_to_zero(angle.to_radians().sin())
}

pub(crate) fn cos_degrees(angle: f64) -> f64 {
    snap_to_zero(angle.to_radians().cos())
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", format_number(*c)),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Add(terms) => {
                if terms.is_empty() {
                    return write!(f, "0");
                }
                for (i, term) in terms.iter().enumerate() {
                    let text = term.to_string();
                    if i == 0 {
                        write!(f, "{}", text)?;
                    } else if let Some(rest) = text.strip_prefix('-') {
                        write!(f, " - {}", rest)?;
                    } else {
                        write!(f, " + {}", text)?;
                    }
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                if factors.is_empty() {
                    return write!(f, "1");
                }
                let mut rest = &factors[..];
                if factors.len() > 1 && factors[0] == Expr::Const(-1.0) {
                    write!(f, "-")?;
                    rest = &factors[1..];
                }
                for (i, factor) in rest.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    let leading_constant = i == 0 && matches!(factor, Expr::Const(_));
                    match factor {
                        Expr::Add(_) | Expr::Neg(_) | Expr::Mul(_) => write!(f, "({})", factor)?,
                        Expr::Const(c) if *c < 0.0 && !leading_constant => write!(f, "({})", factor)?,
                        _ => write!(f, "{}", factor)?,
                    }
                }
                Ok(())
            }
            Expr::Neg(inner) => {
                let text = inner.to_string();
                match **inner {
                    Expr::Add(_) | Expr::Neg(_) => write!(f, "-({})", text),
                    _ if text.starts_with('-') => write!(f, "-({})", text),
                    _ => write!(f, "-{}", text),
                }
            }
            Expr::Pow(base, e) => {
                if base.is_atom() {
                    write!(f, "{}", base)?;
                } else {
                    write!(f, "({})", base)?;
                }
                if *e < 0 { write!(f, "^({})", e) } else { write!(f, "^{}", e) }
            }
            Expr::Sin(arg) => write!(f, "sin({})", arg),
            Expr::Cos(arg) => write!(f, "cos({})", arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_signs() {
        let x = Expr::symbol("x");
        let e = Expr::Add(vec![
            x.clone(),
            Expr::neg(Expr::sin(x.clone())),
            Expr::Mul(vec![Expr::Const(-2.0), Expr::symbol("y")]),
            Expr::Const(-3.0),
        ]);
        assert_eq!(e.to_string(), "x - sin(x) - 2*y - 3");
    }

    #[test]
    fn test_display_products_and_powers() {
        let a_plus_b = Expr::Add(vec![Expr::symbol("a"), Expr::symbol("b")]);
        let e = Expr::Mul(vec![
            Expr::Const(-1.0),
            Expr::symbol("L1"),
            Expr::Pow(Box::new(a_plus_b), -1),
        ]);
        assert_eq!(e.to_string(), "-L1*(a + b)^(-1)");
        assert_eq!(Expr::Pow(Box::new(Expr::cos(Expr::symbol("θ"))), 2).to_string(), "cos(θ)^2");
    }

    #[test]
    fn test_evaluate_in_degrees() {
        let mut bindings = HashMap::new();
        bindings.insert("θ1".to_string(), 90.0);
        let e = Expr::Add(vec![Expr::cos(Expr::symbol("θ1")), Expr::sin(Expr::symbol("θ1"))]);
        assert_eq!(e.evaluate(&bindings), Ok(1.0));
        assert_eq!(
            Expr::symbol("q").evaluate(&bindings),
            Err(AlgebraError::UnboundSymbol("q".to_string()))
        );
    }

    #[test]
    fn test_symbols_and_substitution() {
        let e = Expr::Mul(vec![Expr::symbol("L1"), Expr::cos(Expr::symbol("θ1"))]);
        let names: Vec<String> = e.symbols().into_iter().collect();
        assert_eq!(names, vec!["L1".to_string(), "θ1".to_string()]);

        let mut bindings = HashMap::new();
        bindings.insert("θ1".to_string(), 0.0);
        assert_eq!(e.substitute(&bindings).to_string(), "L1*cos(0)");
    }
}
