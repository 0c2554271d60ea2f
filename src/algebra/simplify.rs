//! Simplification to canonical sum-of-monomials form.
//!
//! Every expression is expanded into a sum of terms `coefficient * Π factor^exponent`, where a
//! factor is a symbol, a `sin`/`cos` of an already simplified argument, or a multi-term sum that
//! appears with a negative exponent. Terms and factors are kept in `BTreeMap`s keyed by their
//! printed form, so the result does not depend on the order of the input.
//!
//! After expansion the angle-sum identities are applied as rewrite rules on pairs of terms
//! that share the same remaining factors:
//!
//! | pair of terms                | becomes      |
//! |------------------------------|--------------|
//! | `c·cos A·cos B + c·sin A·sin B` | `c·cos(A−B)` |
//! | `c·cos A·cos B − c·sin A·sin B` | `c·cos(A+B)` |
//! | `c·sin A·cos B + c·cos A·sin B` | `c·sin(A+B)` |
//! | `c·sin A·cos B − c·cos A·sin B` | `c·sin(A−B)` |
//!
//! With `A = B` the first rule is the Pythagorean identity, as `cos(0) = 1`.

use std::collections::BTreeMap;

use crate::algebra_traits::{AlgebraError, AlgebraOptions};
use crate::expr::{cos_degrees, sin_degrees, Expr};
use crate::utils::{snap_to_zero, ZERO_TOLERANCE};

/// Rewrites per simplification. Each rewrite removes a trigonometric factor, so this is only
/// reached by pathological input.
const MAX_REWRITES: usize = 100_000;

#[derive(Debug, Clone)]
struct Factor {
    base: Expr,
    exp: i32,
}

#[derive(Debug, Clone)]
struct Term {
    coef: f64,
    factors: BTreeMap<String, Factor>,
}

impl Term {
    fn key(&self) -> String {
        factors_key(&self.factors)
    }

    fn to_expr(&self) -> Expr {
        let mut product: Vec<Expr> = self
            .factors
            .values()
            .map(|f| if f.exp == 1 { f.base.clone() } else { Expr::Pow(Box::new(f.base.clone()), f.exp) })
            .collect();
        if product.is_empty() {
            return Expr::Const(self.coef);
        }
        let body = if product.len() == 1 { product.remove(0) } else { Expr::Mul(product) };
        if self.coef == 1.0 {
            body
        } else if self.coef == -1.0 {
            Expr::Neg(Box::new(body))
        } else {
            match body {
                Expr::Mul(mut items) => {
                    items.insert(0, Expr::Const(self.coef));
                    Expr::Mul(items)
                }
                single => Expr::Mul(vec![Expr::Const(self.coef), single]),
            }
        }
    }
}

fn factors_key(factors: &BTreeMap<String, Factor>) -> String {
    factors
        .iter()
        .map(|(k, f)| if f.exp == 1 { k.clone() } else { format!("{}^{}", k, f.exp) })
        .collect::<Vec<_>>()
        .join("*")
}

/// A polynomial in the factors. The constant term has the empty key.
#[derive(Debug, Clone, Default)]
struct Sum {
    terms: BTreeMap<String, Term>,
}

impl Sum {
    fn constant(c: f64) -> Self {
        let mut sum = Sum::default();
        sum.add_term(Term { coef: c, factors: BTreeMap::new() });
        sum
    }

    fn factor(base: Expr, exp: i32) -> Self {
        let mut factors = BTreeMap::new();
        factors.insert(base.to_string(), Factor { base, exp });
        let mut sum = Sum::default();
        sum.add_term(Term { coef: 1.0, factors });
        sum
    }

    fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self.terms.get("").map(|t| t.coef),
            _ => None,
        }
    }

    fn add_term(&mut self, term: Term) {
        let key = term.key();
        let coef = match self.terms.get(&key) {
            Some(existing) => existing.coef + term.coef,
            None => term.coef,
        };
        if coef.abs() < ZERO_TOLERANCE {
            self.terms.remove(&key);
        } else {
            self.terms.insert(key, Term { coef, factors: term.factors });
        }
    }

    fn add(mut self, other: Sum) -> Sum {
        for term in other.terms.into_values() {
            self.add_term(term);
        }
        self
    }

    fn scale(mut self, c: f64) -> Sum {
        if c == 0.0 {
            return Sum::default();
        }
        for term in self.terms.values_mut() {
            term.coef *= c;
        }
        self.terms.retain(|_, t| t.coef.abs() >= ZERO_TOLERANCE);
        self
    }

    fn mul(&self, other: &Sum, options: &AlgebraOptions) -> Result<Sum, AlgebraError> {
        let mut product = Sum::default();
        for a in self.terms.values() {
            for b in other.terms.values() {
                let mut factors = a.factors.clone();
                for (key, f) in &b.factors {
                    let exp = factors
                        .get(key)
                        .map_or(0, |existing| existing.exp)
                        .checked_add(f.exp)
                        .ok_or(AlgebraError::ExponentOverflow)?;
                    if exp == 0 {
                        factors.remove(key);
                    } else {
                        factors.insert(key.clone(), Factor { base: f.base.clone(), exp });
                    }
                }
                product.add_term(Term { coef: a.coef * b.coef, factors });
                if product.terms.len() > options.max_terms {
                    return Err(AlgebraError::TooManyTerms { limit: options.max_terms });
                }
            }
        }
        Ok(product)
    }

    fn pow(&self, exp: i32, options: &AlgebraOptions) -> Result<Sum, AlgebraError> {
        if exp == 0 {
            return Ok(Sum::constant(1.0));
        }
        match self.terms.len() {
            0 if exp < 0 => Err(AlgebraError::DivisionByZero),
            0 => Ok(Sum::default()),
            // A single monomial is raised by scaling its exponents.
            1 => {
                let term = self.terms.values().next().ok_or(AlgebraError::DivisionByZero)?;
                let factors = term
                    .factors
                    .iter()
                    .map(|(k, f)| {
                        let exp = f.exp.checked_mul(exp).ok_or(AlgebraError::ExponentOverflow)?;
                        Ok((k.clone(), Factor { base: f.base.clone(), exp }))
                    })
                    .collect::<Result<BTreeMap<_, _>, AlgebraError>>()?;
                let coef = term.coef.powi(exp);
                if !coef.is_finite() || coef == 0.0 {
                    return Err(AlgebraError::ExponentOverflow);
                }
                Ok(Sum::from_term(Term { coef, factors }))
            }
            _ if exp > 0 => {
                let mut result = self.clone();
                for _ in 1..exp {
                    result = result.mul(self, options)?;
                }
                Ok(result)
            }
            _ => Ok(Sum::factor(self.to_expr(), exp)),
        }
    }

    fn from_term(term: Term) -> Sum {
        let mut sum = Sum::default();
        sum.add_term(term);
        sum
    }

    /// Coefficient of the first term in canonical order, used to pick a sign convention.
    fn leading_coef(&self) -> f64 {
        self.terms
            .iter()
            .find(|(key, _)| !key.is_empty())
            .or_else(|| self.terms.iter().next())
            .map_or(0.0, |(_, t)| t.coef)
    }

    fn to_expr(&self) -> Expr {
        let mut items: Vec<Expr> = self
            .terms
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(_, t)| t.to_expr())
            .collect();
        if let Some(constant) = self.terms.get("") {
            items.push(Expr::Const(constant.coef));
        }
        match items.len() {
            0 => Expr::Const(0.0),
            1 => items.remove(0),
            _ => Expr::Add(items),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Trig {
    Sin,
    Cos,
}

/// Simplify `expr` to canonical form.
pub(crate) fn simplify(expr: &Expr, options: &AlgebraOptions) -> Result<Expr, AlgebraError> {
    let mut sum = to_sum(expr, options)?;
    apply_angle_sum_rules(&mut sum, options)?;
    Ok(sum.to_expr())
}

fn to_sum(expr: &Expr, options: &AlgebraOptions) -> Result<Sum, AlgebraError> {
    match expr {
        Expr::Const(c) => Ok(Sum::constant(snap_to_zero(*c))),
        Expr::Symbol(_) => Ok(Sum::factor(expr.clone(), 1)),
        Expr::Add(items) => {
            let mut sum = Sum::default();
            for item in items {
                sum = sum.add(to_sum(item, options)?);
            }
            Ok(sum)
        }
        Expr::Mul(items) => {
            let mut product = Sum::constant(1.0);
            for item in items {
                let factor = to_sum(item, options)?;
                if factor.terms.is_empty() {
                    return Ok(Sum::default());
                }
                product = product.mul(&factor, options)?;
            }
            Ok(product)
        }
        Expr::Neg(inner) => Ok(to_sum(inner, options)?.scale(-1.0)),
        Expr::Pow(base, exp) => to_sum(base, options)?.pow(*exp, options),
        Expr::Sin(arg) => trig_sum(Trig::Sin, arg, options),
        Expr::Cos(arg) => trig_sum(Trig::Cos, arg, options),
    }
}

/// `sin` or `cos` of a simplified argument. Constant arguments are evaluated (degrees), and the
/// argument sign is normalized so that its leading term is positive: `cos(-u) = cos(u)`,
/// `sin(-u) = -sin(u)`.
fn trig_sum(kind: Trig, arg: &Expr, options: &AlgebraOptions) -> Result<Sum, AlgebraError> {
    let mut argument = to_sum(arg, options)?;
    apply_angle_sum_rules(&mut argument, options)?;
    if let Some(angle) = argument.as_constant() {
        let value = match kind {
            Trig::Sin => sin_degrees(angle),
            Trig::Cos => cos_degrees(angle),
        };
        return Ok(Sum::constant(value));
    }
    let mut sign = 1.0;
    if argument.leading_coef() < 0.0 {
        argument = argument.scale(-1.0);
        if kind == Trig::Sin {
            sign = -1.0;
        }
    }
    let argument = argument.to_expr();
    let atom = match kind {
        Trig::Sin => Expr::sin(argument),
        Trig::Cos => Expr::cos(argument),
    };
    Ok(Sum::factor(atom, 1).scale(sign))
}

/// One trigonometric factor picked out of a term.
#[derive(Debug, Clone)]
struct TrigFactor {
    kind: Trig,
    arg: Expr,
    arg_key: String,
}

/// Two trigonometric factors of one term, together with what remains of that term.
#[derive(Debug, Clone)]
struct Candidate {
    term_key: String,
    coef: f64,
    first: TrigFactor,
    second: TrigFactor,
    residual: BTreeMap<String, Factor>,
}

fn trig_factor(base: &Expr) -> Option<TrigFactor> {
    let (kind, arg) = match base {
        Expr::Sin(arg) => (Trig::Sin, arg),
        Expr::Cos(arg) => (Trig::Cos, arg),
        _ => return None,
    };
    Some(TrigFactor { kind, arg: (**arg).clone(), arg_key: arg.to_string() })
}

fn candidates(term_key: &str, term: &Term) -> Vec<Candidate> {
    // Each trigonometric factor is listed once per power, up to two.
    let mut occurrences: Vec<(String, TrigFactor)> = Vec::new();
    for (key, factor) in &term.factors {
        if factor.exp < 1 {
            continue;
        }
        if let Some(trig) = trig_factor(&factor.base) {
            for _ in 0..factor.exp.min(2) {
                occurrences.push((key.clone(), trig.clone()));
            }
        }
    }
    let mut result = Vec::new();
    for i in 0..occurrences.len() {
        for j in (i + 1)..occurrences.len() {
            let mut residual = term.factors.clone();
            for key in [&occurrences[i].0, &occurrences[j].0] {
                if let Some(factor) = residual.get_mut(key) {
                    factor.exp -= 1;
                    if factor.exp == 0 {
                        residual.remove(key);
                    }
                }
            }
            result.push(Candidate {
                term_key: term_key.to_string(),
                coef: term.coef,
                first: occurrences[i].1.clone(),
                second: occurrences[j].1.clone(),
                residual,
            });
        }
    }
    result
}

fn same_coef(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Try to merge two candidates from different terms into a single trigonometric term.
fn combine(p: &Candidate, q: &Candidate, options: &AlgebraOptions) -> Result<Option<Sum>, AlgebraError> {
    use Trig::{Cos, Sin};

    let plus = same_coef(q.coef, p.coef);
    let minus = same_coef(q.coef, -p.coef);
    if !plus && !minus {
        return Ok(None);
    }

    // (kind of the result, A, B, whether B is subtracted)
    let rewrite: Option<(Trig, &Expr, &Expr, bool)> = match (p.first.kind, p.second.kind) {
        (Cos, Cos) if q.first.kind == Sin && q.second.kind == Sin => {
            let same_args = (p.first.arg_key == q.first.arg_key && p.second.arg_key == q.second.arg_key)
                || (p.first.arg_key == q.second.arg_key && p.second.arg_key == q.first.arg_key);
            if same_args {
                // plus: cos(A - B), minus: cos(A + B)
                Some((Cos, &p.first.arg, &p.second.arg, plus))
            } else {
                None
            }
        }
        (Sin, Cos) | (Cos, Sin) => {
            let (sin_a, cos_b) = if p.first.kind == Sin { (&p.first, &p.second) } else { (&p.second, &p.first) };
            if sin_a.arg_key == cos_b.arg_key {
                None
            } else {
                let q_matches = [(&q.first, &q.second), (&q.second, &q.first)]
                    .iter()
                    .any(|(c, s)| c.kind == Cos && s.kind == Sin && c.arg_key == sin_a.arg_key && s.arg_key == cos_b.arg_key);
                if q_matches {
                    // plus: sin(A + B), minus: sin(A - B)
                    Some((Sin, &sin_a.arg, &cos_b.arg, minus))
                } else {
                    None
                }
            }
        }
        _ => None,
    };

    let Some((kind, a, b, subtract)) = rewrite else {
        return Ok(None);
    };
    let b = if subtract { Expr::neg(b.clone()) } else { b.clone() };
    let angle = Expr::Add(vec![a.clone(), b]);
    let trig = trig_sum(kind, &angle, options)?;
    let rest = Sum::from_term(Term { coef: p.coef, factors: p.residual.clone() });
    Ok(Some(rest.mul(&trig, options)?))
}

fn apply_angle_sum_rules(sum: &mut Sum, options: &AlgebraOptions) -> Result<(), AlgebraError> {
    for _ in 0..MAX_REWRITES {
        if !rewrite_once(sum, options)? {
            break;
        }
    }
    Ok(())
}

fn rewrite_once(sum: &mut Sum, options: &AlgebraOptions) -> Result<bool, AlgebraError> {
    let mut groups: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
    for (key, term) in &sum.terms {
        for candidate in candidates(key, term) {
            groups.entry(factors_key(&candidate.residual)).or_default().push(candidate);
        }
    }
    for group in groups.values() {
        for p in group {
            for q in group {
                if p.term_key == q.term_key {
                    continue;
                }
                if let Some(replacement) = combine(p, q, options)? {
                    sum.terms.remove(&p.term_key);
                    sum.terms.remove(&q.term_key);
                    *sum = std::mem::take(sum).add(replacement);
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}
