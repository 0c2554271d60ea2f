//! Symbolic determinant by cofactor expansion. Expansion always runs along the row or column
//! with the most literal zeros, which keeps kinematic matrices (full of zeros) cheap.

use crate::algebra_traits::AlgebraError;
use crate::expr::Expr;

pub(crate) fn determinant(matrix: &[Vec<Expr>]) -> Result<Expr, AlgebraError> {
    let n = matrix.len();
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(AlgebraError::NotSquare { rows: n, cols: row.len() });
    }
    Ok(expand(matrix))
}

fn expand(m: &[Vec<Expr>]) -> Expr {
    let n = m.len();
    match n {
        0 => return Expr::Const(1.0),
        1 => return m[0][0].clone(),
        2 => {
            return Expr::Add(vec![
                product(&m[0][0], &m[1][1]),
                Expr::neg(product(&m[0][1], &m[1][0])),
            ]);
        }
        _ => {}
    }

    let zeros_in_row = |r: usize| m[r].iter().filter(|e| e.is_zero()).count();
    let zeros_in_col = |c: usize| m.iter().filter(|row| row[c].is_zero()).count();
    let best_row = (0..n).max_by_key(|&r| (zeros_in_row(r), n - r)).unwrap_or(0);
    let best_col = (0..n).max_by_key(|&c| (zeros_in_col(c), n - c)).unwrap_or(0);
    let along_row = zeros_in_row(best_row) >= zeros_in_col(best_col);

    let mut terms = Vec::new();
    for k in 0..n {
        let (r, c) = if along_row { (best_row, k) } else { (k, best_col) };
        if m[r][c].is_zero() {
            continue;
        }
        let minor: Vec<Vec<Expr>> = m
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != r)
            .map(|(_, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != c)
                    .map(|(_, e)| e.clone())
                    .collect()
            })
            .collect();
        let cofactor = product(&m[r][c], &expand(&minor));
        terms.push(if (r + c) % 2 == 0 { cofactor } else { Expr::neg(cofactor) });
    }
    Expr::Add(terms)
}

fn product(a: &Expr, b: &Expr) -> Expr {
    if a.is_zero() || b.is_zero() {
        return Expr::Const(0.0);
    }
    Expr::Mul(vec![a.clone(), b.clone()])
}
