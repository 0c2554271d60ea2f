//! Symbolic analysis of the end effector position: the matrix of partial derivatives by chosen
//! symbols, and its determinant as a rough singularity test.
//!
//! Both services report per-cell problems inside the result text (`Error: ...`) so that one
//! failing cell never hides the rest of the table. Only malformed symbol names are rejected
//! with an error, as they indicate bad input rather than an algebra limitation.

use std::sync::LazyLock;

use regex::Regex;

use crate::arithmetic::Arithmetic;
use crate::expr::Expr;
use crate::parameter_error::ParameterError;
use crate::parser::is_ident_char;
use crate::value::Value;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").unwrap());

/// Prefix of the cells that could not be computed.
pub const ERROR_MARKER: &str = "Error: ";

/// Partial derivatives, one row per position component and one column per symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeMatrix {
    symbols: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl DerivativeMatrix {
    pub fn new(symbols: Vec<String>, cells: Vec<Vec<String>>) -> Self {
        DerivativeMatrix { symbols, cells }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.symbols.len()
    }

    /// True if any cell holds an error marker.
    pub fn has_errors(&self) -> bool {
        self.cells.iter().flatten().any(|cell| cell.starts_with(ERROR_MARKER))
    }
}

/// Checks that a symbol name is an identifier (letters, digits and `_`, not starting with a digit).
pub fn validate_symbol(name: &str) -> Result<(), ParameterError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ParameterError::InvalidSymbol(name.to_string()))
    }
}

pub struct DifferentiationService<'a> {
    arithmetic: &'a Arithmetic,
}

impl<'a> DifferentiationService<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        DifferentiationService { arithmetic }
    }

    /// Differentiate every component of `position` by every symbol.
    pub fn differentiate(&self, position: &[Value], symbols: &[&str]) -> Result<DerivativeMatrix, ParameterError> {
        for symbol in symbols {
            validate_symbol(symbol)?;
        }
        let cells: Vec<Vec<String>> = position
            .iter()
            .map(|component| symbols.iter().map(|symbol| self.cell(&component.to_expr(), symbol)).collect())
            .collect();
        Ok(DerivativeMatrix::new(symbols.iter().map(|s| s.to_string()).collect(), cells))
    }

    /// Same as [`Self::differentiate`] for components given as text. A component that does
    /// not parse fills its row with error markers.
    pub fn differentiate_text(&self, position: &[&str], symbols: &[&str]) -> Result<DerivativeMatrix, ParameterError> {
        for symbol in symbols {
            validate_symbol(symbol)?;
        }
        let algebra = self.arithmetic.algebra();
        let cells: Vec<Vec<String>> = position
            .iter()
            .map(|text| match algebra.parse(text) {
                Ok(expr) => symbols.iter().map(|symbol| self.cell(&expr, symbol)).collect(),
                Err(err) => vec![format!("{}{}", ERROR_MARKER, err); symbols.len()],
            })
            .collect();
        Ok(DerivativeMatrix::new(symbols.iter().map(|s| s.to_string()).collect(), cells))
    }

    fn cell(&self, expr: &Expr, symbol: &str) -> String {
        match self.arithmetic.algebra().derivative(expr, symbol) {
            Ok(derivative) => Value::from_expr(derivative).to_string(),
            Err(err) => format!("{}{}", ERROR_MARKER, err),
        }
    }
}

pub struct DeterminantService<'a> {
    arithmetic: &'a Arithmetic,
}

impl<'a> DeterminantService<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        DeterminantService { arithmetic }
    }

    /// Simplified determinant of the derivative matrix, as text. A non-square matrix is padded
    /// with zeros to the larger dimension. Failures are returned as an error marker text.
    pub fn determinant(&self, matrix: &DerivativeMatrix) -> String {
        self.determinant_of_cells(matrix.cells())
    }

    pub fn determinant_of_cells(&self, cells: &[Vec<String>]) -> String {
        let mut glyphs = GlyphTable::default();
        let square = pad_square(cells);
        let encoded: Vec<Vec<String>> =
            square.iter().map(|row| row.iter().map(|cell| glyphs.encode(cell)).collect()).collect();

        match self.compute(&encoded) {
            Ok(text) => glyphs.decode(&text),
            Err(message) => format!("{}{}", ERROR_MARKER, glyphs.decode(&message)),
        }
    }

    fn compute(&self, cells: &[Vec<String>]) -> Result<String, String> {
        let algebra = self.arithmetic.algebra();
        let matrix = cells
            .iter()
            .map(|row| row.iter().map(|cell| algebra.parse(cell)).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.to_string())?;
        let determinant = algebra.determinant(&matrix).map_err(|err| err.to_string())?;
        let simplified = algebra.simplify(&determinant).map_err(|err| err.to_string())?;
        Ok(Value::from_expr(simplified).to_string())
    }
}

fn pad_square(cells: &[Vec<String>]) -> Vec<Vec<String>> {
    let rows = cells.len();
    let cols = cells.iter().map(|row| row.len()).max().unwrap_or(0);
    let n = rows.max(cols);
    (0..n)
        .map(|r| {
            (0..n)
                .map(|c| cells.get(r).and_then(|row| row.get(c)).cloned().unwrap_or_else(|| "0".to_string()))
                .collect()
        })
        .collect()
}

/// Replaces non-ASCII identifier characters with `__gN__` tokens and back. Operator glyphs
/// such as `·` or `−` are left for the parser.
#[derive(Default)]
struct GlyphTable {
    glyphs: Vec<char>,
}

impl GlyphTable {
    fn token(index: usize) -> String {
        format!("__g{}__", index)
    }

    fn encode(&mut self, text: &str) -> String {
        let mut encoded = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii() || !is_ident_char(c) {
                encoded.push(c);
                continue;
            }
            let index = match self.glyphs.iter().position(|&g| g == c) {
                Some(index) => index,
                None => {
                    self.glyphs.push(c);
                    self.glyphs.len() - 1
                }
            };
            encoded.push_str(&Self::token(index));
        }
        encoded
    }

    fn decode(&self, text: &str) -> String {
        // Highest index first, so that __g1__ is not taken for a prefix of __g10__.
        let mut decoded = text.to_string();
        for (index, glyph) in self.glyphs.iter().enumerate().rev() {
            decoded = decoded.replace(&Self::token(index), &glyph.to_string());
        }
        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::algebra_impl::SymbolicAlgebra;
    use crate::algebra_traits::AlgebraOptions;

    fn v(text: &str) -> Value {
        Value::parse(text).unwrap()
    }

    #[test]
    fn test_symbol_validation() {
        for good in ["θ1", "L_2", "_q", "x"] {
            assert!(validate_symbol(good).is_ok(), "{}", good);
        }
        for bad in ["1x", "", "a b", "x+y", "sin(x)"] {
            assert!(matches!(validate_symbol(bad), Err(ParameterError::InvalidSymbol(_))), "{}", bad);
        }
    }

    #[test]
    fn test_planar_derivatives() {
        let arithmetic = Arithmetic::default();
        let service = DifferentiationService::new(&arithmetic);
        let position = [v("L1*cos(θ1) + L2*cos(θ1 + θ2)"), v("L1*sin(θ1) + L2*sin(θ1 + θ2)"), Value::zero()];
        let matrix = service.differentiate(&position, &["θ1", "θ2"]).unwrap();
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix.cells()[0], ["-L1*sin(θ1) - L2*sin(θ1 + θ2)", "-L2*sin(θ1 + θ2)"]);
        assert_eq!(matrix.cells()[1], ["L1*cos(θ1) + L2*cos(θ1 + θ2)", "L2*cos(θ1 + θ2)"]);
        assert_eq!(matrix.cells()[2], ["0", "0"]);
        assert!(!matrix.has_errors());
    }

    #[test]
    fn test_invalid_symbol_is_reported() {
        let arithmetic = Arithmetic::default();
        let service = DifferentiationService::new(&arithmetic);
        let result = service.differentiate(&[v("x")], &["x", "2y"]);
        assert!(matches!(result, Err(ParameterError::InvalidSymbol(name)) if name == "2y"));
    }

    #[test]
    fn test_failing_cells_are_marked() {
        let arithmetic = Arithmetic::new(Arc::new(SymbolicAlgebra::new(AlgebraOptions { max_terms: 2 })));
        let service = DifferentiationService::new(&arithmetic);
        let matrix = service.differentiate(&[v("(a + b + c)*(d + e)")], &["d", "x"]).unwrap();
        assert!(matrix.cells()[0][0].starts_with(ERROR_MARKER));
        assert_eq!(matrix.cells()[0][1], "0");
        assert!(matrix.has_errors());

        let text = DifferentiationService::new(&Arithmetic::default())
            .differentiate_text(&["x^2", "x +"], &["x"])
            .unwrap();
        assert_eq!(text.cells()[0], ["2*x"]);
        assert!(text.cells()[1][0].starts_with(ERROR_MARKER));
    }

    #[test]
    fn test_rotation_determinant() {
        let arithmetic = Arithmetic::default();
        let service = DeterminantService::new(&arithmetic);
        let cells = vec![
            vec!["cos(θ)".to_string(), "-sin(θ)".to_string()],
            vec!["sin(θ)".to_string(), "cos(θ)".to_string()],
        ];
        assert_eq!(service.determinant_of_cells(&cells), "1");
    }

    #[test]
    fn test_planar_jacobian_determinant() {
        let arithmetic = Arithmetic::default();
        let position = [v("L1*cos(θ1) + L2*cos(θ1 + θ2)"), v("L1*sin(θ1) + L2*sin(θ1 + θ2)")];
        let matrix = DifferentiationService::new(&arithmetic).differentiate(&position, &["θ1", "θ2"]).unwrap();
        assert_eq!(DeterminantService::new(&arithmetic).determinant(&matrix), "L1*L2*sin(θ2)");
    }

    #[test]
    fn test_non_square_is_zero_padded() {
        let arithmetic = Arithmetic::default();
        let service = DeterminantService::new(&arithmetic);
        // 3x2 gets a zero column, so the determinant is zero.
        let cells = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
            vec!["e".to_string(), "f".to_string()],
        ];
        assert_eq!(service.determinant_of_cells(&cells), "0");
        // 1x2 padded to 2x2 keeps only the zero row.
        assert_eq!(service.determinant_of_cells(&[vec!["a".to_string(), "b".to_string()]]), "0");
    }

    #[test]
    fn test_determinant_errors_are_text() {
        let arithmetic = Arithmetic::default();
        let service = DeterminantService::new(&arithmetic);
        let cells = vec![vec!["Error: broken".to_string()]];
        assert!(service.determinant_of_cells(&cells).starts_with(ERROR_MARKER));
    }

    #[test]
    fn test_glyph_round_trip() {
        let mut glyphs = GlyphTable::default();
        let encoded = glyphs.encode("θ1 + φ2*θ3");
        assert_eq!(encoded, "__g0__1 + __g1__2*__g0__3");
        assert_eq!(glyphs.decode(&encoded), "θ1 + φ2*θ3");
    }

    #[test]
    fn test_operator_glyphs_are_not_symbols() {
        let arithmetic = Arithmetic::default();
        let service = DeterminantService::new(&arithmetic);
        assert_eq!(service.determinant_of_cells(&[vec!["a·b".to_string()]]), "a*b");
        assert_eq!(service.determinant_of_cells(&[vec!["θ1×θ2".to_string()]]), "θ1*θ2");
        assert_eq!(service.determinant_of_cells(&[vec!["a − b".to_string()]]), "a - b");
    }
}
