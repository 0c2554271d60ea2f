//! Recursive descent parser for the infix expressions users type into DH parameter fields.
//!
//! Supported: decimal numbers, identifiers made of letters, digits and `_` (so `θ1` or `L_2`
//! work), `+ - * / ^`, parentheses, `sin(..)` and `cos(..)`. A number or closing parenthesis
//! directly followed by an identifier or an opening parenthesis is an implicit product (`2L1`).

use crate::algebra_traits::AlgebraError;
use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

/// Parse infix text into an expression tree.
pub fn parse(input: &str) -> Result<Expr, AlgebraError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { input, tokens, pos: 0 };
    if parser.tokens.is_empty() {
        return Err(parser.error("empty expression"));
    }
    let expr = parser.expression()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

/// Whether `c` may start an identifier.
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether `c` may continue an identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, AlgebraError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '*' | '·' | '×' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::Open,
            ')' => Token::Close,
            c if c.is_ascii_digit() || c == '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Scientific notation only when digits follow, so `2e` stays `2*e`.
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| AlgebraError::Parse {
                    input: input.to_string(),
                    position: start,
                    message: format!("malformed number '{}'", text),
                })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            c if is_ident_start(c) => {
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                tokens.push((Token::Ident(chars[start..i].iter().collect()), start));
                continue;
            }
            other => {
                return Err(AlgebraError::Parse {
                    input: input.to_string(),
                    position: start,
                    message: format!("unexpected character '{}'", other),
                });
            }
        };
        tokens.push((token, start));
        i += 1;
    }
    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        self.pos += 1;
        token
    }

    fn error(&self, message: &str) -> AlgebraError {
        let position = self
            .tokens
            .get(self.pos)
            .map(|(_, at)| *at)
            .unwrap_or_else(|| self.input.chars().count());
        AlgebraError::Parse {
            input: self.input.to_string(),
            position,
            message: message.to_string(),
        }
    }

    fn expect(&mut self, expected: Token, message: &str) -> Result<(), AlgebraError> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Expr, AlgebraError> {
        let mut terms = vec![self.term()?];
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    terms.push(self.term()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    terms.push(Expr::neg(self.term()?));
                }
                _ => break,
            }
        }
        Ok(if terms.len() == 1 { terms.remove(0) } else { Expr::Add(terms) })
    }

    /// term := unary (('*' | '/') unary | implicit unary)*
    fn term(&mut self) -> Result<Expr, AlgebraError> {
        let mut factors = vec![self.unary()?];
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    factors.push(self.unary()?);
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    factors.push(reciprocal(divisor)?);
                }
                Some(Token::Ident(_)) | Some(Token::Open) | Some(Token::Number(_)) => {
                    factors.push(self.power()?);
                }
                _ => break,
            }
        }
        Ok(if factors.len() == 1 { factors.remove(0) } else { Expr::Mul(factors) })
    }

    /// unary := ('-' | '+') unary | power
    fn unary(&mut self) -> Result<Expr, AlgebraError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::neg(self.unary()?))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    /// power := primary ('^' integer)?
    fn power(&mut self) -> Result<Expr, AlgebraError> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = self.integer_exponent()?;
        Ok(match base {
            Expr::Const(c) => Expr::Const(c.powi(exponent)),
            base => Expr::Pow(Box::new(base), exponent),
        })
    }

    fn integer_exponent(&mut self) -> Result<i32, AlgebraError> {
        let parenthesized = self.peek() == Some(&Token::Open);
        if parenthesized {
            self.pos += 1;
        }
        let negative = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                true
            }
            Some(Token::Plus) => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let value = match self.next() {
            Some(Token::Number(n)) => n,
            _ => {
                self.pos -= 1;
                return Err(self.error("exponent must be an integer literal"));
            }
        };
        if parenthesized {
            self.expect(Token::Close, "missing ')' after exponent")?;
        }
        if value.fract() != 0.0 || value > i32::MAX as f64 {
            return Err(AlgebraError::NonIntegerExponent(value.to_string()));
        }
        let exponent = value as i32;
        Ok(if negative { -exponent } else { exponent })
    }

    /// primary := number | identifier | function '(' expression ')' | '(' expression ')'
    fn primary(&mut self) -> Result<Expr, AlgebraError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Const(n)),
            Some(Token::Ident(name)) => {
                if self.peek() != Some(&Token::Open) {
                    return Ok(Expr::Symbol(name));
                }
                let function = match name.as_str() {
                    "sin" => Expr::sin as fn(Expr) -> Expr,
                    "cos" => Expr::cos as fn(Expr) -> Expr,
                    _ => return Err(AlgebraError::UnknownFunction(name)),
                };
                self.pos += 1;
                let argument = self.expression()?;
                self.expect(Token::Close, "missing ')' after function argument")?;
                Ok(function(argument))
            }
            Some(Token::Open) => {
                let inner = self.expression()?;
                self.expect(Token::Close, "missing ')'")?;
                Ok(inner)
            }
            _ => {
                self.pos -= 1;
                Err(self.error("expected a number, symbol or '('"))
            }
        }
    }
}

fn reciprocal(divisor: Expr) -> Result<Expr, AlgebraError> {
    match divisor {
        Expr::Const(c) if c == 0.0 => Err(AlgebraError::DivisionByZero),
        Expr::Const(c) => Ok(Expr::Const(1.0 / c)),
        other => Ok(Expr::Pow(Box::new(other), -1)),
    }
}
