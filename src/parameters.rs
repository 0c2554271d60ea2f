//! Defines the DH parameter data structures

use std::collections::{BTreeSet, HashMap};

use crate::parameter_error::ParameterError;
use crate::value::Value;

/// Denavit–Hartenberg parameters of one joint. Angles are in degrees. Every field may be a
/// number or an expression such as `θ1+90` or `L1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DhParameter {
    /// Joint angle about the z axis.
    pub theta: Value,

    /// Link twist about the x axis.
    pub alpha: Value,

    /// Link length along the x axis.
    pub a: Value,

    /// Link offset along the z axis.
    pub d: Value,
}

impl DhParameter {
    pub fn new(theta: Value, alpha: Value, a: Value, d: Value) -> Self {
        DhParameter { theta, alpha, a, d }
    }

    /// Parse the four text fields as they come from an input form. Empty fields are zero.
    pub fn parse(theta: &str, alpha: &str, a: &str, d: &str) -> Result<Self, ParameterError> {
        Ok(DhParameter {
            theta: Value::parse(theta)?,
            alpha: Value::parse(alpha)?,
            a: Value::parse(a)?,
            d: Value::parse(d)?,
        })
    }

    /// All numeric parameters.
    pub fn numeric(theta: f64, alpha: f64, a: f64, d: f64) -> Self {
        DhParameter::new(theta.into(), alpha.into(), a.into(), d.into())
    }

    pub fn is_numeric(&self) -> bool {
        self.fields().iter().all(|v| v.is_numeric())
    }

    fn fields(&self) -> [&Value; 4] {
        [&self.theta, &self.alpha, &self.a, &self.d]
    }

    /// Substitute the bound symbols in every field.
    pub fn bind(&self, bindings: &HashMap<String, f64>) -> Self {
        DhParameter {
            theta: self.theta.bind(bindings),
            alpha: self.alpha.bind(bindings),
            a: self.a.bind(bindings),
            d: self.d.bind(bindings),
        }
    }
}

/// Ordered list of joints, base first. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub(crate) links: Vec<DhParameter>,
}

impl Chain {
    pub fn new(links: Vec<DhParameter>) -> Result<Self, ParameterError> {
        if links.is_empty() {
            return Err(ParameterError::EmptyChain);
        }
        Ok(Chain { links })
    }

    /// Parse `[θ, α, a, d]` text rows.
    pub fn parse(rows: &[[&str; 4]]) -> Result<Self, ParameterError> {
        let links = rows
            .iter()
            .map(|[theta, alpha, a, d]| DhParameter::parse(theta, alpha, a, d))
            .collect::<Result<Vec<_>, _>>()?;
        Chain::new(links)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[DhParameter] {
        &self.links
    }

    /// Replace the parameters of one joint, returning the new chain.
    pub fn with_link(&self, index: usize, link: DhParameter) -> Result<Self, ParameterError> {
        if index >= self.links.len() {
            return Err(ParameterError::InvalidLength { expected: self.links.len(), found: index + 1 });
        }
        let mut links = self.links.clone();
        links[index] = link;
        Ok(Chain { links })
    }

    /// Names of all free symbols, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.links
            .iter()
            .flat_map(|link| link.fields())
            .filter_map(|value| match value {
                Value::Symbolic(expr) => Some(expr.symbols()),
                Value::Number(_) => None,
            })
            .flatten()
            .collect()
    }

    /// The chain with the bound symbols replaced by numbers, e.g. to look at a
    /// concrete configuration of a symbolic robot.
    pub fn bind(&self, bindings: &HashMap<String, f64>) -> Self {
        Chain { links: self.links.iter().map(|link| link.bind(bindings)).collect() }
    }

    /// Convert to string yaml representation (quick viewing, etc).
    pub fn to_yaml(&self) -> String {
        let mut yaml = String::from("links:\n");
        for link in &self.links {
            yaml.push_str(&format!(
                "  - {{ theta: {}, alpha: {}, a: {}, d: {} }}\n",
                yaml_scalar(&link.theta),
                yaml_scalar(&link.alpha),
                yaml_scalar(&link.a),
                yaml_scalar(&link.d)
            ));
        }
        yaml
    }
}

fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::Number(_) => value.to_string(),
        Value::Symbolic(_) => format!("\"{}\"", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chain() {
        let chain = Chain::parse(&[["θ1", "90", "", "L1"], ["θ2+90", "0", "L2", "0"]]).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.links()[0].a, Value::zero());
        assert_eq!(chain.links()[0].alpha, Value::Number(90.0));
        let symbols: Vec<String> = chain.symbols().into_iter().collect();
        assert_eq!(symbols, vec!["L1", "L2", "θ1", "θ2"]);
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(matches!(Chain::new(vec![]), Err(ParameterError::EmptyChain)));
        assert!(matches!(Chain::parse(&[]), Err(ParameterError::EmptyChain)));
    }

    #[test]
    fn test_bind_makes_numeric() {
        let chain = Chain::parse(&[["θ1", "0", "L1", "0"]]).unwrap();
        let bindings = HashMap::from([("θ1".to_string(), 30.0), ("L1".to_string(), 0.5)]);
        let bound = chain.bind(&bindings);
        assert!(bound.links()[0].is_numeric());
        assert_eq!(bound.links()[0].a, Value::Number(0.5));
    }

    #[test]
    fn test_to_yaml() {
        let chain = Chain::parse(&[["θ1", "90", "0", "L1"]]).unwrap();
        assert_eq!(chain.to_yaml(), "links:\n  - { theta: \"θ1\", alpha: 90, a: 0, d: \"L1\" }\n");
    }
}
