//! Supports reading DH chains from YAML files (optional)

use std::path::Path;
use serde::Deserialize;

use crate::kinematic_traits::JointRates;
use crate::parameter_error::ParameterError;
use crate::parameters::{Chain, DhParameter};
use crate::value::Value;

/// A YAML scalar that may be a number (`90`) or an expression (`"θ1+90"`).
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    fn to_value(field: &Option<Field>) -> Result<Value, ParameterError> {
        match field {
            None => Ok(Value::zero()),
            Some(Field::Number(x)) if x.is_finite() => Ok(Value::Number(*x)),
            Some(Field::Number(x)) => Err(ParameterError::ParseError(format!("value must be finite (got {})", x))),
            Some(Field::Text(text)) => Value::parse(text),
        }
    }
}

#[derive(Deserialize)]
struct Link {
    #[serde(default)]
    theta: Option<Field>,
    #[serde(default)]
    alpha: Option<Field>,
    #[serde(default)]
    a: Option<Field>,
    #[serde(default)]
    d: Option<Field>,
}

#[derive(Deserialize)]
struct Root {
    links: Vec<Link>,
    #[serde(default)]
    joint_rates: Option<Vec<Field>>,
    #[serde(default)]
    symbols: Vec<String>,
}

/// Everything a chain file may describe: the chain itself, optional joint rates and the
/// symbols to differentiate the end effector position by.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainFile {
    pub chain: Chain,
    pub joint_rates: Option<JointRates>,
    pub symbols: Vec<String>,
}

impl ChainFile {
    /// Read a chain file. YAML file like this is supported:
    /// ```yaml
    /// # Two link planar arm
    /// links:
    ///   - { theta: "θ1", alpha: 0, a: "L1", d: 0 }
    ///   - { theta: "θ2", alpha: 0, a: "L2" }
    /// joint_rates: ["w1", "w2"]
    /// symbols: ["θ1", "θ2"]
    /// ```
    /// Missing link fields are zero. Joint rates and symbols are optional. Angles are in degrees.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        ChainFile::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let root: Root = serde_saphyr::from_str(contents)
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;

        let links = root
            .links
            .iter()
            .map(|link| {
                Ok(DhParameter::new(
                    Field::to_value(&link.theta)?,
                    Field::to_value(&link.alpha)?,
                    Field::to_value(&link.a)?,
                    Field::to_value(&link.d)?,
                ))
            })
            .collect::<Result<Vec<_>, ParameterError>>()?;
        let chain = Chain::new(links)?;

        let joint_rates = match root.joint_rates {
            Some(rates) => {
                if rates.len() != chain.len() {
                    return Err(ParameterError::InvalidLength { expected: chain.len(), found: rates.len() });
                }
                let values = rates
                    .into_iter()
                    .map(|rate| Field::to_value(&Some(rate)))
                    .collect::<Result<Vec<_>, _>>()?;
                Some(values)
            }
            None => None,
        };

        Ok(ChainFile { chain, joint_rates, symbols: root.symbols })
    }
}

impl Chain {
    /// Read only the links of a chain file, see [`ChainFile::from_yaml_file`].
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        Ok(ChainFile::from_yaml_file(path)?.chain)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        Ok(ChainFile::from_yaml_str(contents)?.chain)
    }
}
