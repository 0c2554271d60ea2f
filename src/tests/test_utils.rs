use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{DMatrix, Matrix4};
use rand::rngs::StdRng;
use rand::Rng;

use crate::parameters::{Chain, DhParameter};
use crate::parameters_from_file::ChainFile;

pub(crate) const TOLERANCE: f64 = 1e-9;

/// Load a chain file from `src/tests/data`.
pub(crate) fn load_chain_file(name: &str) -> Result<ChainFile> {
    let path = Path::new("src/tests/data").join(name);
    ChainFile::from_yaml_file(&path).with_context(|| format!("Failed to load chain from {}", path.display()))
}

pub(crate) fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(name, value)| (name.to_string(), *value)).collect()
}

/// Random joint values for every θ symbol and positive lengths for everything else.
pub(crate) fn random_bindings(chain: &Chain, rng: &mut StdRng) -> HashMap<String, f64> {
    chain
        .symbols()
        .into_iter()
        .map(|name| {
            let value = if name.starts_with('θ') { rng.gen_range(-180.0..180.0) } else { rng.gen_range(0.1..2.0) };
            (name, value)
        })
        .collect()
}

/// Fully numeric chain with random parameters.
pub(crate) fn random_numeric_chain(links: usize, rng: &mut StdRng) -> Chain {
    let links = (0..links)
        .map(|_| {
            DhParameter::numeric(
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();
    Chain::new(links).unwrap()
}

pub(crate) fn assert_matrix4_close(actual: &Matrix4<f64>, expected: &Matrix4<f64>, context: &str) {
    let error = (actual - expected).abs().max();
    assert!(error < TOLERANCE, "{}: error {}\nactual {}\nexpected {}", context, error, actual, expected);
}

pub(crate) fn assert_dmatrix_close(actual: &DMatrix<f64>, expected: &DMatrix<f64>, tolerance: f64, context: &str) {
    assert_eq!(actual.shape(), expected.shape(), "{}", context);
    let error = (actual - expected).abs().max();
    assert!(error < tolerance, "{}: error {}\nactual {}\nexpected {}", context, error, actual, expected);
}
