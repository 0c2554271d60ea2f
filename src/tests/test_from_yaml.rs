#[cfg(test)]
mod tests {
    use crate::parameter_error::ParameterError;
    use crate::parameters::Chain;
    use crate::parameters_from_file::ChainFile;
    use crate::tests::test_utils::load_chain_file;
    use crate::value::Value;

    const READ_ERROR: &str = "Failed to load chain from file";

    #[test]
    fn test_chain_from_yaml() {
        let file = load_chain_file("planar_2r.yaml").expect(READ_ERROR);
        assert_eq!(file.chain, Chain::planar_2r());
        assert_eq!(file.joint_rates, Some(vec![Value::symbol("w1"), Value::symbol("w2")]));
        assert_eq!(file.symbols, vec!["θ1", "θ2"]);
    }

    #[test]
    fn test_block_style_yaml() {
        let file = load_chain_file("elbow.yaml").expect(READ_ERROR);
        assert_eq!(file.chain, Chain::elbow_manipulator());
        assert_eq!(file.joint_rates, None);
        assert_eq!(file.symbols.len(), 3);
    }

    #[test]
    fn test_numeric_yaml() {
        let chain = Chain::from_yaml_file("src/tests/data/numeric_3r.yaml").expect(READ_ERROR);
        assert_eq!(chain.len(), 3);
        assert!(chain.links().iter().all(|link| link.is_numeric()));
        assert_eq!(chain.links()[1].theta, Value::Number(-45.0));
        assert_eq!(chain.links()[2].a, Value::Number(0.05));
    }

    #[test]
    fn test_yaml_round_trip() {
        for chain in [Chain::elbow_manipulator(), Chain::scara(), Chain::planar_3r()] {
            let yaml = chain.to_yaml();
            let reloaded = Chain::from_yaml_str(&yaml).expect(READ_ERROR);
            assert_eq!(reloaded, chain, "{}", yaml);
        }
    }

    #[test]
    fn test_rejected_files() {
        assert!(matches!(
            ChainFile::from_yaml_file("src/tests/data/bad_rates.yaml"),
            Err(ParameterError::InvalidLength { expected: 2, found: 1 })
        ));
        assert!(matches!(
            ChainFile::from_yaml_file("src/tests/data/bad_expression.yaml"),
            Err(ParameterError::ParseError(_))
        ));
        assert!(matches!(ChainFile::from_yaml_file("src/tests/data/empty.yaml"), Err(ParameterError::EmptyChain)));
        assert!(matches!(ChainFile::from_yaml_file("src/tests/data/missing.yaml"), Err(ParameterError::IoError(_))));
        assert!(matches!(ChainFile::from_yaml_str("links: 5"), Err(ParameterError::ParseError(_))));
    }
}
