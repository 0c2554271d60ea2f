#[cfg(test)]
mod tests {
    use crate::jacobian::AxisFrame;
    use crate::kinematic_traits::{Convention, Kinematics};
    use crate::kinematics_impl::DhKinematics;
    use crate::parameter_error::ParameterError;
    use crate::parameters::Chain;
    use crate::position_analysis::ERROR_MARKER;
    use crate::tests::test_utils::{bindings, load_chain_file};
    use crate::value::Value;

    #[test]
    fn test_elbow_determinant_matches_jacobian() {
        let file = load_chain_file("elbow.yaml").unwrap();
        let symbols: Vec<&str> = file.symbols.iter().map(|s| s.as_str()).collect();
        let robot = DhKinematics::new(file.chain.clone());
        let analysis = robot.analyze(Convention::A, None, &symbols).unwrap();
        assert!(!analysis.derivatives.has_errors());
        assert!(!analysis.determinant.starts_with(ERROR_MARKER), "{}", analysis.determinant);

        // With the previous frame axes the derivative matrix is the linear part of the
        // Jacobian, so their determinants agree.
        let values = bindings(&[("θ1", 20.0), ("θ2", 35.0), ("θ3", -60.0), ("d1", 0.3), ("L2", 0.8), ("L3", 0.6)]);
        let determinant = Value::parse(&analysis.determinant).unwrap().evaluate(&values).unwrap();
        let jacobian = DhKinematics::new(file.chain.bind(&values))
            .with_axis_frame(AxisFrame::Previous)
            .jacobian(Convention::A)
            .to_matrix()
            .unwrap();
        let expected = jacobian.rows(0, 3).into_owned().determinant();
        assert!((determinant - expected).abs() < 1e-9, "{} vs {}", determinant, expected);
    }

    #[test]
    fn test_elbow_singular_when_stretched() {
        let robot = DhKinematics::new(Chain::elbow_manipulator());
        let analysis = robot.analyze(Convention::A, None, &["θ1", "θ2", "θ3"]).unwrap();
        let determinant = Value::parse(&analysis.determinant).unwrap();
        for theta3 in [0.0, 180.0] {
            let values = bindings(&[("θ1", 10.0), ("θ2", 40.0), ("θ3", theta3), ("d1", 0.3), ("L2", 0.8), ("L3", 0.6)]);
            assert!(determinant.evaluate(&values).unwrap().abs() < 1e-9, "θ3 = {}", theta3);
        }
    }

    #[test]
    fn test_planar_derivatives_by_lengths() {
        let robot = DhKinematics::new(Chain::planar_2r());
        let derivatives = robot.derivatives(Convention::A, &["L1", "L2"]).unwrap();
        assert_eq!(derivatives.cells()[0], ["cos(θ1)", "cos(θ1 + θ2)"]);
        assert_eq!(derivatives.cells()[1], ["sin(θ1)", "sin(θ1 + θ2)"]);
        assert_eq!(derivatives.cells()[2], ["0", "0"]);
    }

    #[test]
    fn test_symbol_not_in_chain() {
        let robot = DhKinematics::new(Chain::planar_2r());
        let derivatives = robot.derivatives(Convention::D, &["q"]).unwrap();
        assert!(derivatives.cells().iter().all(|row| row == &["0"]));
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        let robot = DhKinematics::new(Chain::planar_2r());
        for bad in ["θ1+θ2", "2θ", " "] {
            assert!(matches!(
                robot.analyze(Convention::A, None, &[bad]),
                Err(ParameterError::InvalidSymbol(_))
            ), "{}", bad);
        }
    }
}
