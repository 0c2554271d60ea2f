#[cfg(test)]
mod tests {
    use nalgebra::Matrix4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::arithmetic::Arithmetic;
    use crate::chain::ChainComposer;
    use crate::kinematic_traits::{Convention, Kinematics};
    use crate::kinematics_impl::DhKinematics;
    use crate::parameters::{Chain, DhParameter};
    use crate::tests::test_utils::{assert_matrix4_close, random_bindings, random_numeric_chain};
    use crate::transform::TransformBuilder;
    use crate::value::Value;

    fn presets() -> Vec<(&'static str, Chain)> {
        vec![
            ("planar_2r", Chain::planar_2r()),
            ("planar_3r", Chain::planar_3r()),
            ("scara", Chain::scara()),
            ("elbow", Chain::elbow_manipulator()),
            ("wrist", Chain::spherical_wrist()),
        ]
    }

    #[test]
    fn test_two_link_planar_stretched() {
        let chain = Chain::new(vec![DhParameter::numeric(0.0, 0.0, 1.0, 0.0); 2]).unwrap();
        let robot = DhKinematics::new(chain);
        for convention in Convention::ALL {
            let frames = robot.frames(convention);
            assert_eq!(frames.end_effector_origin(), [Value::Number(2.0), Value::zero(), Value::zero()]);
        }
    }

    #[test]
    fn test_symbolic_agrees_with_numeric() {
        let mut rng = StdRng::seed_from_u64(42);
        for (name, chain) in presets() {
            let symbolic = DhKinematics::new(chain.clone());
            for convention in Convention::ALL {
                let frames = symbolic.frames(convention);
                for _ in 0..5 {
                    let bindings = random_bindings(&chain, &mut rng);
                    let numeric = DhKinematics::new(chain.bind(&bindings)).frames(convention);
                    for (i, (s, n)) in frames.frames().iter().zip(numeric.frames()).enumerate() {
                        let expected = n.to_matrix4().unwrap();
                        let actual = s.evaluate(&bindings).unwrap();
                        assert_matrix4_close(&actual, &expected, &format!("{} {} frame {}", name, convention, i + 1));
                    }
                }
            }
        }
    }

    #[test]
    fn test_frames_are_products_of_joints() {
        let mut rng = StdRng::seed_from_u64(7);
        for convention in Convention::ALL {
            let chain = random_numeric_chain(6, &mut rng);
            let frames = DhKinematics::new(chain).frames(convention);
            let mut product = Matrix4::identity();
            for (joint, frame) in frames.joint_transforms().iter().zip(frames.frames()) {
                product *= joint.to_matrix4().unwrap();
                assert_matrix4_close(&frame.to_matrix4().unwrap(), &product, "cumulative frame");
            }
        }
    }

    #[test]
    fn test_multiply_is_associative() {
        let arithmetic = Arithmetic::default();
        let builder = TransformBuilder::new(&arithmetic);
        let composer = ChainComposer::new(&arithmetic);
        let mut rng = StdRng::seed_from_u64(2024);
        for round in 0..20 {
            let chain = random_numeric_chain(3, &mut rng);
            let convention = if round % 2 == 0 { Convention::A } else { Convention::D };
            let [a, b, c] = [0, 1, 2].map(|i| builder.build(&chain.links()[i], convention));
            let left = composer.multiply(&composer.multiply(&a, &b), &c);
            let right = composer.multiply(&a, &composer.multiply(&b, &c));
            assert_matrix4_close(&left.to_matrix4().unwrap(), &right.to_matrix4().unwrap(), "associativity");
        }
    }

    #[test]
    fn test_final_rotation_is_rigid() {
        let mut rng = StdRng::seed_from_u64(11);
        let chain = random_numeric_chain(4, &mut rng);
        let robot = DhKinematics::new(chain);
        for convention in Convention::ALL {
            let m = robot.frames(convention).final_transform().to_matrix4().unwrap();
            let rotation = m.fixed_view::<3, 3>(0, 0).into_owned();
            assert!((rotation.transpose() * rotation - nalgebra::Matrix3::identity()).abs().max() < 1e-9);
            assert!((rotation.determinant() - 1.0).abs() < 1e-9);
            assert_eq!(m.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_elbow_symbolic_position() {
        let robot = DhKinematics::new(Chain::elbow_manipulator());
        let origin = robot.frames(Convention::A).end_effector_origin();
        // Zero joint angles point the upper arm straight up.
        assert_eq!(origin[2].to_string(), "L2*cos(θ2) + L3*cos(θ2 + θ3) + d1");
    }
}
