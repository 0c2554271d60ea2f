use std::sync::Arc;

use tracing::debug;

use crate::algebra_traits::Algebra;
use crate::arithmetic::Arithmetic;
use crate::chain::{ChainComposer, FrameSequence};
use crate::jacobian::{AxisFrame, Jacobian, JacobianBuilder, Velocity, VelocityEvaluator};
use crate::kinematic_traits::{Convention, Kinematics};
use crate::parameter_error::ParameterError;
use crate::parameters::Chain;
use crate::position_analysis::{DerivativeMatrix, DeterminantService, DifferentiationService};
use crate::transform::HomogeneousTransform;
use crate::value::Value;

/// Kinematics of a DH chain. Every call recomputes from the chain, nothing is cached.
#[derive(Clone)]
pub struct DhKinematics {
    chain: Chain,
    arithmetic: Arithmetic,
    axis_frame: AxisFrame,
}

/// Everything computed for a chain in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub frames_a: FrameSequence,
    pub frames_d: FrameSequence,
    /// Convention the Jacobian, velocity and derivatives were computed in.
    pub convention: Convention,
    pub jacobian: Jacobian,
    /// Present when joint rates were given.
    pub velocity: Option<Velocity>,
    pub derivatives: DerivativeMatrix,
    pub determinant: String,
}

impl Analysis {
    pub fn frames(&self, convention: Convention) -> &FrameSequence {
        match convention {
            Convention::A => &self.frames_a,
            Convention::D => &self.frames_d,
        }
    }

    pub fn final_transform(&self, convention: Convention) -> &HomogeneousTransform {
        self.frames(convention).final_transform()
    }
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance with the default symbolic backend.
    pub fn new(chain: Chain) -> Self {
        DhKinematics { chain, arithmetic: Arithmetic::default(), axis_frame: AxisFrame::default() }
    }

    /// Use the given algebra backend.
    pub fn with_algebra(chain: Chain, algebra: Arc<dyn Algebra>) -> Self {
        DhKinematics { chain, arithmetic: Arithmetic::new(algebra), axis_frame: AxisFrame::default() }
    }

    /// Select the frames the Jacobian columns are built from.
    pub fn with_axis_frame(mut self, axis_frame: AxisFrame) -> Self {
        self.axis_frame = axis_frame;
        self
    }

    pub fn axis_frame(&self) -> AxisFrame {
        self.axis_frame
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn arithmetic(&self) -> &Arithmetic {
        &self.arithmetic
    }

    fn jacobian_builder(&self) -> JacobianBuilder<'_> {
        JacobianBuilder::new(&self.arithmetic).with_axis_frame(self.axis_frame)
    }

    /// Partial derivatives of the end effector position by the given symbols.
    pub fn derivatives(&self, convention: Convention, symbols: &[&str]) -> Result<DerivativeMatrix, ParameterError> {
        let position = self.frames(convention).end_effector_origin();
        DifferentiationService::new(&self.arithmetic).differentiate(&position, symbols)
    }

    /// Frames of both conventions, the Jacobian and position derivatives of the chosen one, and
    /// the velocity if joint rates are given.
    pub fn analyze(
        &self,
        convention: Convention,
        joint_rates: Option<&[Value]>,
        symbols: &[&str],
    ) -> Result<Analysis, ParameterError> {
        debug!(links = self.chain.len(), convention = %convention, "Analyzing chain");
        let composer = ChainComposer::new(&self.arithmetic);
        let frames_a = composer.compose(&self.chain, Convention::A);
        let frames_d = composer.compose(&self.chain, Convention::D);
        let frames = match convention {
            Convention::A => &frames_a,
            Convention::D => &frames_d,
        };

        let jacobian = self.jacobian_builder().build(frames);
        let velocity = match joint_rates {
            Some(rates) => Some(VelocityEvaluator::new(&self.arithmetic).velocity(&jacobian, rates)?),
            None => None,
        };

        let position = frames.end_effector_origin();
        let derivatives = DifferentiationService::new(&self.arithmetic).differentiate(&position, symbols)?;
        let determinant = DeterminantService::new(&self.arithmetic).determinant(&derivatives);

        Ok(Analysis { frames_a, frames_d, convention, jacobian, velocity, derivatives, determinant })
    }
}

impl Kinematics for DhKinematics {
    fn frames(&self, convention: Convention) -> FrameSequence {
        ChainComposer::new(&self.arithmetic).compose(&self.chain, convention)
    }

    fn jacobian(&self, convention: Convention) -> Jacobian {
        self.jacobian_builder().build(&self.frames(convention))
    }

    fn velocity(&self, convention: Convention, joint_rates: &[Value]) -> Result<Velocity, ParameterError> {
        VelocityEvaluator::new(&self.arithmetic).velocity(&self.jacobian(convention), joint_rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_planar() {
        let robot = DhKinematics::new(Chain::planar_2r());
        let rates = [Value::symbol("w1"), Value::symbol("w2")];
        let analysis = robot.analyze(Convention::A, Some(&rates), &["θ1", "θ2"]).unwrap();

        assert_eq!(analysis.frames_a.len(), 2);
        assert_eq!(analysis.frames_d.convention(), Convention::D);
        assert_eq!(analysis.jacobian.convention(), Convention::A);
        // 3x2 derivative matrix, padded with a zero column.
        assert_eq!(analysis.derivatives.rows(), 3);
        assert_eq!(analysis.determinant, "0");
        let velocity = analysis.velocity.unwrap();
        assert_eq!(velocity.angular[2].to_string(), "w1 + w2");
    }

    #[test]
    fn test_rates_length_checked() {
        let robot = DhKinematics::new(Chain::planar_2r());
        let result = robot.analyze(Convention::D, Some(&[Value::one()]), &[]);
        assert!(matches!(result, Err(ParameterError::InvalidLength { expected: 2, found: 1 })));
    }

    #[test]
    fn test_trait_matches_analysis() {
        let robot = DhKinematics::new(Chain::elbow_manipulator());
        let analysis = robot.analyze(Convention::A, None, &[]).unwrap();
        assert_eq!(robot.jacobian(Convention::A), analysis.jacobian);
        assert_eq!(&robot.frames(Convention::D), analysis.frames(Convention::D));
        assert!(analysis.velocity.is_none());
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let robot = DhKinematics::new(Chain::elbow_manipulator());
        let rates = [Value::symbol("w1"), Value::symbol("w2"), Value::Number(0.5)];
        let symbols = ["θ1", "θ2", "θ3"];
        let first = robot.analyze(Convention::A, Some(&rates), &symbols).unwrap();
        let second = robot.analyze(Convention::A, Some(&rates), &symbols).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.determinant, second.determinant);
        assert_eq!(format!("{:?}", first), format!("{:?}", second));

        let fresh = DhKinematics::new(Chain::elbow_manipulator())
            .analyze(Convention::A, Some(&rates), &symbols)
            .unwrap();
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_axis_frame_selects_jacobian() {
        let chain = Chain::planar_2r();
        let joint = DhKinematics::new(chain.clone());
        let previous = DhKinematics::new(chain).with_axis_frame(AxisFrame::Previous);
        assert_eq!(joint.axis_frame(), AxisFrame::Joint);
        assert_ne!(joint.jacobian(Convention::A), previous.jacobian(Convention::A));
        assert_eq!(joint.jacobian(Convention::D), previous.jacobian(Convention::D));
        let analysis = previous.analyze(Convention::A, None, &[]).unwrap();
        assert_eq!(analysis.jacobian, previous.jacobian(Convention::A));
    }
}
