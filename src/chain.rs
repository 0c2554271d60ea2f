//! Composition of joint transforms into cumulative frames.

use tracing::debug;

use crate::arithmetic::Arithmetic;
use crate::kinematic_traits::{Convention, Vector3V};
use crate::parameter_error::ParameterError;
use crate::parameters::Chain;
use crate::transform::{HomogeneousTransform, TransformBuilder};
use crate::value::Value;

/// Per-joint transforms and the cumulative frames T(0→1) … T(0→n) of one convention.
/// Frame 0 is the base and is not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    convention: Convention,
    joints: Vec<HomogeneousTransform>,
    frames: Vec<HomogeneousTransform>,
}

impl FrameSequence {
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Number of joints.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// T(i−1→i) for i = 1..n.
    pub fn joint_transforms(&self) -> &[HomogeneousTransform] {
        &self.joints
    }

    /// T(0→i) for i = 1..n.
    pub fn frames(&self) -> &[HomogeneousTransform] {
        &self.frames
    }

    /// T(0→i); frame 0 is the identity.
    pub fn frame(&self, i: usize) -> Option<HomogeneousTransform> {
        match i {
            0 => Some(HomogeneousTransform::identity()),
            _ => self.frames.get(i - 1).cloned(),
        }
    }

    /// T(0→n).
    pub fn final_transform(&self) -> &HomogeneousTransform {
        // Chains are never empty.
        &self.frames[self.frames.len() - 1]
    }

    /// o_n, the end effector position.
    pub fn end_effector_origin(&self) -> Vector3V {
        self.final_transform().origin()
    }
}

/// Multiplies homogeneous transforms and folds a chain into frames.
pub struct ChainComposer<'a> {
    arithmetic: &'a Arithmetic,
}

impl<'a> ChainComposer<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        ChainComposer { arithmetic }
    }

    /// Matrix product. The last row of a homogeneous transform is known and not computed.
    pub fn multiply(&self, a: &HomogeneousTransform, b: &HomogeneousTransform) -> HomogeneousTransform {
        let ar = self.arithmetic;
        HomogeneousTransform::from_upper(std::array::from_fn(|r| {
            std::array::from_fn(|c| {
                let mut sum = Value::zero();
                for k in 0..4 {
                    let product = ar.multiply(a.get(r, k), b.get(k, c));
                    sum = if sum.is_zero() { product } else { ar.add(&sum, &product) };
                }
                sum
            })
        }))
    }

    /// Build the joint transforms and fold them left to right.
    pub fn compose(&self, chain: &Chain, convention: Convention) -> FrameSequence {
        let builder = TransformBuilder::new(self.arithmetic);
        let joints: Vec<HomogeneousTransform> =
            chain.links().iter().map(|dh| builder.build(dh, convention)).collect();

        let mut frames: Vec<HomogeneousTransform> = Vec::with_capacity(joints.len());
        for (i, joint) in joints.iter().enumerate() {
            let frame = match frames.last() {
                Some(previous) => self.multiply(previous, joint),
                None => joint.clone(),
            };
            debug!(convention = %convention, frame = i + 1, numeric = frame.is_numeric(), "Composed frame");
            frames.push(frame);
        }
        FrameSequence { convention, joints, frames }
    }

    /// T(j→i), the product of the joint transforms j+1 … i. Needs j < i ≤ n.
    pub fn between(&self, frames: &FrameSequence, i: usize, j: usize) -> Result<HomogeneousTransform, ParameterError> {
        let n = frames.len();
        if j >= i || i > n {
            return Err(ParameterError::FrameOrder { from: j, to: i, frames: n });
        }
        let joints = &frames.joint_transforms()[j..i];
        let mut product = joints[0].clone();
        for joint in &joints[1..] {
            product = self.multiply(&product, joint);
        }
        Ok(product)
    }
}
