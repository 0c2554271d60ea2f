//! Geometric Jacobian of a revolute chain and the velocities it maps joint rates to.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::algebra_traits::AlgebraError;
use crate::arithmetic::Arithmetic;
use crate::chain::FrameSequence;
use crate::kinematic_traits::{Convention, Vector3V};
use crate::parameter_error::ParameterError;
use crate::transform::HomogeneousTransform;
use crate::value::Value;

/// 6×n matrix. Rows 0..2 are the linear velocity coefficients, rows 3..5 the angular ones.
/// Each column is one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    convention: Convention,
    columns: Vec<[Value; 6]>,
}

impl Jacobian {
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Number of columns.
    pub fn joints(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> &Value {
        &self.columns[col][row]
    }

    pub fn column(&self, col: usize) -> &[Value; 6] {
        &self.columns[col]
    }

    /// Numeric view, `None` while any entry is symbolic.
    pub fn to_matrix(&self) -> Option<DMatrix<f64>> {
        let mut matrix = DMatrix::zeros(6, self.joints());
        for (c, column) in self.columns.iter().enumerate() {
            for (r, value) in column.iter().enumerate() {
                matrix[(r, c)] = value.as_number()?;
            }
        }
        Some(matrix)
    }

    /// Evaluate with the given symbol values (angles in degrees).
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<DMatrix<f64>, AlgebraError> {
        let mut matrix = DMatrix::zeros(6, self.joints());
        for (c, column) in self.columns.iter().enumerate() {
            for (r, value) in column.iter().enumerate() {
                matrix[(r, c)] = value.evaluate(bindings)?;
            }
        }
        Ok(matrix)
    }
}

/// Frame whose z axis and origin a joint's column is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "allow_filesystem", derive(clap::ValueEnum))]
pub enum AxisFrame {
    /// Frame i, the cumulative transform up to and including joint i, in both conventions.
    #[default]
    Joint,
    /// In convention A joint i turns about z of frame i−1, the base for the first joint. The
    /// linear rows are then the derivatives of the end effector position by the joint angles.
    /// Convention D is the same as [`AxisFrame::Joint`].
    Previous,
}

/// Builds the Jacobian column by column: `Jv_i = z × (o_n − o)`, `Jw_i = z`, where `z` and `o`
/// are the axis and origin of the frame selected by [`AxisFrame`].
pub struct JacobianBuilder<'a> {
    arithmetic: &'a Arithmetic,
    axis_frame: AxisFrame,
}

impl<'a> JacobianBuilder<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        JacobianBuilder { arithmetic, axis_frame: AxisFrame::default() }
    }

    pub fn with_axis_frame(mut self, axis_frame: AxisFrame) -> Self {
        self.axis_frame = axis_frame;
        self
    }

    pub fn build(&self, frames: &FrameSequence) -> Jacobian {
        let o_n = frames.end_effector_origin();
        let columns = (0..frames.len())
            .map(|i| {
                let joint_frame = self.joint_frame(frames, i);
                let z = joint_frame.z_axis();
                let r = self.difference(&o_n, &joint_frame.origin());
                let [vx, vy, vz] = self.cross(&z, &r);
                let [wx, wy, wz] = z;
                [vx, vy, vz, wx, wy, wz]
            })
            .collect();
        Jacobian { convention: frames.convention(), columns }
    }

    fn joint_frame(&self, frames: &FrameSequence, joint: usize) -> HomogeneousTransform {
        let index = match (self.axis_frame, frames.convention()) {
            (AxisFrame::Previous, Convention::A) => joint,
            _ => joint + 1,
        };
        frames.frame(index).unwrap_or_else(HomogeneousTransform::identity)
    }

    fn difference(&self, a: &Vector3V, b: &Vector3V) -> Vector3V {
        std::array::from_fn(|k| self.arithmetic.subtract(&a[k], &b[k]))
    }

    fn cross(&self, a: &Vector3V, b: &Vector3V) -> Vector3V {
        let ar = self.arithmetic;
        let term = |i: usize, j: usize| ar.subtract(&ar.multiply(&a[i], &b[j]), &ar.multiply(&a[j], &b[i]));
        [term(1, 2), term(2, 0), term(0, 1)]
    }
}

/// End effector twist: linear and angular velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    pub linear: Vector3V,
    pub angular: Vector3V,
}

pub struct VelocityEvaluator<'a> {
    arithmetic: &'a Arithmetic,
}

impl<'a> VelocityEvaluator<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        VelocityEvaluator { arithmetic }
    }

    /// `J · q̇`. The rates must have one entry per joint.
    pub fn velocity(&self, jacobian: &Jacobian, joint_rates: &[Value]) -> Result<Velocity, ParameterError> {
        if joint_rates.len() != jacobian.joints() {
            return Err(ParameterError::InvalidLength { expected: jacobian.joints(), found: joint_rates.len() });
        }
        let ar = self.arithmetic;
        let row = |r: usize| {
            joint_rates.iter().enumerate().fold(Value::zero(), |sum, (i, rate)| {
                ar.add(&sum, &ar.multiply(jacobian.get(r, i), rate))
            })
        };
        Ok(Velocity {
            linear: [row(0), row(1), row(2)],
            angular: [row(3), row(4), row(5)],
        })
    }
}
