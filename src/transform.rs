//! Homogeneous transform of a single joint, in both DH conventions.

use std::collections::HashMap;
use std::fmt;

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};

use crate::algebra_traits::AlgebraError;
use crate::arithmetic::Arithmetic;
use crate::kinematic_traits::{Convention, Vector3V};
use crate::parameters::DhParameter;
use crate::value::Value;

/// 4x4 matrix of values. The last row is always the literal `[0, 0, 0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousTransform {
    m: [[Value; 4]; 4],
}

impl HomogeneousTransform {
    pub fn identity() -> Self {
        HomogeneousTransform::from_upper(std::array::from_fn(|r| {
            std::array::from_fn(|c| if r == c { Value::one() } else { Value::zero() })
        }))
    }

    /// Build from the upper three rows; the last row is added.
    pub fn from_upper(upper: [[Value; 4]; 3]) -> Self {
        let [r0, r1, r2] = upper;
        HomogeneousTransform {
            m: [r0, r1, r2, [Value::zero(), Value::zero(), Value::zero(), Value::one()]],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> &Value {
        &self.m[row][col]
    }

    pub fn rows(&self) -> &[[Value; 4]; 4] {
        &self.m
    }

    /// Translation column, rows 0..2.
    pub fn origin(&self) -> Vector3V {
        self.column(3)
    }

    /// Third column, rows 0..2: the z axis of this frame in base coordinates.
    pub fn z_axis(&self) -> Vector3V {
        self.column(2)
    }

    fn column(&self, col: usize) -> Vector3V {
        std::array::from_fn(|row| self.m[row][col].clone())
    }

    pub fn is_numeric(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_numeric())
    }

    /// Numeric view, `None` while any entry is symbolic.
    pub fn to_matrix4(&self) -> Option<Matrix4<f64>> {
        let mut matrix = Matrix4::zeros();
        for (r, row) in self.m.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                matrix[(r, c)] = value.as_number()?;
            }
        }
        Some(matrix)
    }

    /// Rigid body view of a numeric transform.
    pub fn to_isometry(&self) -> Option<Isometry3<f64>> {
        self.to_matrix4().map(|m| isometry_from_matrix(&m))
    }

    /// Evaluate every entry with the given symbol values (angles in degrees).
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<Matrix4<f64>, AlgebraError> {
        let mut matrix = Matrix4::zeros();
        for (r, row) in self.m.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                matrix[(r, c)] = value.evaluate(bindings)?;
            }
        }
        Ok(matrix)
    }
}

fn isometry_from_matrix(m: &Matrix4<f64>) -> Isometry3<f64> {
    let rotation: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    Isometry3::from_parts(Translation3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]), rotation)
}

impl fmt::Display for HomogeneousTransform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.m {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// Builds joint transforms from DH parameters.
pub struct TransformBuilder<'a> {
    arithmetic: &'a Arithmetic,
}

impl<'a> TransformBuilder<'a> {
    pub fn new(arithmetic: &'a Arithmetic) -> Self {
        TransformBuilder { arithmetic }
    }

    pub fn build(&self, dh: &DhParameter, convention: Convention) -> HomogeneousTransform {
        match convention {
            Convention::A => self.build_a(dh),
            Convention::D => self.build_d(dh),
        }
    }

    /// Standard DH, `Rz(θ)·Tz(d)·Tx(a)·Rx(α)`.
    pub fn build_a(&self, dh: &DhParameter) -> HomogeneousTransform {
        let ar = self.arithmetic;
        let (ct, st) = (ar.cos(&dh.theta), ar.sin(&dh.theta));
        let (ca, sa) = (ar.cos(&dh.alpha), ar.sin(&dh.alpha));

        HomogeneousTransform::from_upper([
            [ct.clone(), ar.multiply(&ar.negate(&ca), &st), ar.multiply(&sa, &st), ar.multiply(&dh.a, &ct)],
            [st.clone(), ar.multiply(&ca, &ct), ar.multiply(&ar.negate(&sa), &ct), ar.multiply(&dh.a, &st)],
            [Value::zero(), sa, ca, dh.d.clone()],
        ])
    }

    /// Modified (Craig) DH, `Rx(α)·Tx(a)·Rz(θ)·Tz(d)`.
    pub fn build_d(&self, dh: &DhParameter) -> HomogeneousTransform {
        let ar = self.arithmetic;
        let (ct, st) = (ar.cos(&dh.theta), ar.sin(&dh.theta));
        let (ca, sa) = (ar.cos(&dh.alpha), ar.sin(&dh.alpha));

        HomogeneousTransform::from_upper([
            [ct.clone(), ar.negate(&st), Value::zero(), dh.a.clone()],
            [ar.multiply(&st, &ca), ar.multiply(&ct, &ca), ar.negate(&sa), ar.multiply(&ar.negate(&dh.d), &sa)],
            [ar.multiply(&st, &sa), ar.multiply(&ct, &sa), ca.clone(), ar.multiply(&dh.d, &ca)],
        ])
    }
}
