//! Helper functions

use crate::chain::FrameSequence;
use crate::jacobian::{Jacobian, Velocity};
use crate::position_analysis::DerivativeMatrix;
use crate::transform::HomogeneousTransform;
use crate::value::Value;

/// Computed magnitudes below this are snapped to exact zero, so that `sin(180)` is `0`
/// and symbolic zero-elision keeps working.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Snap values close to zero to exact zero (also removes negative zero).
pub fn snap_to_zero(x: f64) -> f64 {
    if x.abs() < ZERO_TOLERANCE { 0.0 } else { x }
}

/// Print integers without the decimal point, everything else in the shortest exact form.
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// Print a homogeneous transform row by row.
pub fn dump_transform(title: &str, transform: &HomogeneousTransform) {
    println!("{}", title);
    for row in transform.rows() {
        println!("  [{}]", join(row));
    }
}

/// Print per-joint and cumulative transforms of a frame sequence.
pub fn dump_frames(frames: &FrameSequence) {
    let convention = frames.convention();
    for (i, joint) in frames.joint_transforms().iter().enumerate() {
        dump_transform(&format!("T{}^{} ({})", i, i + 1, convention), joint);
    }
    dump_transform(&format!("Final transform ({})", convention), frames.final_transform());
}

pub fn dump_jacobian(jacobian: &Jacobian) {
    println!("Jacobian ({}), {}x{}", jacobian.convention(), 6, jacobian.joints());
    for row in 0..6 {
        let cells: Vec<Value> = (0..jacobian.joints()).map(|col| jacobian.get(row, col).clone()).collect();
        println!("  [{}]", join(&cells));
    }
}

pub fn dump_velocity(velocity: &Velocity) {
    println!("Linear:  [{}]", join(&velocity.linear));
    println!("Angular: [{}]", join(&velocity.angular));
}

pub fn dump_derivatives(derivatives: &DerivativeMatrix) {
    println!("Derivatives by [{}]", derivatives.symbols().join(", "));
    for row in derivatives.cells() {
        println!("  [{}]", row.join(", "));
    }
}

fn join(values: &[Value]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(1e-11), 0.0);
        assert_eq!(snap_to_zero(-1e-12).to_bits(), 0.0f64.to_bits());
        assert_eq!(snap_to_zero(1e-9), 1e-9);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-90.0), "-90");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
    }
}
