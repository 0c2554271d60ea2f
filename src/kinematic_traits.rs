use std::fmt;

use crate::chain::FrameSequence;
use crate::jacobian::{Jacobian, Velocity};
use crate::parameter_error::ParameterError;
use crate::value::Value;

/// Three components (x, y, z) of a position, axis or velocity.
pub type Vector3V = [Value; 3];

/// Joint rates, one per link. These may be numeric or symbolic (`w1`, `q1_dot`, ...).
pub type JointRates = Vec<Value>;

/// The two DH decompositions maintained in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "allow_filesystem", derive(clap::ValueEnum))]
pub enum Convention {
    /// Standard (distal) DH: `Rz(θ)·Tz(d)·Tx(a)·Rx(α)`.
    A,
    /// Modified (proximal) DH: `Rx(α)·Tx(a)·Rz(θ)·Tz(d)`.
    D,
}

impl Convention {
    pub const ALL: [Convention; 2] = [Convention::A, Convention::D];
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Convention::A => write!(f, "A"),
            Convention::D => write!(f, "D"),
        }
    }
}

/// Forward kinematics and velocity analysis of a serial chain, symbolic or numeric.
pub trait Kinematics {
    /// Cumulative transforms T(0→1) … T(0→n) in the given convention.
    fn frames(&self, convention: Convention) -> FrameSequence;

    /// Geometric Jacobian (revolute joints) built from the frames of the given convention.
    fn jacobian(&self, convention: Convention) -> Jacobian;

    /// End effector velocity for the given joint rates.
    fn velocity(&self, convention: Convention, joint_rates: &[Value]) -> Result<Velocity, ParameterError>;
}
