//! Symbolic and numeric forward kinematics for serial manipulators described by
//! Denavit–Hartenberg parameters.
//!
//! Every DH parameter (θ, α, a, d) may be a number or an expression such as `θ1+90` or `L1`.
//! All computations run over this hybrid domain: numbers stay numbers, and anything that touches
//! a symbol becomes a simplified expression. Angles are in degrees.
//!
//! # Features
//!
//! - Joint transforms in standard (distal, convention A) and modified (proximal, convention D)
//!   DH, with exact quarter-turn identities for offsets like `θ2+90`.
//! - Cumulative frames T(0→1) … T(0→n) and transforms between any two frames.
//! - Geometric Jacobian of revolute chains and end effector velocities for numeric or symbolic
//!   joint rates.
//! - Partial derivatives of the end effector position by chosen symbols and the determinant of
//!   that matrix, as a singularity test.
//! - A small built-in computer algebra system (parsing, expansion, angle-sum identities,
//!   derivatives, determinants) behind the [`algebra_traits::Algebra`] trait.
//! - nalgebra views of numeric results, and evaluation of symbolic ones at given joint values.
//! - Chains can be read from YAML files, and there is a command line tool.
//!
//! ```
//! use rs_dh_kinematics::kinematic_traits::{Convention, Kinematics};
//! use rs_dh_kinematics::kinematics_impl::DhKinematics;
//! use rs_dh_kinematics::parameters::Chain;
//!
//! let chain = Chain::parse(&[["θ1", "0", "L1", "0"], ["θ2", "0", "L2", "0"]]).unwrap();
//! let robot = DhKinematics::new(chain);
//! let frames = robot.frames(Convention::A);
//! assert_eq!(frames.final_transform().get(0, 3).to_string(), "L1*cos(θ1) + L2*cos(θ1 + θ2)");
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod value;
pub mod arithmetic;
mod trig;

pub mod transform;
pub mod chain;
pub mod jacobian;
pub mod position_analysis;

pub mod algebra_traits;
pub mod algebra_impl;

#[path = "algebra/expr.rs"]
pub mod expr;

#[path = "algebra/parser.rs"]
pub mod parser;

#[path = "algebra/simplify.rs"]
mod simplify;

#[path = "algebra/derivative.rs"]
mod derivative;

#[path = "algebra/determinant.rs"]
mod determinant;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
