//! Textbook chains with symbolic joint variables and link dimensions (standard DH rows)

use crate::expr::Expr;
use crate::parameters::{Chain, DhParameter};
use crate::value::Value;

fn sym(name: &str) -> Value {
    Value::symbol(name)
}

fn num(x: f64) -> Value {
    Value::Number(x)
}

fn row(theta: Value, alpha: f64, a: Value, d: Value) -> DhParameter {
    DhParameter::new(theta, num(alpha), a, d)
}

impl Chain {
    /// Two link planar arm with link lengths L1, L2.
    pub fn planar_2r() -> Self {
        Chain {
            links: vec![
                row(sym("θ1"), 0.0, sym("L1"), num(0.0)),
                row(sym("θ2"), 0.0, sym("L2"), num(0.0)),
            ],
        }
    }

    /// Three link planar arm with link lengths L1, L2, L3.
    pub fn planar_3r() -> Self {
        let mut chain = Chain::planar_2r();
        chain.links.push(row(sym("θ3"), 0.0, sym("L3"), num(0.0)));
        chain
    }

    /// SCARA arm, revolute joints only (the vertical stroke is the constant d3).
    pub fn scara() -> Self {
        Chain {
            links: vec![
                row(sym("θ1"), 0.0, sym("L1"), sym("d1")),
                row(sym("θ2"), 180.0, sym("L2"), num(0.0)),
                row(sym("θ3"), 0.0, num(0.0), sym("d3")),
            ],
        }
    }

    /// Articulated (elbow) arm: waist, shoulder and elbow. The shoulder is offset by 90
    /// degrees so that zero joint angles point the upper arm up.
    pub fn elbow_manipulator() -> Self {
        let shoulder = Value::Symbolic(Expr::Add(vec![Expr::symbol("θ2"), Expr::Const(90.0)]));
        Chain {
            links: vec![
                row(sym("θ1"), 90.0, num(0.0), sym("d1")),
                row(shoulder, 0.0, sym("L2"), num(0.0)),
                row(sym("θ3"), 0.0, sym("L3"), num(0.0)),
            ],
        }
    }

    /// Spherical wrist with three intersecting axes and the flange at distance d6.
    pub fn spherical_wrist() -> Self {
        Chain {
            links: vec![
                row(sym("θ4"), -90.0, num(0.0), num(0.0)),
                row(sym("θ5"), 90.0, num(0.0), num(0.0)),
                row(sym("θ6"), 0.0, num(0.0), sym("d6")),
            ],
        }
    }
}
