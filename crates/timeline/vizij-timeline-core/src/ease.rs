//! Transition curves and ease modes.
//!
//! Every transition is defined by its `In` curve over normalized progress
//! `p ∈ [0, 1]`. `Out`, `InOut` and `OutIn` are reflections of that curve, so
//! all combinations map 0 → 0 and 1 → 1.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Shape of the timing curve.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Linear,
    Sine,
    Quint,
    Quart,
    Quad,
    Expo,
    Elastic,
    #[default]
    Cubic,
    Circ,
    Bounce,
    Back,
    Spring,
}

/// Which end(s) of the curve are eased.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ease {
    In,
    Out,
    #[default]
    InOut,
    OutIn,
}

impl Transition {
    pub const ALL: [Transition; 12] = [
        Transition::Linear,
        Transition::Sine,
        Transition::Quint,
        Transition::Quart,
        Transition::Quad,
        Transition::Expo,
        Transition::Elastic,
        Transition::Cubic,
        Transition::Circ,
        Transition::Bounce,
        Transition::Back,
        Transition::Spring,
    ];

    /// The `In` form of this transition.
    fn ease_in(self, p: f64) -> f64 {
        match self {
            Transition::Linear => p,
            Transition::Sine => 1.0 - (p * FRAC_PI_2).cos(),
            Transition::Quint => p.powi(5),
            Transition::Quart => p.powi(4),
            Transition::Quad => p * p,
            Transition::Expo => {
                if p <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * p - 10.0)
                }
            }
            Transition::Elastic => {
                if p <= 0.0 {
                    0.0
                } else if p >= 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    -(2f64.powf(10.0 * p - 10.0)) * ((p * 10.0 - 10.75) * c4).sin()
                }
            }
            Transition::Cubic => p * p * p,
            Transition::Circ => 1.0 - (1.0 - p * p).max(0.0).sqrt(),
            Transition::Bounce => 1.0 - bounce_out(1.0 - p),
            Transition::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * p * p * p - c1 * p * p
            }
            Transition::Spring => 1.0 - spring_out(1.0 - p),
        }
    }
}

fn bounce_out(p: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if p < 1.0 / d1 {
        n1 * p * p
    } else if p < 2.0 / d1 {
        let p = p - 1.5 / d1;
        n1 * p * p + 0.75
    } else if p < 2.5 / d1 {
        let p = p - 2.25 / d1;
        n1 * p * p + 0.9375
    } else {
        let p = p - 2.625 / d1;
        n1 * p * p + 0.984375
    }
}

/// Damped overshoot that settles exactly on 1.
fn spring_out(p: f64) -> f64 {
    if p >= 1.0 {
        return 1.0;
    }
    let s = 1.0 - p;
    (((p * PI * (0.2 + 2.5 * p * p * p)).sin() * s.powf(2.2)) + p) * (1.0 + 1.2 * s)
}

/// Map linear progress `p` to eased progress. `p` is clamped into `[0, 1]`.
pub fn ease(transition: Transition, ease: Ease, p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    // Exact endpoints regardless of curve rounding.
    if p == 0.0 {
        return 0.0;
    }
    if p == 1.0 {
        return 1.0;
    }
    let ease_in = |x: f64| transition.ease_in(x);
    let ease_out = |x: f64| 1.0 - transition.ease_in(1.0 - x);
    match ease {
        Ease::In => ease_in(p),
        Ease::Out => ease_out(p),
        Ease::InOut => {
            if p < 0.5 {
                0.5 * ease_in(2.0 * p)
            } else {
                0.5 + 0.5 * ease_out(2.0 * p - 1.0)
            }
        }
        Ease::OutIn => {
            if p < 0.5 {
                0.5 * ease_out(2.0 * p)
            } else {
                0.5 + 0.5 * ease_in(2.0 * p - 1.0)
            }
        }
    }
}
