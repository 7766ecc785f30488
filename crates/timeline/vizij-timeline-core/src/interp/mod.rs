//! Type-dispatched interpolation between a captured start value and an end value.
//!
//! Float/Vec2/Vec3/Color blend component-wise on eased progress. Quaternions
//! always SLERP on linear progress; eased rotation is not supported. Every
//! other combination (Bool, Text, mismatched kinds) has no rule and returns
//! `None` so the caller can snap to the end value.

pub mod functions;

use crate::ease::{ease, Ease, Transition};
use crate::value::Value;
use functions::{lerp_f32, lerp_vec2, lerp_vec3, lerp_vec4, slerp_quat};

/// Interpolate `start → end` at linear progress `p ∈ [0, 1]`.
pub fn interpolate(
    start: &Value,
    end: &Value,
    p: f64,
    transition: Transition,
    ease_mode: Ease,
) -> Option<Value> {
    let eased = ease(transition, ease_mode, p) as f32;
    let value = match (start, end) {
        (Value::Float(a), Value::Float(b)) => Value::Float(lerp_f32(*a, *b, eased)),
        (Value::Vec2(a), Value::Vec2(b)) => Value::Vec2(lerp_vec2(*a, *b, eased)),
        (Value::Vec3(a), Value::Vec3(b)) => Value::Vec3(lerp_vec3(*a, *b, eased)),
        (Value::Color(a), Value::Color(b)) => Value::Color(lerp_vec4(*a, *b, eased)),
        (Value::Quat(a), Value::Quat(b)) => {
            Value::Quat(slerp_quat(*a, *b, p.clamp(0.0, 1.0) as f32))
        }
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_follows_the_curve() {
        let v = interpolate(
            &Value::f(0.0),
            &Value::f(10.0),
            0.5,
            Transition::Cubic,
            Ease::InOut,
        );
        assert_eq!(v, Some(Value::f(5.0)));

        let v = interpolate(
            &Value::f(0.0),
            &Value::f(10.0),
            0.5,
            Transition::Quad,
            Ease::In,
        );
        assert_eq!(v, Some(Value::f(2.5)));
    }

    #[test]
    fn color_is_component_wise() {
        let v = interpolate(
            &Value::rgba(0.0, 0.0, 0.0, 1.0),
            &Value::rgba(1.0, 0.5, 0.0, 0.0),
            0.5,
            Transition::Linear,
            Ease::In,
        );
        assert_eq!(v, Some(Value::rgba(0.5, 0.25, 0.0, 0.5)));
    }

    #[test]
    fn quaternion_ignores_ease() {
        let a = Value::quat(0.0, 0.0, 0.0, 1.0);
        let b = Value::quat(0.0, 1.0, 0.0, 0.0);
        let linear = interpolate(&a, &b, 0.25, Transition::Linear, Ease::In);
        let eased = interpolate(&a, &b, 0.25, Transition::Expo, Ease::Out);
        assert_eq!(linear, eased);
    }

    #[test]
    fn unsupported_kinds_have_no_rule() {
        assert_eq!(
            interpolate(
                &Value::Bool(false),
                &Value::Bool(true),
                0.5,
                Transition::Linear,
                Ease::In
            ),
            None
        );
        assert_eq!(
            interpolate(
                &Value::f(0.0),
                &Value::vec2(1.0, 1.0),
                0.5,
                Transition::Linear,
                Ease::In
            ),
            None
        );
    }
}
