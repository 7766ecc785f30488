//! Ready-made spatial state changes for targets that expose `position`,
//! `scale` (both `Vec3`) and `quaternion` (`Quat`).
//!
//! Presets read the target's current transform while the timeline is being
//! defined, so call them from `Sequence::define`.

use crate::composite::CompositeStateChange;
use crate::error::{Result, TimelineError};
use crate::interp::functions::normalize4;
use crate::property::PropertyStateChange;
use crate::state_change::StateChange;
use crate::target::TargetRef;
use crate::value::Value;

pub const POSITION: &str = "position";
pub const SCALE: &str = "scale";
pub const ROTATION: &str = "quaternion";

/// Stand-in for zero lengths/scales, which would collapse a rotation.
const LENGTH_EPSILON: f32 = 1e-6;

const IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Local forward axis used by `walk_to`'s prep turn.
const BACK: [f32; 3] = [0.0, 0.0, 1.0];

fn alive(target: &TargetRef) -> Result<()> {
    if target.is_alive() {
        Ok(())
    } else {
        Err(TimelineError::DetachedTarget {
            name: target.label(),
        })
    }
}

fn read_vec3(target: &TargetRef, property: &str, fallback: [f32; 3]) -> [f32; 3] {
    target.get(property).and_then(|v| v.as_vec3()).unwrap_or(fallback)
}

#[inline]
fn sub3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn add3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
fn scale3(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
fn length3(a: [f32; 3]) -> f32 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

fn normalized3(a: [f32; 3]) -> Option<[f32; 3]> {
    let len = length3(a);
    (len > LENGTH_EPSILON).then(|| scale3(a, 1.0 / len))
}

fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Hamilton product `a * b`, components `(x, y, z, w)`.
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

/// Quaternion from Euler angles in radians, applied in YXZ order.
pub fn quat_from_euler_yxz(x: f32, y: f32, z: f32) -> [f32; 4] {
    let (sx, cx) = (x * 0.5).sin_cos();
    let (sy, cy) = (y * 0.5).sin_cos();
    let (sz, cz) = (z * 0.5).sin_cos();
    let qy = [0.0, sy, 0.0, cy];
    let qx = [sx, 0.0, 0.0, cx];
    let qz = [0.0, 0.0, sz, cz];
    quat_mul(quat_mul(qy, qx), qz)
}

/// Shortest rotation taking unit vector `from` onto unit vector `to`.
pub fn quat_from_arc(from: [f32; 3], to: [f32; 3]) -> [f32; 4] {
    let d = from[0] * to[0] + from[1] * to[1] + from[2] * to[2];
    if d < -1.0 + 1e-6 {
        // Opposite vectors: half turn about any perpendicular axis.
        let axis = normalized3(cross3([1.0, 0.0, 0.0], from))
            .or_else(|| normalized3(cross3([0.0, 1.0, 0.0], from)))
            .unwrap_or([0.0, 0.0, 1.0]);
        return [axis[0], axis[1], axis[2], 0.0];
    }
    let c = cross3(from, to);
    let s = ((1.0 + d) * 2.0).sqrt();
    normalize4([c[0] / s, c[1] / s, c[2] / s, s * 0.5])
}

/// Move to `destination`, stopping `stop_distance` short of it along the
/// approach direction.
pub fn move_to(
    target: &TargetRef,
    destination: [f32; 3],
    stop_distance: f32,
) -> Result<PropertyStateChange> {
    alive(target)?;
    let current = read_vec3(target, POSITION, [0.0; 3]);
    let end = match normalized3(sub3(destination, current)) {
        Some(dir) => sub3(destination, scale3(dir, stop_distance)),
        None => destination,
    };
    Ok(PropertyStateChange::new(target.clone(), POSITION, Value::Vec3(end)))
}

pub fn move_by(target: &TargetRef, displacement: [f32; 3]) -> Result<PropertyStateChange> {
    alive(target)?;
    let current = read_vec3(target, POSITION, [0.0; 3]);
    Ok(PropertyStateChange::new(
        target.clone(),
        POSITION,
        Value::Vec3(add3(current, displacement)),
    ))
}

/// Scale to `scale`. Zero scales are replaced by a tiny epsilon, and a target
/// currently at zero scale is nudged to that epsilon first.
pub fn scale_to(target: &TargetRef, scale: [f32; 3]) -> Result<PropertyStateChange> {
    alive(target)?;
    let epsilon = [LENGTH_EPSILON; 3];
    let end = if scale == [0.0; 3] { epsilon } else { scale };
    if read_vec3(target, SCALE, [1.0; 3]) == [0.0; 3] {
        target.set(SCALE, Value::Vec3(epsilon));
    }
    Ok(PropertyStateChange::new(target.clone(), SCALE, Value::Vec3(end)))
}

pub fn scale_to_uniform(target: &TargetRef, scale: f32) -> Result<PropertyStateChange> {
    scale_to(target, [scale; 3])
}

/// Rotate to `destination` (normalized before use).
pub fn rotate_to(target: &TargetRef, destination: [f32; 4]) -> Result<PropertyStateChange> {
    alive(target)?;
    let scale = read_vec3(target, SCALE, [1.0; 3]);
    if scale[0] < LENGTH_EPSILON {
        target.set(SCALE, Value::Vec3([LENGTH_EPSILON; 3]));
    }
    Ok(PropertyStateChange::new(
        target.clone(),
        ROTATION,
        Value::Quat(normalize4(destination)),
    ))
}

pub fn rotate_to_euler_degrees(
    target: &TargetRef,
    degrees: [f32; 3],
) -> Result<PropertyStateChange> {
    let [x, y, z] = degrees.map(f32::to_radians);
    rotate_to(target, quat_from_euler_yxz(x, y, z))
}

/// Turn toward `destination` over `prep_turn_duration` while moving there.
pub fn walk_to(
    target: &TargetRef,
    destination: [f32; 3],
    stop_distance: f32,
    prep_turn_duration: f64,
) -> Result<CompositeStateChange> {
    alive(target)?;
    let current = read_vec3(target, POSITION, [0.0; 3]);
    let facing = match normalized3(sub3(destination, current)) {
        Some(dir) => quat_from_arc(BACK, dir),
        None => target.get(ROTATION).and_then(|v| v.as_quat()).unwrap_or(IDENTITY),
    };
    let mut composite = CompositeStateChange::new().with_name(format!(
        "{}.walk_to({})",
        target.label(),
        Value::Vec3(destination)
    ));
    composite.add(rotate_to(target, facing)?.with_duration(prep_turn_duration), 0.0)?;
    composite.add_parallel(move_to(target, destination, stop_distance)?, 0.0)?;
    Ok(composite)
}

/// Scale up by `factor` over `attack`, hold for `hold`, then return to the
/// original scale over `decay`.
pub fn pulse(
    target: &TargetRef,
    factor: f32,
    attack: f64,
    hold: f64,
    decay: f64,
) -> Result<CompositeStateChange> {
    alive(target)?;
    let original = read_vec3(target, SCALE, [1.0; 3]);
    let peak = scale3(original, factor);
    let mut composite =
        CompositeStateChange::new().with_name(format!("{}.pulse()", target.label()));
    composite.add(scale_to(target, peak)?.with_duration(attack), 0.0)?;
    if hold > 0.0 {
        composite.add(
            PropertyStateChange::new(target.clone(), SCALE, Value::Vec3(peak)).with_duration(hold),
            0.0,
        )?;
    }
    composite.add(scale_to(target, original)?.with_duration(decay), 0.0)?;
    Ok(composite)
}
