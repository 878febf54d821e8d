//! Toroidal grid arithmetic and the directional vision cone.

use genesis_data::Direction;

/// Wraps `value` into `[0, size)`.
#[inline]
#[must_use]
pub fn wrap(value: i32, size: u16) -> u16 {
    value.rem_euclid(i32::from(size)) as u16
}

/// Signed shortest displacement from `from` to `to` on a ring of `size`.
///
/// Exactly half-way displacements resolve to the positive direction.
#[inline]
#[must_use]
pub fn shortest_delta(from: u16, to: u16, size: u16) -> i32 {
    let size = i32::from(size);
    let mut delta = (i32::from(to) - i32::from(from)).rem_euclid(size);
    if delta > size / 2 {
        delta -= size;
    }
    delta
}

/// Toroidal shortest displacement `(dx, dy)` between two cells.
#[must_use]
pub fn torus_delta(from: (u16, u16), to: (u16, u16), width: u16, height: u16) -> (i32, i32) {
    (
        shortest_delta(from.0, to.0, width),
        shortest_delta(from.1, to.1, height),
    )
}

/// Euclidean length of the toroidal shortest displacement.
#[must_use]
pub fn torus_distance(from: (u16, u16), to: (u16, u16), width: u16, height: u16) -> f64 {
    let (dx, dy) = torus_delta(from, to, width, height);
    f64::from(dx).hypot(f64::from(dy))
}

/// Unit step `(signum dx, signum dy)` toward `to`.
#[must_use]
pub fn step_toward(from: (u16, u16), to: (u16, u16), width: u16, height: u16) -> (i32, i32) {
    let (dx, dy) = torus_delta(from, to, width, height);
    (dx.signum(), dy.signum())
}

/// Returns `true` if offset `(dx, dy)` falls inside the cone of `cone_angle`
/// degrees centred on `facing`. The origin is always visible.
#[must_use]
pub fn in_vision_cone(dx: i32, dy: i32, facing: Direction, cone_angle: f64) -> bool {
    if dx == 0 && dy == 0 {
        return true;
    }
    let (fx, fy) = facing.vector();
    let (dx, dy) = (f64::from(dx), f64::from(dy));
    let (fx, fy) = (f64::from(fx), f64::from(fy));

    let dot = dx * fx + dy * fy;
    let norm = dx.hypot(dy) * fx.hypot(fy);
    let cos = (dot / norm).clamp(-1.0, 1.0);
    // Small tolerance so offsets lying exactly on the cone boundary count.
    cos.acos().to_degrees() <= cone_angle / 2.0 + 1e-9
}
