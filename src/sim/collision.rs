//! Collision primitives for a horizontally wrapping world
//!
//! Two tests cover everything: an AABB overlap check for pickups and
//! damage, and a swept one-directional floor collision used for landing
//! on platforms and stomping enemies. Both repeat their x-axis check
//! shifted by the screen width because the world is toroidal.

use crate::consts::SCREEN_WIDTH;

use super::motion::Body;

/// Snap tolerance for the swept floor check; wide enough that slow
/// approaches still register, small enough that a bounced entity above
/// the surface does not.
const FLOOR_MARGIN: f32 = 2.0;

/// Do `[a1, a2]` and `[b1, b2]` intersect, accounting for wraparound?
pub fn span_overlaps(a1: f32, a2: f32, b1: f32, b2: f32) -> bool {
    for shift in [-SCREEN_WIDTH, 0.0, SCREEN_WIDTH] {
        if a1 + shift <= b2 && a2 + shift >= b1 {
            return true;
        }
    }
    false
}

/// AABB overlap between two entity bodies
pub fn overlap(a: &Body, b: &Body) -> bool {
    if !a.exists || !b.exists {
        return false;
    }
    let bc = b.pos + b.center;
    overlap_box(a, bc.x, bc.y, b.hitbox.x, b.hitbox.y)
}

/// AABB overlap between a body and a raw box centered at `(cx, cy)`
pub fn overlap_box(a: &Body, cx: f32, cy: f32, width: f32, height: f32) -> bool {
    if !a.exists {
        return false;
    }
    let ac = a.pos + a.center;
    let x_hit = span_overlaps(
        ac.x - a.hitbox.x / 2.0,
        ac.x + a.hitbox.x / 2.0,
        cx - width / 2.0,
        cx + width / 2.0,
    );
    x_hit
        && (ac.y - a.hitbox.y / 2.0) <= cy + height / 2.0
        && (ac.y + a.hitbox.y / 2.0) >= cy - height / 2.0
}

/// Swept one-way floor collision against the surface line `y` over
/// `[x, x + width]`.
///
/// Fires only while the body is moving down faster than
/// `speed_check_limit`, which keeps a freshly bounced or resting entity
/// from re-triggering on the same surface. The predicted next-tick
/// position includes the world scroll (`move_speed`) so a fast approach
/// cannot tunnel through a thin floor.
///
/// On hit the body is snapped to rest on the surface and its vertical
/// speed zeroed unless `special` is set (stomp bounce keeps it).
pub fn floor_collision(
    body: &mut Body,
    x: f32,
    y: f32,
    width: f32,
    move_speed: f32,
    speed_check_limit: f32,
    special: bool,
) -> bool {
    if !body.exists || body.dying {
        return false;
    }
    if body.speed.y <= speed_check_limit {
        return false;
    }

    let cx = body.pos.x + body.center.x;
    let half = body.hitbox.x / 2.0;
    if !span_overlaps(cx - half, cx + half, x, x + width) {
        return false;
    }

    let bottom = body.pos.y + body.center.y + body.hitbox.y / 2.0;
    let predicted = bottom + body.speed.y + move_speed;
    if y < bottom - FLOOR_MARGIN || y > predicted + FLOOR_MARGIN {
        return false;
    }

    body.pos.y = y - body.center.y - body.hitbox.y / 2.0;
    if !special {
        body.speed.y = 0.0;
    }
    true
}
