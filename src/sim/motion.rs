//! Shared entity motion and lifecycle
//!
//! Every entity wraps a [`Body`]: velocity eased toward a target under a
//! per-axis friction cap, position integrated once per tick, plus the
//! exists/dying lifecycle flags and an animation frame/timer pair.

use glam::Vec2;

/// Animation frame/timer pair
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    frame: i32,
    timer: f32,
}

impl Sprite {
    fn next_frame(&mut self, dir: i32, start: i32, end: i32) {
        self.frame += dir;

        let min = start.min(end);
        let max = start.max(end);
        if self.frame < min {
            self.frame = max;
        } else if self.frame > max {
            self.frame = min;
        }
    }

    /// Advance the animation loop `start..=end` by one tick, switching
    /// frames every `frame_time` ticks. A non-positive `frame_time` steps
    /// immediately.
    pub fn animate(&mut self, start: i32, end: i32, frame_time: f32) {
        let dir = (end - start).signum();

        if frame_time <= 0.0 {
            self.next_frame(dir, start, end);
            return;
        }

        self.timer += 1.0;
        while self.timer >= frame_time {
            self.timer -= frame_time;
            self.next_frame(dir, start, end);
        }
    }

    pub fn set_frame(&mut self, frame: i32) {
        self.frame = frame;
        self.timer = 0.0;
    }

    pub fn frame(&self) -> i32 {
        self.frame
    }
}

/// Ease `speed` toward `target`, moving at most `friction` per tick
#[inline]
pub fn ease_speed(speed: f32, target: f32, friction: f32) -> f32 {
    if speed < target {
        (speed + friction).min(target)
    } else {
        (speed - friction).max(target)
    }
}

/// Motion, collision shape and lifecycle state shared by all entities
#[derive(Debug, Clone)]
pub struct Body {
    /// Simulation-space position
    pub pos: Vec2,
    /// Cosmetic interpolated position, updated on the render cadence only
    pub render_pos: Vec2,
    pub speed: Vec2,
    pub target: Vec2,
    /// Per-axis speed-change cap per tick, not physical drag
    pub friction: Vec2,
    /// Collision center offset from `pos`
    pub center: Vec2,
    /// Full hitbox extents
    pub hitbox: Vec2,
    /// World scroll speed is added to the y axis when set
    pub scroll_bound: bool,
    pub exists: bool,
    pub dying: bool,
    pub spr: Sprite,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            render_pos: Vec2::ZERO,
            speed: Vec2::ZERO,
            target: Vec2::ZERO,
            friction: Vec2::ONE,
            center: Vec2::ZERO,
            hitbox: Vec2::ZERO,
            scroll_bound: false,
            exists: false,
            dying: false,
            spr: Sprite::default(),
        }
    }
}

impl Body {
    pub fn new(x: f32, y: f32, exists: bool) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            render_pos: pos,
            exists,
            ..Default::default()
        }
    }

    /// Reset position and motion for a pool respawn
    pub fn respawn(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.render_pos = self.pos;
        self.speed = Vec2::ZERO;
        self.target = Vec2::ZERO;
        self.exists = true;
        self.dying = false;
        self.spr.set_frame(0);
    }

    /// One fixed-step integration: ease both axes, then move
    pub fn integrate(&mut self, move_speed: f32) {
        self.speed.x = ease_speed(self.speed.x, self.target.x, self.friction.x);
        self.speed.y = ease_speed(self.speed.y, self.target.y, self.friction.y);

        self.pos += self.speed;
        if self.scroll_bound {
            self.pos.y += move_speed;
        }
    }

    /// Refresh the cosmetic render position; never touches gameplay state
    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        let mut vel = self.speed;
        if self.scroll_bound {
            vel.y += move_speed;
        }
        self.render_pos = self.pos + vel * fraction;
    }
}
