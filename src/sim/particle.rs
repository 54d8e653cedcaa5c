//! Short-lived visual debris
//!
//! Two pooled effects: `Particle` chunks thrown by enemy kills, and
//! `Dust` puffs trailing a running player. Both scroll with the world
//! and expire on their own.

use glam::Vec2;

use super::motion::Body;
use super::pool::PoolEntity;

const PARTICLE_LIFETIME: f32 = 120.0;
const PARTICLE_GRAVITY: f32 = 8.0;

/// A debris chunk with gravity and a fixed lifetime
#[derive(Debug, Default)]
pub struct Particle {
    pub body: Body,
    timer: f32,
}

impl PoolEntity for Particle {
    fn exists(&self) -> bool {
        self.body.exists
    }
}

impl Particle {
    pub fn spawn(&mut self, x: f32, y: f32, speed: Vec2) {
        self.body.respawn(x, y);
        self.body.speed = speed;
        self.body.target = Vec2::new(0.0, PARTICLE_GRAVITY);
        self.body.friction = Vec2::new(0.05, 0.25);
        self.body.scroll_bound = true;
        self.timer = PARTICLE_LIFETIME;
    }

    pub fn update(&mut self, move_speed: f32) {
        if !self.body.exists {
            return;
        }
        self.timer -= 1.0;
        if self.timer <= 0.0 || self.body.pos.y - 8.0 > crate::consts::SCREEN_HEIGHT {
            self.body.exists = false;
            return;
        }
        self.body.integrate(move_speed);
    }

    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        if self.body.exists {
            self.body.interpolate(move_speed, fraction);
        }
    }
}

/// A fading dust puff left at the player's feet
#[derive(Debug, Default)]
pub struct Dust {
    pub pos: Vec2,
    pub render_pos: Vec2,
    size: f32,
    shrink: f32,
    exists: bool,
}

impl PoolEntity for Dust {
    fn exists(&self) -> bool {
        self.exists
    }
}

impl Dust {
    pub fn spawn(&mut self, x: f32, y: f32, size: f32, fade: f32) {
        self.pos = Vec2::new(x, y);
        self.render_pos = self.pos;
        self.size = size;
        self.shrink = size * fade;
        self.exists = true;
    }

    pub fn update(&mut self, move_speed: f32) {
        if !self.exists {
            return;
        }
        self.size -= self.shrink;
        if self.size <= 0.0 {
            self.exists = false;
            return;
        }
        self.pos.y += move_speed;
    }

    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        if self.exists {
            self.render_pos = Vec2::new(self.pos.x, self.pos.y + move_speed * fraction);
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}
