//! Enemy archetypes
//!
//! One pooled entity type multiplexed on a kind tag. Patrol and jumper
//! stay attached to the platform row they spawned on, the flyer hovers
//! above it with a cosmetic bob, and the bullet crosses the screen after
//! a wind-up during which it cannot hurt anyone.

use glam::Vec2;
use rand::Rng;

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{ENEMY_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::collision;
use super::motion::Body;
use super::particle::Particle;
use super::player::Player;
use super::pool::{Pool, PoolEntity};
use super::state::GameState;

const PATROL_SPEED_MOD: f32 = 0.5;
const FLYER_SPEED_MOD: f32 = 0.33;

const FLYER_HOVER: f32 = 12.0;
const FLYER_BOB_RATE: f32 = 0.1;
const FLYER_BOB_AMPLITUDE: f32 = 4.0;

const JUMPER_WAIT: f32 = 30.0;
const JUMPER_JUMP_SPEED: f32 = -2.5;
const GRAVITY_TARGET: f32 = 4.0;

const BULLET_SPEED: f32 = 1.5;

const STOMP_SPEED_LIMIT: f32 = 0.5;
const STOMP_SURFACE_OFFSET: f32 = 6.0;
const KILL_PARTICLE_COUNT: usize = 12;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    #[default]
    Patrol,
    Jumper,
    Flyer,
    Bullet,
}

#[derive(Debug, Default)]
pub struct Enemy {
    pub body: Body,
    kind: EnemyKind,

    left_bound: f32,
    right_bound: f32,
    dir: f32,

    /// Surface y of the attached platform row, scrolled along with it
    surface_y: f32,
    wait_timer: f32,
    grounded: bool,
    phase: f32,
}

impl PoolEntity for Enemy {
    fn exists(&self) -> bool {
        self.body.exists
    }
}

impl Enemy {
    pub fn spawn<R: Rng>(
        &mut self,
        x: f32,
        y: f32,
        kind: EnemyKind,
        left_bound: f32,
        right_bound: f32,
        rng: &mut R,
    ) {
        self.body.respawn(x, y);
        self.body.hitbox = Vec2::new(14.0, 12.0);
        self.body.scroll_bound = true;
        // A reused slot may carry death friction from its previous life
        self.body.friction = Vec2::ONE;
        self.kind = kind;
        self.left_bound = left_bound;
        self.right_bound = right_bound;
        self.surface_y = y + 8.0;
        self.grounded = true;
        self.phase = 0.0;
        self.wait_timer = 0.0;

        self.dir = if kind == EnemyKind::Jumper {
            0.0
        } else if rng.random_bool(0.5) {
            1.0
        } else {
            -1.0
        };

        match kind {
            EnemyKind::Flyer => {
                self.body.pos.y = self.surface_y - 8.0 - FLYER_HOVER;
                self.body.render_pos = self.body.pos;
                self.phase = rng.random::<f32>() * std::f32::consts::TAU;
            }
            EnemyKind::Jumper => {
                self.wait_timer = JUMPER_WAIT;
            }
            EnemyKind::Bullet => {
                // Off-screen wind-up, stationary and harmless
                self.body.pos.x = if self.dir > 0.0 { -8.0 } else { SCREEN_WIDTH + 8.0 };
                self.body.render_pos = self.body.pos;
                self.wait_timer = 30.0 + rng.random::<f32>() * 60.0;
            }
            _ => {}
        }
    }

    /// Wind-up bullets and anything still above the visible area
    /// cannot interact with the player
    fn harmless(&self) -> bool {
        (self.kind == EnemyKind::Bullet && self.wait_timer > 0.0) || self.body.pos.y < -8.0
    }

    fn bounce_in_bounds(&mut self) {
        if self.body.speed.x < 0.0 && self.body.pos.x < self.left_bound {
            self.body.pos.x = self.left_bound;
            self.body.speed.x *= -1.0;
            self.dir *= -1.0;
        }
        if self.body.speed.x > 0.0 && self.body.pos.x > self.right_bound {
            self.body.pos.x = self.right_bound;
            self.body.speed.x *= -1.0;
            self.dir *= -1.0;
        }
    }

    pub fn update(&mut self, move_speed: f32) {
        if !self.body.exists {
            return;
        }

        // Scrolled (or fallen) out at the bottom
        if self.body.pos.y - 8.0 > SCREEN_HEIGHT {
            self.body.exists = false;
            return;
        }

        if self.body.dying {
            self.body.integrate(move_speed);
            return;
        }

        // The attached surface scrolls with the world
        self.surface_y += move_speed;

        match self.kind {
            EnemyKind::Patrol => {
                self.body.speed.x = move_speed * PATROL_SPEED_MOD * self.dir;
                self.body.target.x = self.body.speed.x;
                self.bounce_in_bounds();
                self.body
                    .spr
                    .animate(0, 1, (6.0 - move_speed * 2.0).max(2.0));
            }
            EnemyKind::Flyer => {
                self.body.speed.x = move_speed * FLYER_SPEED_MOD * self.dir;
                self.body.target.x = self.body.speed.x;
                self.bounce_in_bounds();
                self.phase = (self.phase + FLYER_BOB_RATE) % std::f32::consts::TAU;
                self.body.spr.animate(0, 1, 4.0);
            }
            EnemyKind::Jumper => {
                if self.grounded {
                    self.body.speed.y = 0.0;
                    self.body.target.y = 0.0;
                    self.body.spr.set_frame(0);
                    self.wait_timer -= 1.0;
                    if self.wait_timer <= 0.0 {
                        self.grounded = false;
                        self.body.speed.y = JUMPER_JUMP_SPEED;
                        self.body.target.y = GRAVITY_TARGET;
                    }
                } else {
                    self.body
                        .spr
                        .set_frame(if self.body.speed.y < 0.0 { 1 } else { 2 });
                    // Back at the surface: snap to rest
                    if self.body.speed.y > 0.0 && self.body.pos.y + 8.0 >= self.surface_y {
                        self.body.pos.y = self.surface_y - 8.0;
                        self.body.speed.y = 0.0;
                        self.body.target.y = 0.0;
                        self.grounded = true;
                        self.wait_timer = JUMPER_WAIT;
                    }
                }
            }
            EnemyKind::Bullet => {
                if self.wait_timer > 0.0 {
                    self.wait_timer -= 1.0;
                } else {
                    self.body.target.x = BULLET_SPEED * self.dir;
                    // Acceleration scales with world speed
                    self.body.friction.x = 0.025 + move_speed * 0.05;
                    if (self.dir > 0.0 && self.body.pos.x - 8.0 > SCREEN_WIDTH)
                        || (self.dir < 0.0 && self.body.pos.x + 8.0 < 0.0)
                    {
                        self.body.exists = false;
                        return;
                    }
                }
                self.body.spr.animate(0, 3, 3.0);
            }
        }

        self.body.integrate(move_speed);

        // Pin ground rest after integration so the scroll added there
        // cannot leave the jumper below its surface offset
        if self.kind == EnemyKind::Jumper && self.grounded {
            self.body.pos.y = self.surface_y - 8.0;
        }
    }

    /// Stomp and touch resolution against the player
    pub fn player_collision<R: Rng>(
        &mut self,
        player: &mut Player,
        move_speed: f32,
        state: &mut GameState,
        particles: &mut Pool<Particle>,
        rng: &mut R,
        sounds: &mut SoundQueue,
    ) {
        if !self.body.exists
            || self.body.dying
            || self.harmless()
            || player.body.dying
            || !player.body.exists
        {
            return;
        }

        let stomped = collision::floor_collision(
            &mut player.body,
            self.body.pos.x - 8.0,
            self.body.pos.y - STOMP_SURFACE_OFFSET,
            16.0,
            move_speed,
            STOMP_SPEED_LIMIT,
            true,
        );
        if stomped {
            player.stomp_bounce(sounds);
            self.kill(state, particles, rng, sounds);
            return;
        }

        if collision::overlap(&self.body, &player.body) {
            player.kill(self.body.pos.x, sounds);
        }
    }

    fn kill<R: Rng>(
        &mut self,
        state: &mut GameState,
        particles: &mut Pool<Particle>,
        rng: &mut R,
        sounds: &mut SoundQueue,
    ) {
        self.body.dying = true;
        self.body.speed = Vec2::new(0.0, -2.0);
        self.body.target = Vec2::new(0.0, GRAVITY_TARGET);
        self.body.friction = Vec2::new(0.05, 0.2);

        state.add_points(ENEMY_SCORE);
        sounds.play(SoundEffect::EnemyKill);

        for _ in 0..KILL_PARTICLE_COUNT {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 1.0 + rng.random::<f32>();
            particles.acquire().spawn(
                self.body.pos.x,
                self.body.pos.y,
                Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.0),
            );
        }
    }

    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        if !self.body.exists {
            return;
        }
        self.body.interpolate(move_speed, fraction);

        if self.kind == EnemyKind::Flyer && !self.body.dying {
            // Cosmetic bob, clamped so the sprite never dips into the platform
            let bob = (self.phase + FLYER_BOB_RATE * fraction).sin() * FLYER_BOB_AMPLITUDE;
            let limit = self.surface_y - 8.0;
            self.body.render_pos.y = (self.body.render_pos.y + bob).min(limit);
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn facing(&self) -> f32 {
        self.dir
    }
}
