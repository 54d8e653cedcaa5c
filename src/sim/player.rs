//! Player movement and jump state machine
//!
//! Grounded state is tracked through the ledge timer: landing refreshes
//! it every tick, so walking off an edge leaves an 8-tick window in which
//! a jump press still launches. Landing also restores the one airborne
//! re-jump. The stomp bounce, its chain extension and the banked bonus
//! timer all live here too.

use glam::Vec2;

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::InputSnapshot;
use crate::neg_mod;

use super::collision;
use super::motion::Body;
use super::particle::Dust;
use super::pool::Pool;

const RUN_SPEED: f32 = 1.0;
const GRAVITY_TARGET: f32 = 4.0;
const FRICTION: Vec2 = Vec2::new(0.15, 0.15);

const JUMP_TIME: f32 = 12.0;
const DOUBLE_JUMP_TIME: f32 = 8.0;
const JUMP_SPEED: f32 = -2.25;

const LEDGE_TIME: f32 = 8.0;
const STOMP_TIME: f32 = 8.0;
const STOMP_EXTEND: f32 = 8.0;
const STOMP_SPEED: f32 = -2.5;

const FAST_DROP_SPEED: f32 = 4.0;

const DUST_INTERVAL: f32 = 10.0;
const DEATH_POP_SPEED: f32 = -3.0;

#[derive(Debug)]
pub struct Player {
    pub body: Body,

    dir: i32,
    ledge_timer: f32,
    jump_timer: f32,
    stomp_timer: f32,
    /// Bounce time banked by an early fast-drop or jump release, folded
    /// into the next launch so a mistimed input does not lose the combo
    bonus_timer: f32,
    can_double_jump: bool,
    fast_drop: bool,
    dust_timer: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        let mut body = Body::new(x, y, true);
        body.friction = FRICTION;
        body.hitbox = Vec2::new(12.0, 16.0);
        body.scroll_bound = true;

        Self {
            body,
            dir: 0,
            ledge_timer: LEDGE_TIME,
            jump_timer: 0.0,
            stomp_timer: 0.0,
            bonus_timer: 0.0,
            can_double_jump: false,
            fast_drop: false,
            dust_timer: DUST_INTERVAL,
        }
    }

    fn grounded(&self) -> bool {
        self.ledge_timer > 0.0
    }

    fn control(&mut self, input: &InputSnapshot, sounds: &mut SoundQueue) {
        let mut dir = 0;
        if input.right.is_down() {
            dir = 1;
        } else if input.left.is_down() {
            dir = -1;
        }
        if dir != 0 {
            self.dir = dir;
        }
        self.body.target.x = RUN_SPEED * dir as f32;
        self.body.target.y = GRAVITY_TARGET;

        let airborne = !self.grounded();

        // Fast drop: down while airborne and not rising
        if self.fast_drop {
            if !input.down.is_down() {
                self.fast_drop = false;
            }
        } else if input.down.is_pressed() && airborne && self.body.speed.y >= 0.0 {
            self.fast_drop = true;
            self.jump_timer = 0.0;
            if self.stomp_timer > 0.0 {
                self.bonus_timer += self.stomp_timer;
                self.stomp_timer = 0.0;
            }
        }

        if input.jump.is_pressed() {
            if self.stomp_timer > 0.0 {
                // Chain-stomp: the press extends the bounce
                self.stomp_timer += STOMP_EXTEND;
            } else if !airborne {
                self.jump_timer = JUMP_TIME + self.bonus_timer;
                self.bonus_timer = 0.0;
                self.ledge_timer = 0.0;
                self.fast_drop = false;
                sounds.play(SoundEffect::Jump);
            } else if self.can_double_jump {
                self.can_double_jump = false;
                self.jump_timer = DOUBLE_JUMP_TIME;
                sounds.play(SoundEffect::Jump);
            }
        } else if input.jump.is_released() {
            if self.stomp_timer > 0.0 {
                self.bonus_timer += self.stomp_timer;
                self.stomp_timer = 0.0;
            }
            // Variable jump height
            self.jump_timer = 0.0;
        }
    }

    fn update_timers(&mut self) {
        if self.ledge_timer > 0.0 {
            self.ledge_timer -= 1.0;
        }

        if self.stomp_timer > 0.0 {
            self.stomp_timer -= 1.0;
            self.body.speed.y = STOMP_SPEED;
        } else if self.jump_timer > 0.0 {
            self.jump_timer -= 1.0;
            self.body.speed.y = JUMP_SPEED;
        }

        if self.fast_drop {
            self.body.speed.y = FAST_DROP_SPEED;
        }
    }

    fn animate(&mut self) {
        const EPS: f32 = 0.01;

        let sx = self.body.speed.x.abs();
        if sx < EPS {
            self.body.spr.set_frame(0);
            self.dir = 0;
        } else {
            self.body.spr.animate(1, 4, 10.0 - sx * 4.0);
        }
    }

    fn update_dust(&mut self, dust: &mut Pool<Dust>) {
        const DUST_SIZE: f32 = 6.0;
        const DUST_FADE: f32 = 1.0 / 30.0;

        if !self.grounded() || self.body.speed.x.abs() < 0.1 {
            return;
        }
        self.dust_timer -= 1.0;
        if self.dust_timer <= 0.0 {
            self.dust_timer += DUST_INTERVAL;
            dust.acquire()
                .spawn(self.body.pos.x, self.body.pos.y + 6.0, DUST_SIZE, DUST_FADE);
        }
    }

    pub fn update(
        &mut self,
        input: &InputSnapshot,
        move_speed: f32,
        dust: &mut Pool<Dust>,
        sounds: &mut SoundQueue,
    ) {
        if !self.body.exists {
            return;
        }

        if self.body.dying {
            self.body.integrate(move_speed);
            // Death completes once fully below the screen
            if self.body.pos.y - 8.0 > SCREEN_HEIGHT {
                self.body.exists = false;
                log::info!("player removed, run over");
            }
            return;
        }

        self.control(input, sounds);
        self.update_timers();
        self.animate();
        self.update_dust(dust);

        self.body.integrate(move_speed);
        self.body.pos.x = neg_mod(self.body.pos.x, SCREEN_WIDTH);

        // Scrolled out at the bottom: the run is over
        if self.body.pos.y - 8.0 > SCREEN_HEIGHT {
            self.body.exists = false;
            sounds.play(SoundEffect::Die);
            log::info!("player scrolled out, run over");
        }
    }

    /// One-way floor check against a tile surface; landing refreshes the
    /// ledge window and the double jump
    pub fn floor_collision(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        move_speed: f32,
        sounds: &mut SoundQueue,
    ) -> bool {
        if !collision::floor_collision(&mut self.body, x, y, width, move_speed, 0.0, false) {
            return false;
        }
        if !self.grounded() {
            sounds.play(SoundEffect::Land);
        }
        self.ledge_timer = LEDGE_TIME;
        self.can_double_jump = true;
        self.fast_drop = false;
        self.bonus_timer = 0.0;
        true
    }

    /// Start the forced stomp bounce after landing on an enemy
    pub fn stomp_bounce(&mut self, sounds: &mut SoundQueue) {
        self.stomp_timer = STOMP_TIME + self.bonus_timer;
        self.bonus_timer = 0.0;
        self.body.speed.y = STOMP_SPEED;
        self.fast_drop = false;
        sounds.play(SoundEffect::Stomp);
    }

    /// Kill the player with a knockback away from `source_x`
    pub fn kill(&mut self, source_x: f32, sounds: &mut SoundQueue) {
        if self.body.dying {
            return;
        }
        self.body.dying = true;

        let knockback = ((self.body.pos.x - source_x) / 8.0).clamp(-2.0, 2.0);
        self.body.speed = Vec2::new(knockback, DEATH_POP_SPEED);
        self.body.target = Vec2::new(knockback, GRAVITY_TARGET);
        self.body.friction = Vec2::new(0.01, 0.15);

        self.jump_timer = 0.0;
        self.stomp_timer = 0.0;
        self.fast_drop = false;
        self.body.spr.set_frame(0);

        sounds.play(SoundEffect::Die);
    }

    /// Facing direction for the renderer (-1 left, 0 idle, 1 right)
    pub fn facing(&self) -> i32 {
        self.dir
    }
}
