//! Pooled bonus coins

use glam::Vec2;

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::SCREEN_HEIGHT;

use super::collision;
use super::motion::Body;
use super::player::Player;
use super::pool::PoolEntity;
use super::state::GameState;

const ANIM_TIME: f32 = 4.0;

/// A floating coin that raises the score bonus when picked up
#[derive(Debug, Default)]
pub struct Coin {
    pub body: Body,
}

impl PoolEntity for Coin {
    fn exists(&self) -> bool {
        self.body.exists
    }
}

impl Coin {
    pub fn spawn(&mut self, x: f32, y: f32) {
        self.body.respawn(x, y);
        self.body.hitbox = Vec2::new(10.0, 10.0);
        self.body.scroll_bound = true;
    }

    pub fn update(
        &mut self,
        player: &mut Player,
        move_speed: f32,
        state: &mut GameState,
        sounds: &mut SoundQueue,
    ) {
        if !self.body.exists {
            return;
        }

        self.body.spr.animate(0, 3, ANIM_TIME);
        self.body.integrate(move_speed);

        // Scrolled off the bottom
        if self.body.pos.y - 8.0 > SCREEN_HEIGHT {
            self.body.exists = false;
            return;
        }

        if player.body.dying || !player.body.exists {
            return;
        }
        if collision::overlap(&self.body, &player.body) {
            self.body.exists = false;
            state.add_bonus(1);
            sounds.play(SoundEffect::Coin);
        }
    }

    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        if self.body.exists {
            self.body.interpolate(move_speed, fraction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;

    fn state() -> GameState {
        GameState::new(&MemoryScoreStore::new())
    }

    #[test]
    fn test_pickup_raises_bonus() {
        let mut coin = Coin::default();
        coin.spawn(40.0, 40.0);
        let mut player = Player::new(40.0, 40.0);
        let mut state = state();
        let mut sounds = SoundQueue::new();

        coin.update(&mut player, 0.0, &mut state, &mut sounds);

        assert!(!coin.exists());
        assert_eq!(state.bonus(), 1);
        assert!(sounds.contains(SoundEffect::Coin));
    }

    #[test]
    fn test_no_pickup_when_apart() {
        let mut coin = Coin::default();
        coin.spawn(40.0, 40.0);
        let mut player = Player::new(100.0, 40.0);
        let mut state = state();
        let mut sounds = SoundQueue::new();

        coin.update(&mut player, 0.0, &mut state, &mut sounds);

        assert!(coin.exists());
        assert_eq!(state.bonus(), 0);
    }

    #[test]
    fn test_dying_player_cannot_collect() {
        let mut coin = Coin::default();
        coin.spawn(40.0, 40.0);
        let mut player = Player::new(40.0, 40.0);
        player.body.dying = true;
        let mut state = state();
        let mut sounds = SoundQueue::new();

        coin.update(&mut player, 0.0, &mut state, &mut sounds);
        assert!(coin.exists());
    }

    #[test]
    fn test_scrolls_off_bottom() {
        let mut coin = Coin::default();
        coin.spawn(40.0, SCREEN_HEIGHT + 20.0);
        let mut player = Player::new(100.0, 40.0);
        let mut state = state();
        let mut sounds = SoundQueue::new();

        coin.update(&mut player, 0.5, &mut state, &mut sounds);
        assert!(!coin.exists());
    }
}
