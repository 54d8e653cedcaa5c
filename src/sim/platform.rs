//! Procedurally generated platform rows
//!
//! A platform owns one row of tile states plus a spike mask, scrolls down
//! the screen and regenerates its content when it recycles back to the
//! top. It also owns the player interaction for its tiles, since only the
//! row knows its own layout.

use rand::Rng;

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{
    PLATFORM_OFFSET, PLATFORM_SCORE, PLATFORM_WIDTH, SCREEN_HEIGHT, TILE_WIDTH,
};

use super::collision::overlap_box;
use super::player::Player;
use super::state::GameState;

const BRIDGE_PROB: f64 = 0.5;
const SPIKE_PROB: f64 = 0.25;

/// Spike hitbox, deliberately thinner than a tile
const SPIKE_WIDTH: f32 = 12.0;
const SPIKE_HEIGHT: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Gap,
    Solid,
    Bridge,
}

impl Tile {
    /// Gap tiles are the only non-walkable state
    pub fn is_walkable(self) -> bool {
        self != Tile::Gap
    }
}

#[derive(Debug, Clone)]
pub struct Platform {
    tiles: [Tile; PLATFORM_WIDTH],
    spikes: [bool; PLATFORM_WIDTH],
    pos: f32,
    render_pos: f32,
    scored: bool,
    recreated: bool,
}

impl Platform {
    /// An all-gap row, used to prefill conveyor slots above the camera
    pub fn new_empty(start_pos: f32) -> Self {
        Self {
            tiles: [Tile::Gap; PLATFORM_WIDTH],
            spikes: [false; PLATFORM_WIDTH],
            pos: start_pos,
            render_pos: start_pos,
            scored: false,
            recreated: false,
        }
    }

    /// The deterministic full-width solid starting row; no spikes, so the
    /// spawn is always safe
    pub fn new_initial(start_pos: f32) -> Self {
        let mut platform = Self::new_empty(start_pos);
        platform.tiles = [Tile::Solid; PLATFORM_WIDTH];
        platform
    }

    pub fn new_random<R: Rng>(start_pos: f32, rng: &mut R) -> Self {
        let mut platform = Self::new_empty(start_pos);
        platform.generate(rng);
        platform
    }

    /// Regenerate tile and spike content in place
    fn generate<R: Rng>(&mut self, rng: &mut R) {
        let max = PLATFORM_WIDTH as f32 / 2.0;

        let mut counter = (rng.random::<f32>() * max) as i32;
        let mut mode: u8 = rng.random_range(0..2);
        let mut solid_count = 0u32;

        // Base row: alternate gap/solid runs, occasionally turning a new
        // solid run into a bridge
        for i in 0..PLATFORM_WIDTH {
            if mode == 1 {
                solid_count += 1;
            }

            self.tiles[i] = match mode {
                0 => Tile::Gap,
                1 => Tile::Solid,
                _ => Tile::Bridge,
            };
            self.spikes[i] = false;

            counter -= 1;
            if counter <= 0 {
                counter += (rng.random::<f32>() * max + 1.0) as i32;
                if mode == 1 {
                    mode = if rng.random_bool(BRIDGE_PROB) { 2 } else { 0 };
                    // A bridge reaching the far edge would dead-end there
                    if i as i32 + counter >= PLATFORM_WIDTH as i32 - 1 {
                        mode = 0;
                    }
                    continue;
                }
                mode = 1;
            }
        }

        // Spikes: stamp a random contiguous sub-range of solid tiles,
        // capped in proportion to the solid tile count
        let mut max_spikes = (rng.random::<f32>() * solid_count as f32 / 2.0) as i32;
        let startx = (rng.random::<f32>() * max) as usize;

        for i in startx..PLATFORM_WIDTH {
            if self.tiles[i] != Tile::Solid {
                continue;
            }
            if rng.random_bool(SPIKE_PROB) {
                self.spikes[i] = true;
                max_spikes -= 1;
                if max_spikes <= 0 {
                    break;
                }
            }
        }
    }

    /// Scroll by one tick, recycling past the bottom threshold.
    ///
    /// Returns true for exactly the one tick on which the row was
    /// regenerated; the orchestrator keys its spawn step off it.
    pub fn update_physics<R: Rng>(&mut self, move_speed: f32, rng: &mut R) -> bool {
        self.recreated = false;

        self.pos += move_speed;
        if self.pos > SCREEN_HEIGHT + PLATFORM_OFFSET {
            self.pos -= SCREEN_HEIGHT + PLATFORM_OFFSET * 2.0;
            self.generate(rng);
            self.scored = false;
            self.recreated = true;
            log::debug!("platform recycled to y={}", self.pos);
        }
        self.recreated
    }

    /// Refresh the cosmetic render position only
    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        self.render_pos = self.pos + move_speed * fraction;
    }

    /// Run this row's floor, spike and scoring checks against the player
    pub fn player_collision(
        &mut self,
        player: &mut Player,
        move_speed: f32,
        state: &mut GameState,
        sounds: &mut SoundQueue,
    ) {
        if !player.body.exists {
            return;
        }

        for i in 0..PLATFORM_WIDTH {
            if !self.tiles[i].is_walkable() {
                continue;
            }
            let x = i as f32 * TILE_WIDTH;
            player.floor_collision(x, self.pos, TILE_WIDTH, move_speed, sounds);

            if self.spikes[i] {
                let spike_x = x + TILE_WIDTH / 2.0;
                let spike_y = self.pos - SPIKE_HEIGHT / 2.0;
                if !player.body.dying
                    && overlap_box(&player.body, spike_x, spike_y, SPIKE_WIDTH, SPIKE_HEIGHT)
                {
                    player.kill(spike_x, sounds);
                }
            }
        }

        // Passing above an unscored row is how height scoring works:
        // no explicit distance counter anywhere.
        if !self.scored && !player.body.dying && player.body.pos.y < self.pos {
            self.scored = true;
            state.add_points(PLATFORM_SCORE);
        }
    }

    pub fn tiles(&self) -> &[Tile; PLATFORM_WIDTH] {
        &self.tiles
    }

    pub fn spikes(&self) -> &[bool; PLATFORM_WIDTH] {
        &self.spikes
    }

    pub fn pos(&self) -> f32 {
        self.pos
    }

    pub fn render_pos(&self) -> f32 {
        self.render_pos
    }

    pub fn recreated(&self) -> bool {
        self.recreated
    }

    #[cfg(test)]
    pub fn set_pos(&mut self, pos: f32) {
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_platform_is_safe() {
        let platform = Platform::new_initial(128.0);
        assert!(platform.tiles().iter().all(|&t| t == Tile::Solid));
        assert!(platform.spikes().iter().all(|&s| !s));
    }

    #[test]
    fn test_empty_platform_is_all_gap() {
        let platform = Platform::new_empty(0.0);
        assert!(platform.tiles().iter().all(|&t| t == Tile::Gap));
    }

    #[test]
    fn test_spikes_only_on_solid_tiles() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let platform = Platform::new_random(0.0, &mut rng);
            for i in 0..PLATFORM_WIDTH {
                if platform.spikes()[i] {
                    assert_eq!(platform.tiles()[i], Tile::Solid);
                }
            }
        }
    }

    #[test]
    fn test_bridge_never_reaches_far_edge() {
        // A bridge run that would extend into the last column is forced
        // to gap, so the far edge can never dead-end on a bridge.
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let platform = Platform::new_random(0.0, &mut rng);
            assert_ne!(platform.tiles()[PLATFORM_WIDTH - 1], Tile::Bridge);
        }
    }

    #[test]
    fn test_player_lands_and_row_scores() {
        let mut platform = Platform::new_initial(100.0);
        let mut player = Player::new(40.0, 90.0);
        player.body.speed.y = 2.0;
        let mut state = GameState::new(&MemoryScoreStore::new());
        let mut sounds = SoundQueue::new();

        platform.player_collision(&mut player, 0.0, &mut state, &mut sounds);

        assert_eq!(player.body.pos.y, 92.0);
        assert_eq!(player.body.speed.y, 0.0);
        // Risen above an unscored row: height points awarded once
        assert_eq!(state.score(), PLATFORM_SCORE);

        platform.player_collision(&mut player, 0.0, &mut state, &mut sounds);
        assert_eq!(state.score(), PLATFORM_SCORE);
    }

    #[test]
    fn test_spike_kills_with_knockback() {
        let mut platform = Platform::new_initial(100.0);
        platform.spikes[2] = true;

        // Standing just right of the spike at tile 2 (center x 40)
        let mut player = Player::new(44.0, 92.0);
        let mut state = GameState::new(&MemoryScoreStore::new());
        let mut sounds = SoundQueue::new();

        platform.player_collision(&mut player, 0.0, &mut state, &mut sounds);

        assert!(player.body.dying);
        assert!(player.body.speed.x > 0.0);
        assert!(sounds.contains(SoundEffect::Die));
        // A dying player earns no height points
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_recycle_shift_is_exact() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut platform = Platform::new_empty(0.0);
        platform.set_pos(SCREEN_HEIGHT + PLATFORM_OFFSET - 0.5);

        assert!(!platform.update_physics(1.0, &mut rng));
        let before = platform.pos();
        assert!(platform.update_physics(1.0, &mut rng));
        let expected = before + 1.0 - (SCREEN_HEIGHT + PLATFORM_OFFSET * 2.0);
        assert!((platform.pos() - expected).abs() < 1e-4);
        assert!(platform.recreated());

        // Flag holds for exactly one tick
        platform.update_physics(1.0, &mut rng);
        assert!(!platform.recreated());
    }

    proptest! {
        /// Position always stays inside the conveyor domain
        #[test]
        fn prop_position_domain_holds(seed in 0u64..1000, speed in 0.25f32..3.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut platform = Platform::new_random(-PLATFORM_OFFSET + 1.0, &mut rng);
            for _ in 0..2000 {
                platform.update_physics(speed, &mut rng);
                prop_assert!(platform.pos() > -PLATFORM_OFFSET);
                prop_assert!(platform.pos() <= SCREEN_HEIGHT + PLATFORM_OFFSET);
            }
        }
    }
}
