//! Stage orchestrator
//!
//! Owns the player, the four recycling platform rows and every pooled
//! entity. The driver calls `tick` at the fixed simulation rate and
//! `interpolate` once per rendered frame; nothing in here draws or
//! touches devices.
//!
//! The four rows are spaced so their conveyor closes exactly: row
//! spacing times row count equals screen height plus twice the recycle
//! offset, so a recycled row reappears precisely one spacing above the
//! topmost one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundQueue;
use crate::consts::{
    DIFFICULTY_RAMP_TICKS, PLATFORM_COUNT, PLATFORM_SPACING, PLATFORM_WIDTH, SCREEN_HEIGHT,
    SCREEN_WIDTH, TILE_WIDTH,
};
use crate::input::InputSnapshot;

use super::coin::Coin;
use super::enemy::{Enemy, EnemyKind};
use super::particle::{Dust, Particle};
use super::platform::Platform;
use super::player::Player;
use super::pool::Pool;
use super::state::GameState;
use super::weights::{weighted_draw, weighted_draw_interpolate};

const CLOUD_SPEED: f32 = 0.25;
const CLOUD_LOOP: f32 = 96.0;

/// Coin count per recycled row, indices 0..=3
const COIN_COUNT_WEIGHTS: [f32; 4] = [0.40, 0.35, 0.20, 0.05];

/// Enemy draw per recycled row: none, patrol, jumper, flyer, bullet.
/// Blended toward the late table over the difficulty ramp.
const ENEMY_WEIGHTS_EARLY: [f32; 5] = [0.55, 0.45, 0.0, 0.0, 0.0];
const ENEMY_WEIGHTS_LATE: [f32; 5] = [0.15, 0.25, 0.20, 0.20, 0.20];

/// Patrol needs more room than this many tiles to be worth walking
const MIN_PATROL_TILES: usize = 2;

pub struct Stage {
    player: Player,
    platforms: Vec<Platform>,
    coins: Pool<Coin>,
    enemies: Pool<Enemy>,
    particles: Pool<Particle>,
    dust: Pool<Dust>,
    rng: Pcg32,
    game_timer: f32,
    cloud_pos: f32,
}

impl Stage {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = Self::initial_platforms(&mut rng);

        Self {
            player: Self::initial_player(),
            platforms,
            coins: Pool::new(),
            enemies: Pool::new(),
            particles: Pool::new(),
            dust: Pool::new(),
            rng,
            game_timer: 0.0,
            cloud_pos: 0.0,
        }
    }

    fn initial_player() -> Player {
        Player::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PLATFORM_SPACING / 2.0 - 8.0)
    }

    /// Bottom row is the safe full-solid spawn row, the middle rows are
    /// random, the one still above the camera starts empty.
    fn initial_platforms(rng: &mut Pcg32) -> Vec<Platform> {
        let bottom = SCREEN_HEIGHT - PLATFORM_SPACING / 2.0;
        (0..PLATFORM_COUNT)
            .map(|i| {
                let y = bottom - i as f32 * PLATFORM_SPACING;
                match i {
                    0 => Platform::new_initial(y),
                    _ if y < 0.0 => Platform::new_empty(y),
                    _ => Platform::new_random(y, rng),
                }
            })
            .collect()
    }

    /// Advance the whole simulation by one fixed tick.
    ///
    /// Returns true once the player has stopped existing.
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        move_speed: f32,
        state: &mut GameState,
        sounds: &mut SoundQueue,
    ) -> bool {
        self.game_timer += 1.0;
        self.cloud_pos = (self.cloud_pos + CLOUD_SPEED) % CLOUD_LOOP;

        self.player
            .update(input, move_speed, &mut self.dust, sounds);

        for particle in self.particles.iter_mut() {
            particle.update(move_speed);
        }
        for dust in self.dust.iter_mut() {
            dust.update(move_speed);
        }

        for coin in self.coins.iter_mut() {
            coin.update(&mut self.player, move_speed, state, sounds);
        }

        for enemy in self.enemies.iter_mut() {
            enemy.update(move_speed);
            enemy.player_collision(
                &mut self.player,
                move_speed,
                state,
                &mut self.particles,
                &mut self.rng,
                sounds,
            );
        }

        for platform in &mut self.platforms {
            platform.player_collision(&mut self.player, move_speed, state, sounds);
            platform.update_physics(move_speed, &mut self.rng);
        }
        // Spawn after the whole row pass so the walk above sees a
        // consistent set of positions
        for i in 0..self.platforms.len() {
            if self.platforms[i].recreated() {
                self.spawn_row(i);
            }
        }

        !self.player.body.exists
    }

    /// Populate a freshly recycled row with coins and at most one enemy
    fn spawn_row(&mut self, index: usize) {
        let tiles = *self.platforms[index].tiles();
        let spikes = *self.platforms[index].spikes();
        let y = self.platforms[index].pos();

        let mut reserved = [false; PLATFORM_WIDTH];
        let free = |col: usize, reserved: &[bool; PLATFORM_WIDTH]| {
            tiles[col].is_walkable() && !spikes[col] && !reserved[col]
        };

        let coin_count = weighted_draw(&mut self.rng, &COIN_COUNT_WEIGHTS);
        for _ in 0..coin_count {
            // A handful of attempts is plenty on a 9-tile row
            for _ in 0..8 {
                let col = self.rng.random_range(0..PLATFORM_WIDTH);
                if free(col, &reserved) {
                    reserved[col] = true;
                    self.coins
                        .acquire()
                        .spawn(col as f32 * TILE_WIDTH + TILE_WIDTH / 2.0, y - 12.0);
                    break;
                }
            }
        }

        let t = (self.game_timer / DIFFICULTY_RAMP_TICKS).min(1.0);
        let choice =
            weighted_draw_interpolate(&mut self.rng, &ENEMY_WEIGHTS_EARLY, &ENEMY_WEIGHTS_LATE, t);
        let mut kind = match choice {
            1 => EnemyKind::Patrol,
            2 => EnemyKind::Jumper,
            3 => EnemyKind::Flyer,
            4 => EnemyKind::Bullet,
            _ => return,
        };

        if kind == EnemyKind::Bullet {
            // Side and wind-up are chosen inside spawn; the row only
            // provides the travel height
            self.enemies
                .acquire()
                .spawn(0.0, y - 8.0, kind, 0.0, SCREEN_WIDTH, &mut self.rng);
            return;
        }

        // Ground kinds need a free column and its surrounding solid run
        for _ in 0..8 {
            let col = self.rng.random_range(0..PLATFORM_WIDTH);
            if !free(col, &reserved) {
                continue;
            }

            let mut run_start = col;
            while run_start > 0 && free(run_start - 1, &reserved) {
                run_start -= 1;
            }
            let mut run_end = col;
            while run_end + 1 < PLATFORM_WIDTH && free(run_end + 1, &reserved) {
                run_end += 1;
            }

            // Too little room to patrol
            if kind == EnemyKind::Patrol && run_end - run_start + 1 <= MIN_PATROL_TILES {
                kind = EnemyKind::Jumper;
            }

            let left = run_start as f32 * TILE_WIDTH + TILE_WIDTH / 2.0;
            let right = run_end as f32 * TILE_WIDTH + TILE_WIDTH / 2.0;
            let x = col as f32 * TILE_WIDTH + TILE_WIDTH / 2.0;
            self.enemies
                .acquire()
                .spawn(x, y - 8.0, kind, left, right, &mut self.rng);
            return;
        }
    }

    /// Refresh cosmetic render positions; never mutates gameplay state
    pub fn interpolate(&mut self, move_speed: f32, fraction: f32) {
        if self.player.body.exists {
            self.player.body.interpolate(move_speed, fraction);
        }
        for platform in &mut self.platforms {
            platform.interpolate(move_speed, fraction);
        }
        for coin in self.coins.iter_mut() {
            coin.interpolate(move_speed, fraction);
        }
        for enemy in self.enemies.iter_mut() {
            enemy.interpolate(move_speed, fraction);
        }
        for particle in self.particles.iter_mut() {
            particle.interpolate(move_speed, fraction);
        }
        for dust in self.dust.iter_mut() {
            dust.interpolate(move_speed, fraction);
        }
    }

    /// Start a fresh run, reusing the pools and the RNG stream
    pub fn reset(&mut self) {
        self.player = Self::initial_player();
        self.platforms = Self::initial_platforms(&mut self.rng);
        self.coins.clear();
        self.enemies.clear();
        self.particles.clear();
        self.dust.clear();
        self.game_timer = 0.0;
        self.cloud_pos = 0.0;
        log::info!("stage reset");
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| c.body.exists)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.body.exists)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.body.exists)
    }

    pub fn dust(&self) -> impl Iterator<Item = &Dust> {
        self.dust.iter()
    }

    pub fn cloud_pos(&self) -> f32 {
        self.cloud_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLATFORM_OFFSET;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::platform::Tile;

    fn state() -> GameState {
        GameState::new(&MemoryScoreStore::new())
    }

    #[test]
    fn test_initial_layout_has_safe_spawn_row() {
        let stage = Stage::new(1);
        assert_eq!(stage.platforms().len(), PLATFORM_COUNT);

        let bottom = &stage.platforms()[0];
        assert!(bottom.tiles().iter().all(|t| *t == Tile::Solid));
        assert!(bottom.spikes().iter().all(|s| !s));

        // Player feet rest on the bottom row's surface
        let feet = stage.player().body.pos.y + 8.0;
        assert_eq!(feet, bottom.pos());
    }

    #[test]
    fn test_platform_positions_stay_in_domain() {
        let mut stage = Stage::new(2);
        let mut state = state();
        let mut sounds = SoundQueue::new();
        let input = InputSnapshot::default();

        for _ in 0..2000 {
            stage.tick(&input, 1.0, &mut state, &mut sounds);
            for platform in stage.platforms() {
                assert!(platform.pos() > -PLATFORM_OFFSET);
                assert!(platform.pos() <= SCREEN_HEIGHT + PLATFORM_OFFSET);
            }
        }
    }

    #[test]
    fn test_recycling_eventually_spawns_entities() {
        let mut stage = Stage::new(3);
        let mut state = state();
        let mut sounds = SoundQueue::new();
        let input = InputSnapshot::default();

        // Enough recycles that at least one coin or enemy must appear
        for _ in 0..3000 {
            stage.tick(&input, 1.0, &mut state, &mut sounds);
        }
        assert!(stage.coins.len() + stage.enemies.len() > 0);
    }

    #[test]
    fn test_scroll_without_input_ends_the_run() {
        let mut stage = Stage::new(4);
        let mut state = state();
        let mut sounds = SoundQueue::new();
        let input = InputSnapshot::default();

        let mut over = false;
        for _ in 0..5000 {
            if stage.tick(&input, 2.0, &mut state, &mut sounds) {
                over = true;
                break;
            }
        }
        assert!(over);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut a = Stage::new(99);
        let mut b = Stage::new(99);
        let mut state_a = state();
        let mut state_b = state();
        let mut sounds = SoundQueue::new();
        let mut input = InputSnapshot::default();

        for i in 0..1200 {
            // A fixed scripted input pattern
            input.jump = if i % 40 == 0 {
                crate::input::ActionState::Pressed
            } else {
                crate::input::ActionState::Up
            };
            input.right = if i % 3 == 0 {
                crate::input::ActionState::Down
            } else {
                crate::input::ActionState::Up
            };

            a.tick(&input, 1.0, &mut state_a, &mut sounds);
            b.tick(&input, 1.0, &mut state_b, &mut sounds);
        }

        assert_eq!(a.player().body.pos, b.player().body.pos);
        assert_eq!(state_a.score(), state_b.score());
    }

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut stage = Stage::new(5);
        let mut state = state();
        let mut sounds = SoundQueue::new();
        let input = InputSnapshot::default();

        for _ in 0..600 {
            stage.tick(&input, 1.5, &mut state, &mut sounds);
        }
        stage.reset();

        assert!(stage.player().body.exists);
        assert_eq!(stage.coins().count(), 0);
        assert_eq!(stage.enemies().count(), 0);
        let bottom = &stage.platforms()[0];
        assert!(bottom.tiles().iter().all(|t| *t == Tile::Solid));
    }

    #[test]
    fn test_interpolate_does_not_change_gameplay_state() {
        let mut stage = Stage::new(6);
        let mut state = state();
        let mut sounds = SoundQueue::new();
        let input = InputSnapshot::default();

        for _ in 0..120 {
            stage.tick(&input, 1.0, &mut state, &mut sounds);
        }

        let pos = stage.player().body.pos;
        let rows: Vec<f32> = stage.platforms().iter().map(|p| p.pos()).collect();

        stage.interpolate(1.0, 0.5);

        assert_eq!(stage.player().body.pos, pos);
        let rows_after: Vec<f32> = stage.platforms().iter().map(|p| p.pos()).collect();
        assert_eq!(rows, rows_after);
    }
}
