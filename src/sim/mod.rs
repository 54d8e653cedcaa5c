//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one unit step)
//! - Seeded RNG only, injected at construction
//! - No rendering, audio synthesis or platform dependencies
//!
//! Two call cadences: `Stage::tick` runs gameplay at a fixed rate, while
//! `Stage::interpolate` only refreshes cosmetic render positions and never
//! mutates gameplay state.

pub mod coin;
pub mod collision;
pub mod enemy;
pub mod motion;
pub mod particle;
pub mod platform;
pub mod player;
pub mod pool;
pub mod stage;
pub mod state;
pub mod weights;

pub use coin::Coin;
pub use collision::{floor_collision, overlap, overlap_box, span_overlaps};
pub use enemy::{Enemy, EnemyKind};
pub use motion::{Body, Sprite};
pub use particle::{Dust, Particle};
pub use platform::{Platform, Tile};
pub use player::Player;
pub use pool::{Pool, PoolEntity};
pub use stage::Stage;
pub use state::GameState;
pub use weights::{weighted_draw, weighted_draw_interpolate};
