//! Weighted random selection
//!
//! Cumulative-weight draw with an optional linear interpolation between an
//! early-game and late-game table. The loop terminates on the last index
//! by construction, so a table that does not sum to 1.0 merely biases the
//! draw instead of faulting.

use rand::Rng;

/// Draw an index from a single weight table
pub fn weighted_draw<R: Rng>(rng: &mut R, weights: &[f32]) -> usize {
    weighted_draw_interpolate(rng, weights, weights, 1.0)
}

/// Draw an index from two weight tables blended by `t` in `[0, 1]`
pub fn weighted_draw_interpolate<R: Rng>(
    rng: &mut R,
    weights1: &[f32],
    weights2: &[f32],
    t: f32,
) -> usize {
    let len = weights1.len().min(weights2.len());
    debug_assert!(len > 0);

    let p = rng.random::<f32>();
    let mut cumulative = (1.0 - t) * weights1[0] + t * weights2[0];

    let mut i = 0;
    while i < len {
        if p < cumulative {
            break;
        }
        if i < len - 1 {
            cumulative += (1.0 - t) * weights1[i + 1] + t * weights2[i + 1];
        }
        i += 1;
    }
    i.min(len - 1)
}
