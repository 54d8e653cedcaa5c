//! Logical input snapshot for a single tick
//!
//! The core never touches raw device events; the driver resolves keyboard
//! and gamepad state into per-action `ActionState` values once per tick.

/// Four-state action edge tracking
///
/// `Pressed` and `Released` last exactly one tick; the driver is expected
/// to decay them to `Down`/`Up` before the next snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Up,
    Down,
    Released,
    Pressed,
}

impl ActionState {
    /// Held this tick (covers the press edge too)
    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, ActionState::Down | ActionState::Pressed)
    }

    /// Went down this tick
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ActionState::Pressed
    }

    /// Went up this tick
    #[inline]
    pub fn is_released(self) -> bool {
        self == ActionState::Released
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub left: ActionState,
    pub right: ActionState,
    pub jump: ActionState,
    pub down: ActionState,
    pub start: ActionState,
}

impl InputSnapshot {
    /// Advance press/release edges to their held states, as the driver
    /// does between ticks when no new device events arrived.
    pub fn settle(&mut self) {
        for action in [
            &mut self.left,
            &mut self.right,
            &mut self.jump,
            &mut self.down,
            &mut self.start,
        ] {
            *action = match *action {
                ActionState::Pressed => ActionState::Down,
                ActionState::Released => ActionState::Up,
                other => other,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_state_predicates() {
        assert!(ActionState::Pressed.is_down());
        assert!(ActionState::Down.is_down());
        assert!(!ActionState::Released.is_down());
        assert!(ActionState::Pressed.is_pressed());
        assert!(!ActionState::Down.is_pressed());
        assert!(ActionState::Released.is_released());
    }

    #[test]
    fn test_settle_decays_edges() {
        let mut input = InputSnapshot {
            jump: ActionState::Pressed,
            down: ActionState::Released,
            ..Default::default()
        };
        input.settle();
        assert_eq!(input.jump, ActionState::Down);
        assert_eq!(input.down, ActionState::Up);
        input.settle();
        assert_eq!(input.jump, ActionState::Down);
    }
}
