//! Named sound-effect events
//!
//! The simulation only names an event; synthesis and playback are external.
//! Events queue up during a tick and the driver drains them afterwards.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped or double-jumped
    Jump,
    /// Player landed after being airborne
    Land,
    /// Player bounced off a stomped enemy
    Stomp,
    /// Coin collected
    Coin,
    /// Player died
    Die,
    /// Enemy killed
    EnemyKill,
}

/// Fire-and-forget event queue filled by the simulation
#[derive(Debug, Default)]
pub struct SoundQueue {
    events: Vec<SoundEffect>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.events.push(effect);
    }

    /// Take all queued events, leaving the queue empty
    pub fn take(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, effect: SoundEffect) -> bool {
        self.events.contains(&effect)
    }
}
