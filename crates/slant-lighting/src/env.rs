//! World environment colors and change notifications.

use crossbeam_channel::{Receiver, Sender, unbounded};
use slant_color::Color;

pub const DEFAULT_SUNLIGHT: Color = Color::rgb(255, 255, 255);
pub const DEFAULT_SHADOWLIGHT: Color = Color::rgb(155, 155, 155);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvChange {
    Sunlight(Color),
    Shadowlight(Color),
}

/// Holds the sun and shadow colors and fans out changes to subscribers.
#[derive(Debug)]
pub struct WorldEnv {
    sunlight: Color,
    shadowlight: Color,
    subscribers: Vec<Sender<EnvChange>>,
}

impl WorldEnv {
    pub fn new() -> Self {
        Self::with_colors(DEFAULT_SUNLIGHT, DEFAULT_SHADOWLIGHT)
    }

    pub fn with_colors(sunlight: Color, shadowlight: Color) -> Self {
        Self { sunlight, shadowlight, subscribers: Vec::new() }
    }

    #[inline]
    pub fn sunlight(&self) -> Color {
        self.sunlight
    }

    #[inline]
    pub fn shadowlight(&self) -> Color {
        self.shadowlight
    }

    pub fn subscribe(&mut self) -> Receiver<EnvChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Number of live subscribers as of the last broadcast.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns false when the color was already current; nothing is sent then.
    pub fn set_sunlight(&mut self, col: Color) -> bool {
        if self.sunlight == col {
            return false;
        }
        self.sunlight = col;
        self.broadcast(EnvChange::Sunlight(col));
        true
    }

    pub fn set_shadowlight(&mut self, col: Color) -> bool {
        if self.shadowlight == col {
            return false;
        }
        self.shadowlight = col;
        self.broadcast(EnvChange::Shadowlight(col));
        true
    }

    /// Restores the default colors, notifying for each one that moves.
    pub fn reset_colors(&mut self) {
        self.set_sunlight(DEFAULT_SUNLIGHT);
        self.set_shadowlight(DEFAULT_SHADOWLIGHT);
    }

    fn broadcast(&mut self, ev: EnvChange) {
        // Dropped receivers unsubscribe themselves.
        self.subscribers.retain(|tx| tx.send(ev).is_ok());
    }
}

impl Default for WorldEnv {
    fn default() -> Self {
        Self::new()
    }
}
