//! Scroll displacement policy
//!
//! When the content scrolls by `delta`, every attached item is pushed along
//! the scroll axis by part of that delta, which makes it lag behind the
//! content on screen until its spring pulls it home. How much it lags depends
//! on the Manhattan distance between the finger and the item's anchor: items
//! under the finger track the content exactly, items far away trail it.
//!
//! The push is clamped so it never exceeds the delta and never points the
//! other way.

use serde::{Deserialize, Serialize};
use springy_core::Point;

use crate::spring::AttachmentSpring;

/// Converts scroll deltas into per-item positional nudges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplacementPolicy {
    /// Resistance gained per unit of distance between touch and anchor
    pub resistance_coefficient: f32,
}

impl DisplacementPolicy {
    pub const DEFAULT_RESISTANCE_COEFFICIENT: f32 = 1.0 / 1500.0;

    pub fn new(resistance_coefficient: f32) -> Self {
        Self {
            resistance_coefficient,
        }
    }

    /// Dimensionless resistance of an anchor to a touch location
    pub fn resistance(&self, touch: Point, anchor: Point) -> f32 {
        touch.manhattan_distance(anchor) * self.resistance_coefficient
    }

    /// Nudge applied to an item anchored at `anchor` for a scroll of `delta`
    pub fn displacement(&self, delta: f32, touch: Point, anchor: Point) -> f32 {
        let scaled = delta * self.resistance(touch, anchor);
        if delta < 0.0 {
            delta.max(scaled)
        } else {
            delta.min(scaled)
        }
    }

    /// Distance the item still travels with the content on screen
    pub fn follow(&self, delta: f32, touch: Point, anchor: Point) -> f32 {
        delta - self.displacement(delta, touch, anchor)
    }

    /// Push a spring's live center and return the applied nudge
    pub fn apply(&self, spring: &mut AttachmentSpring, delta: f32, touch: Point) -> f32 {
        let dy = self.displacement(delta, touch, spring.anchor());
        spring.nudge(dy);
        dy
    }
}

impl Default for DisplacementPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RESISTANCE_COEFFICIENT)
    }
}
