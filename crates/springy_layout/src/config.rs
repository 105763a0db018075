//! Layout configuration

use serde::{Deserialize, Serialize};
use springy_animation::{DisplacementPolicy, SpringConfig};

use crate::error::{LayoutError, Result};

/// Tuning for the springy layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringyConfig {
    /// Prefetch margin added above and below the viewport
    pub scroll_padding: f32,
    /// Minimum scroll distance before the tracked set is rebuilt
    pub refresh_threshold: f32,
    /// Seconds simulated for each bounds change
    pub frame_interval: f32,
    /// Spring attached to every tracked item
    pub spring: SpringConfig,
    /// How scroll deltas displace items
    pub displacement: DisplacementPolicy,
}

impl SpringyConfig {
    pub const DEFAULT_SCROLL_PADDING: f32 = 300.0;
    pub const DEFAULT_REFRESH_THRESHOLD: f32 = 50.0;
    pub const DEFAULT_FRAME_INTERVAL: f32 = 1.0 / 60.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scroll_padding(mut self, padding: f32) -> Self {
        self.scroll_padding = padding;
        self
    }

    pub fn with_refresh_threshold(mut self, threshold: f32) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    pub fn with_frame_interval(mut self, seconds: f32) -> Self {
        self.frame_interval = seconds;
        self
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_resistance(mut self, coefficient: f32) -> Self {
        self.displacement = DisplacementPolicy::new(coefficient);
        self
    }

    /// Check every field for a usable value
    pub fn validate(&self) -> Result<()> {
        let spring = &self.spring;
        if !is_positive(spring.frequency) {
            return Err(LayoutError::InvalidFrequency(spring.frequency));
        }
        if !is_positive(spring.damping) {
            return Err(LayoutError::InvalidDamping(spring.damping));
        }
        if !is_non_negative(spring.settle_threshold) {
            return Err(LayoutError::InvalidSettleThreshold(spring.settle_threshold));
        }
        if !is_positive(spring.settled_damping) {
            return Err(LayoutError::InvalidSettledDamping(spring.settled_damping));
        }
        if !is_non_negative(self.scroll_padding) {
            return Err(LayoutError::InvalidPadding(self.scroll_padding));
        }
        if !is_non_negative(self.refresh_threshold) {
            return Err(LayoutError::InvalidRefreshThreshold(self.refresh_threshold));
        }
        if !is_non_negative(self.displacement.resistance_coefficient) {
            return Err(LayoutError::InvalidResistance(
                self.displacement.resistance_coefficient,
            ));
        }
        if !is_positive(self.frame_interval) {
            return Err(LayoutError::InvalidFrameInterval(self.frame_interval));
        }
        Ok(())
    }
}

/// Finite and above zero. NaN fails.
pub(crate) fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Finite and not below zero. NaN fails.
pub(crate) fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl Default for SpringyConfig {
    fn default() -> Self {
        Self {
            scroll_padding: Self::DEFAULT_SCROLL_PADDING,
            refresh_threshold: Self::DEFAULT_REFRESH_THRESHOLD,
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
            spring: SpringConfig::default(),
            displacement: DisplacementPolicy::default(),
        }
    }
}
