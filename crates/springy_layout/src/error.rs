//! Layout error types

use thiserror::Error;

/// Configuration errors reported when a layout is built.
///
/// Once constructed, a layout never fails: lookups of unknown items fall back
/// or return nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Spring frequency must be positive and finite
    #[error("spring frequency must be positive and finite, got {0}")]
    InvalidFrequency(f32),

    /// Spring damping ratio must be positive
    #[error("spring damping must be positive, got {0}")]
    InvalidDamping(f32),

    /// Settle threshold must not be negative
    #[error("settle threshold must be non-negative, got {0}")]
    InvalidSettleThreshold(f32),

    /// Damping applied while settled must be positive
    #[error("settled damping must be positive, got {0}")]
    InvalidSettledDamping(f32),

    /// Scroll padding must not be negative
    #[error("scroll padding must be non-negative, got {0}")]
    InvalidPadding(f32),

    /// Refresh threshold must not be negative
    #[error("refresh threshold must be non-negative, got {0}")]
    InvalidRefreshThreshold(f32),

    /// Resistance coefficient must not be negative
    #[error("resistance coefficient must be non-negative, got {0}")]
    InvalidResistance(f32),

    /// Frame interval must be positive
    #[error("frame interval must be positive, got {0}")]
    InvalidFrameInterval(f32),

    /// Grid items need a positive size
    #[error("item size must be positive, got {width}x{height}")]
    InvalidItemSize { width: f32, height: f32 },

    /// Grid spacing must not be negative
    #[error("{axis} spacing must be non-negative, got {value}")]
    InvalidSpacing { axis: &'static str, value: f32 },
}

/// Result type for layout construction
pub type Result<T> = std::result::Result<T, LayoutError>;
