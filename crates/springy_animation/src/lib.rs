//! Springy Animation
//!
//! Per-item spring physics for the springy layout.
//!
//! # Features
//!
//! - **Attachment springs**: closed-form damped oscillators pulling an item back to its anchor
//! - **Settle snapping**: residual ringing is killed once an item is within the settle threshold
//! - **Displacement policy**: scroll deltas nudge items in proportion to their distance from the touch

pub mod displacement;
pub mod spring;

pub use displacement::DisplacementPolicy;
pub use spring::{AttachmentSpring, SpringConfig};
