//! Springy Layout
//!
//! A grid layout whose items hang off damped springs. The host reports
//! viewport bounds changes; the layout keeps a spring for every item within a
//! padded band around the viewport, displaces those springs as the content
//! scrolls and serves their live positions back to the host.
//!
//! # Modules
//!
//! - [`flow`]: static justified grid placement
//! - [`viewport`]: scroll state and reconciliation gating
//! - [`registry`]: one spring per tracked item
//! - [`springy`]: the host-facing layout tying the pieces together

pub mod config;
pub mod error;
pub mod flow;
pub mod registry;
pub mod springy;
pub mod viewport;

pub use config::SpringyConfig;
pub use error::{LayoutError, Result};
pub use flow::{FlowConfig, FlowLayout};
pub use registry::{Reconciliation, SpringId, SpringRegistry, TrackedSpring};
pub use springy::SpringyFlowLayout;
pub use viewport::{ScrollState, ViewportTracker};
