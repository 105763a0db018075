//! Springy CLI
//!
//! Headless driver for the springy layout: loads a TOML demo configuration,
//! replays a JSON scroll scenario against it and reports what the springs
//! did.

pub mod config;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::{DemoConfig, ViewportConfig};
pub use report::{ReportStatus, RunStats, ScenarioReport};
pub use runner::run_scenario;
pub use scenario::{Scenario, ScenarioStep};
