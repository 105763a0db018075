//! Scroll scenarios for headless runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of scripted host events and checks.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Run a layout pass without moving the viewport
    Prepare,
    /// Move the viewport by `dy` with the finger at a point relative to the
    /// viewport's top-left corner, then run a layout pass
    Scroll {
        dy: f32,
        #[serde(default)]
        touch_x: f32,
        #[serde(default)]
        touch_y: f32,
    },
    /// Advance the springs without scroll input
    Tick { frames: u32 },
    AssertActiveSprings {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// Tick until every spring has settled, failing after `max_frames`
    AssertSettled { max_frames: u32 },
    /// The item has a live position in the padded viewport
    AssertVisible { index: usize },
}

impl ScenarioStep {
    /// Name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Prepare => "prepare",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::AssertActiveSprings { .. } => "assert_active_springs",
            ScenarioStep::AssertSettled { .. } => "assert_settled",
            ScenarioStep::AssertVisible { .. } => "assert_visible",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_step() {
        let scenario = Scenario::from_json(
            r#"{
                "steps": [
                    { "type": "prepare" },
                    { "type": "scroll", "dy": 120.0, "touch_x": 160.0, "touch_y": 400.0 },
                    { "type": "tick", "frames": 10 },
                    { "type": "assert_active_springs", "min": 100 },
                    { "type": "assert_settled", "max_frames": 300 },
                    { "type": "assert_visible", "index": 42 }
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = scenario.steps.iter().map(ScenarioStep::name).collect();
        assert_eq!(
            names,
            [
                "prepare",
                "scroll",
                "tick",
                "assert_active_springs",
                "assert_settled",
                "assert_visible"
            ]
        );
        assert!(matches!(
            scenario.steps[3],
            ScenarioStep::AssertActiveSprings {
                min: Some(100),
                max: None
            }
        ));
    }

    #[test]
    fn test_scroll_touch_defaults_to_origin() {
        let scenario = Scenario::from_json(r#"{ "steps": [{ "type": "scroll", "dy": -30 }] }"#)
            .unwrap();
        match scenario.steps[0] {
            ScenarioStep::Scroll {
                dy,
                touch_x,
                touch_y,
            } => {
                assert_eq!(dy, -30.0);
                assert_eq!((touch_x, touch_y), (0.0, 0.0));
            }
            ref other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(Scenario::from_json(r#"{ "steps": [{ "type": "fling" }] }"#).is_err());
    }
}
