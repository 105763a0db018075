//! Scenario runner driving a springy layout without a host.

use crate::config::DemoConfig;
use crate::report::{RunStats, ScenarioReport};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::Result;
use springy_core::{ItemIndex, Point};
use springy_layout::{FlowLayout, SpringyFlowLayout};

/// Layout plus the simulated host state around it
struct Session {
    config: DemoConfig,
    layout: SpringyFlowLayout<FlowLayout>,
    offset: f32,
    stats: RunStats,
}

impl Session {
    fn new(config: &DemoConfig) -> Result<Self> {
        Ok(Self {
            layout: config.build_layout()?,
            offset: config.viewport.initial_offset,
            config: config.clone(),
            stats: RunStats::default(),
        })
    }

    fn frame_interval(&self) -> f32 {
        self.config.layout.frame_interval
    }

    fn observe_frame(&mut self) {
        self.stats.elapsed_frames = self.stats.elapsed_frames.saturating_add(1);
        self.stats.max_offset = self.stats.max_offset.max(self.layout.registry().max_offset());
    }

    fn scroll(&mut self, dy: f32, touch_x: f32, touch_y: f32) {
        self.offset += dy;
        let bounds = self.config.viewport.bounds_at(self.offset);
        let touch = Point::new(touch_x, self.offset + touch_y);
        self.layout.on_bounds_changed(bounds, touch);
        self.observe_frame();
        self.layout.prepare();
    }

    /// Tick once; true while springs are still moving
    fn tick(&mut self) -> bool {
        let moving = self.layout.tick(self.frame_interval());
        self.observe_frame();
        moving
    }

    fn finish(mut self) -> RunStats {
        self.stats.active_springs = self.layout.active_spring_count();
        self.stats
    }

    fn failed(self, step: &ScenarioStep, step_index: usize, message: String) -> ScenarioReport {
        tracing::warn!("Step {} ({}) failed: {}", step_index, step.name(), message);
        ScenarioReport::failed(step.name(), step_index, message, self.finish())
    }
}

/// Run a scenario against a layout built from `config`.
///
/// Configuration problems are errors; failed assertions produce a failed
/// report.
pub fn run_scenario(config: &DemoConfig, scenario: &Scenario) -> Result<ScenarioReport> {
    let mut session = Session::new(config)?;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("Step {}: {:?}", step_index, step);
        match *step {
            ScenarioStep::Prepare => {
                if let Some(pass) = session.layout.prepare() {
                    tracing::debug!("Prepare reconciled {} springs", pass.active);
                }
            }
            ScenarioStep::Scroll {
                dy,
                touch_x,
                touch_y,
            } => session.scroll(dy, touch_x, touch_y),
            ScenarioStep::Tick { frames } => {
                for _ in 0..frames {
                    session.tick();
                }
            }
            ScenarioStep::AssertActiveSprings { min, max } => {
                let active = session.layout.active_spring_count();
                let too_few = min.is_some_and(|min| active < min);
                let too_many = max.is_some_and(|max| active > max);
                if too_few || too_many {
                    let message = format!(
                        "{active} active springs, expected {}..={}",
                        min.map_or_else(String::new, |v| v.to_string()),
                        max.map_or_else(String::new, |v| v.to_string()),
                    );
                    return Ok(session.failed(step, step_index, message));
                }
            }
            ScenarioStep::AssertSettled { max_frames } => {
                let mut settled = session.layout.registry().is_settled();
                let mut waited = 0;
                while waited < max_frames {
                    waited += 1;
                    if !session.tick() {
                        settled = true;
                        break;
                    }
                    settled = false;
                }
                if !settled {
                    let message = format!(
                        "springs still moving after {max_frames} frames (max offset {:.2})",
                        session.layout.registry().max_offset()
                    );
                    return Ok(session.failed(step, step_index, message));
                }
            }
            ScenarioStep::AssertVisible { index } => {
                let viewport = session.config.viewport.bounds_at(session.offset);
                let visible = session
                    .layout
                    .layout_attributes_for_elements(viewport)
                    .iter()
                    .any(|attrs| attrs.index == ItemIndex(index));
                if !visible {
                    let message = format!(
                        "{} has no live position near the viewport at offset {}",
                        ItemIndex(index),
                        session.offset
                    );
                    return Ok(session.failed(step, step_index, message));
                }
            }
        }
    }

    Ok(ScenarioReport::passed(session.finish()))
}
