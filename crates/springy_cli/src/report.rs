//! Report output for headless scenario runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Layout state observed over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Frames simulated, counting one per scroll
    pub elapsed_frames: u64,
    /// Springs tracked when the run ended
    pub active_springs: usize,
    /// Largest live offset of any item seen during the run
    pub max_offset: f32,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub stats: RunStats,
}

impl ScenarioReport {
    pub fn passed(stats: RunStats) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            stats,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        stats: RunStats,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            stats,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, payload)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_report_json_shape() {
        let stats = RunStats {
            elapsed_frames: 12,
            active_springs: 126,
            max_offset: 4.5,
        };
        let report = ScenarioReport::failed("assert_settled", 3, "still moving".into(), stats);

        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["status"], "failed");
        assert_eq!(value["failed_step_index"], 3);
        assert_eq!(value["assertion"], "assert_settled");
        assert_eq!(value["elapsed_frames"], 12);
        assert_eq!(value["active_springs"], 126);
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_passed_report_has_no_failure() {
        let report = ScenarioReport::passed(RunStats::default());
        assert!(!report.is_failed());
        let text = serde_json::to_string(&report).unwrap();
        assert!(text.contains(r#""status":"passed""#));
        assert!(text.contains(r#""failed_step_index":null"#));
    }
}
