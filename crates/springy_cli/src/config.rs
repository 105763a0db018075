//! Demo configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use springy_core::Rect;
use springy_layout::{FlowConfig, FlowLayout, SpringyConfig, SpringyFlowLayout};
use std::fs;
use std::path::Path;

/// Top-level demo configuration (springy.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub layout: SpringyConfig,
}

/// Simulated host viewport
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Content offset the run starts at
    #[serde(default)]
    pub initial_offset: f32,
}

fn default_width() -> f32 {
    320.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            initial_offset: 0.0,
        }
    }
}

impl ViewportConfig {
    /// Viewport bounds at a content offset
    pub fn bounds_at(&self, offset_y: f32) -> Rect {
        Rect::new(0.0, offset_y, self.width, self.height)
    }
}

impl DemoConfig {
    /// Load configuration from a file, or from `springy.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("springy.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `springy init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Build the grid and springy layout, attached at the initial offset
    pub fn build_layout(&self) -> Result<SpringyFlowLayout<FlowLayout>> {
        let grid = FlowLayout::with_width(self.flow, self.viewport.width)
            .context("Invalid [flow] configuration")?;
        let mut layout =
            SpringyFlowLayout::new(grid, self.layout).context("Invalid [layout] configuration")?;
        layout.attach(self.viewport.bounds_at(self.viewport.initial_offset));
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = DemoConfig::from_toml("").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.flow.item_count, 1000);
    }

    #[test]
    fn test_default_config_survives_toml() {
        let config = DemoConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[viewport]"));
        assert!(text.contains("[layout.spring]"));
        assert_eq!(DemoConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_sections() {
        let config = DemoConfig::from_toml(
            r#"
            [viewport]
            width = 640.0

            [layout]
            refresh_threshold = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.layout.refresh_threshold, 20.0);
        assert_eq!(config.layout.scroll_padding, 300.0);
    }

    #[test]
    fn test_build_layout_rejects_invalid_tuning() {
        let config = DemoConfig::from_toml(
            r#"
            [layout.spring]
            damping = 0.0
            "#,
        )
        .unwrap();
        let err = config.build_layout().unwrap_err();
        assert!(format!("{err:#}").contains("damping"));
    }

    #[test]
    fn test_missing_file_suggests_init() {
        let err = DemoConfig::load_from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("springy init"));
    }
}
