//! Vertical flow grid
//!
//! Static placement for fixed-size items laid out in rows. Full rows are
//! justified: the width left over after the items is spread evenly between
//! columns, so the first and last column touch the container edges.

use serde::{Deserialize, Serialize};
use springy_core::{AttributeProvider, ItemIndex, LayoutAttributes, Rect, Size};

use crate::config::{is_non_negative, is_positive};
use crate::error::{LayoutError, Result};

/// Grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub item_size: Size,
    /// Minimum horizontal gap between items in a row
    pub inter_item_spacing: f32,
    /// Vertical gap between rows
    pub line_spacing: f32,
    pub item_count: usize,
}

impl FlowConfig {
    pub fn validate(&self) -> Result<()> {
        if !(is_positive(self.item_size.width) && is_positive(self.item_size.height)) {
            return Err(LayoutError::InvalidItemSize {
                width: self.item_size.width,
                height: self.item_size.height,
            });
        }
        if !is_non_negative(self.inter_item_spacing) {
            return Err(LayoutError::InvalidSpacing {
                axis: "inter-item",
                value: self.inter_item_spacing,
            });
        }
        if !is_non_negative(self.line_spacing) {
            return Err(LayoutError::InvalidSpacing {
                axis: "line",
                value: self.line_spacing,
            });
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            item_size: Size::new(44.0, 44.0),
            inter_item_spacing: 10.0,
            line_spacing: 10.0,
            item_count: 1000,
        }
    }
}

/// Static grid placement implementing [`AttributeProvider`]
#[derive(Debug, Clone)]
pub struct FlowLayout {
    config: FlowConfig,
    container_width: f32,
    columns: usize,
    /// Distance between the left edges of neighbouring columns
    column_pitch: f32,
}

impl FlowLayout {
    pub fn new(config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let mut layout = Self {
            config,
            container_width: 0.0,
            columns: 1,
            column_pitch: 0.0,
        };
        layout.recompute_columns();
        Ok(layout)
    }

    /// Build a grid already sized for a container
    pub fn with_width(config: FlowConfig, width: f32) -> Result<Self> {
        let mut layout = Self::new(config)?;
        layout.set_container_width(width);
        Ok(layout)
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn set_container_width(&mut self, width: f32) {
        if width != self.container_width {
            self.container_width = width.max(0.0);
            self.recompute_columns();
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Distance between the tops of neighbouring rows
    pub fn row_pitch(&self) -> f32 {
        self.config.item_size.height + self.config.line_spacing
    }

    pub fn rows(&self) -> usize {
        self.config.item_count.div_ceil(self.columns)
    }

    /// Frame of an item, `None` past the end of the data
    pub fn frame_for(&self, index: ItemIndex) -> Option<Rect> {
        if index.get() >= self.config.item_count {
            return None;
        }
        let row = index.get() / self.columns;
        let column = index.get() % self.columns;
        Some(Rect::new(
            column as f32 * self.column_pitch,
            row as f32 * self.row_pitch(),
            self.config.item_size.width,
            self.config.item_size.height,
        ))
    }

    fn recompute_columns(&mut self) {
        let item_width = self.config.item_size.width;
        let spacing = self.config.inter_item_spacing;
        let fit = ((self.container_width + spacing) / (item_width + spacing)).floor();
        self.columns = (fit as usize).max(1);
        self.column_pitch = if self.columns > 1 {
            (self.container_width - item_width) / (self.columns - 1) as f32
        } else {
            0.0
        };
        tracing::trace!(
            "Flow grid: width={:.0} columns={} pitch={:.1}",
            self.container_width,
            self.columns,
            self.column_pitch
        );
    }
}

impl AttributeProvider for FlowLayout {
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let rows = self.rows();
        if rows == 0 || rect.size.is_empty() || rect.max_y() <= 0.0 {
            return Vec::new();
        }

        let pitch = self.row_pitch();
        let first_row = (rect.y().max(0.0) / pitch).floor() as usize;
        let last_row = ((rect.max_y() / pitch).floor() as usize).min(rows - 1);
        if first_row > last_row {
            return Vec::new();
        }

        let start = first_row * self.columns;
        let end = ((last_row + 1) * self.columns).min(self.config.item_count);
        (start..end)
            .filter_map(|i| {
                let index = ItemIndex(i);
                let frame = self.frame_for(index)?;
                frame
                    .intersects(&rect)
                    .then(|| LayoutAttributes::from_frame(index, frame))
            })
            .collect()
    }

    fn attributes_for_item(&self, index: ItemIndex) -> Option<LayoutAttributes> {
        self.frame_for(index)
            .map(|frame| LayoutAttributes::from_frame(index, frame))
    }

    fn content_size(&self) -> Size {
        let rows = self.rows();
        let height = if rows == 0 {
            0.0
        } else {
            rows as f32 * self.config.item_size.height
                + (rows - 1) as f32 * self.config.line_spacing
        };
        Size::new(self.container_width, height)
    }

    fn prepare(&mut self, viewport: Size) {
        self.set_container_width(viewport.width);
    }
}
