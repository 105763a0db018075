//! Springy flow layout
//!
//! Wraps a static [`AttributeProvider`] and attaches a damped spring to every
//! item near the viewport. Scrolling nudges the springs so nearby items lag
//! the finger and distant ones swing a little further before settling back.
//!
//! # Example
//!
//! ```
//! use springy_core::{ItemIndex, Point, Rect};
//! use springy_layout::{FlowConfig, FlowLayout, SpringyConfig, SpringyFlowLayout};
//!
//! let grid = FlowLayout::new(FlowConfig::default()).unwrap();
//! let mut layout = SpringyFlowLayout::new(grid, SpringyConfig::default()).unwrap();
//!
//! layout.attach(Rect::new(0.0, 0.0, 320.0, 800.0));
//! layout.prepare();
//!
//! layout.on_bounds_changed(Rect::new(0.0, 40.0, 320.0, 800.0), Point::new(22.0, 40.0));
//! while layout.tick(1.0 / 60.0) {}
//!
//! let attrs = layout.layout_attributes_for_item(ItemIndex(7)).unwrap();
//! assert!((attrs.center.y - 76.0).abs() <= 1.0);
//! ```

use springy_core::{AttributeProvider, ItemIndex, LayoutAttributes, Point, Rect, Size};

use crate::config::SpringyConfig;
use crate::error::Result;
use crate::registry::{Reconciliation, SpringRegistry};
use crate::viewport::{ScrollState, ViewportTracker};

/// Spring-animated layout over a static provider
#[derive(Debug)]
pub struct SpringyFlowLayout<P> {
    provider: P,
    config: SpringyConfig,
    tracker: ViewportTracker,
    registry: SpringRegistry,
}

impl<P: AttributeProvider> SpringyFlowLayout<P> {
    /// Create a layout, rejecting unusable tuning
    pub fn new(provider: P, config: SpringyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(provider, config))
    }

    /// Create a layout with default tuning
    pub fn with_provider(provider: P) -> Self {
        Self::from_parts(provider, SpringyConfig::default())
    }

    fn from_parts(provider: P, config: SpringyConfig) -> Self {
        Self {
            provider,
            tracker: ViewportTracker::from_config(&config),
            config,
            registry: SpringRegistry::new(),
        }
    }

    /// Attach to a host viewport. `bounds.origin` is the content offset.
    pub fn attach(&mut self, bounds: Rect) {
        tracing::debug!(
            "Attached to viewport {}x{} at offset {}",
            bounds.width(),
            bounds.height(),
            bounds.y()
        );
        self.tracker.attach(bounds);
    }

    /// Detach from the host. Tracked springs are kept until the next
    /// reconciliation after a new attach.
    pub fn detach(&mut self) {
        self.tracker.detach();
    }

    /// Prepare a layout pass.
    ///
    /// Rebuilds the tracked set from the expanded viewport when the content
    /// offset has moved far enough since the last rebuild, or when nothing is
    /// tracked yet. Returns the rebuild summary, or `None` when skipped.
    pub fn prepare(&mut self) -> Option<Reconciliation> {
        let Some(bounds) = self.tracker.bounds() else {
            tracing::trace!("Prepare skipped: no viewport attached");
            return None;
        };
        self.provider.prepare(bounds.size);

        if !self.tracker.needs_reconcile(!self.registry.is_empty()) {
            return None;
        }

        let region = self.tracker.expanded_query_region(bounds);
        let visible = self.provider.attributes_in_rect(region);
        self.tracker.mark_reconciled();
        Some(self.registry.reconcile(
            &visible,
            self.tracker.state(),
            &self.config.displacement,
            &self.config.spring,
        ))
    }

    /// Live attributes of tracked items overlapping `rect` grown by the
    /// scroll padding, sorted by index
    pub fn layout_attributes_for_elements(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let region = self.tracker.expanded_query_region(rect);
        self.registry.attributes_in_rect(region)
    }

    /// Live attributes of a tracked item, otherwise the provider's static
    /// placement
    pub fn layout_attributes_for_item(&self, index: ItemIndex) -> Option<LayoutAttributes> {
        self.registry
            .live_attributes(index)
            .or_else(|| self.provider.attributes_for_item(index))
    }

    /// Host bounds changed: record the scroll, displace every spring and
    /// simulate one frame.
    ///
    /// Ignored while detached. Always returns `false`; the host keeps its
    /// cached layout and picks up live positions through the attribute queries.
    pub fn on_bounds_changed(&mut self, new_bounds: Rect, touch: Point) -> bool {
        let Some(delta) = self.tracker.record_bounds_change(new_bounds, touch) else {
            tracing::trace!("Bounds change ignored: no viewport attached");
            return false;
        };
        if delta != 0.0 {
            tracing::trace!(
                "Scroll delta {:.1} at ({:.0}, {:.0}), {} springs",
                delta,
                touch.x,
                touch.y,
                self.registry.len()
            );
        }
        self.registry
            .displace_all(self.tracker.state(), &self.config.displacement);
        self.registry.step(self.config.frame_interval);
        false
    }

    /// Advance every spring by `dt` seconds without new scroll input.
    /// Returns whether any spring is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.registry.step(dt);
        !self.registry.is_settled()
    }

    pub fn scroll_state(&self) -> &ScrollState {
        self.tracker.state()
    }

    pub fn active_spring_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &SpringRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &SpringyConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.tracker.bounds()
    }

    /// Content size reported by the provider
    pub fn content_size(&self) -> Size {
        self.provider.content_size()
    }
}
