//! Viewport tracking
//!
//! Remembers where the host's viewport is, what the last scroll delta and
//! touch location were, and decides when the tracked set of springs is stale
//! enough to rebuild.

use springy_core::{Point, Rect};

use crate::config::SpringyConfig;

/// Scroll input shared with the displacement policy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Content offset at the last reconciliation
    pub last_content_offset: Point,
    /// Vertical delta of the most recent bounds change
    pub last_scroll_delta: f32,
    /// Most recent pointer location reported with a bounds change
    pub last_touch_location: Point,
}

/// Tracks the host viewport and gates reconciliation
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    /// Host bounds; the origin is the content offset. `None` until attached.
    bounds: Option<Rect>,
    state: ScrollState,
    scroll_padding: f32,
    refresh_threshold: f32,
}

impl ViewportTracker {
    pub fn new(scroll_padding: f32, refresh_threshold: f32) -> Self {
        Self {
            bounds: None,
            state: ScrollState::default(),
            scroll_padding,
            refresh_threshold,
        }
    }

    pub fn from_config(config: &SpringyConfig) -> Self {
        Self::new(config.scroll_padding, config.refresh_threshold)
    }

    /// Start tracking a host viewport
    pub fn attach(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Forget the host viewport
    pub fn detach(&mut self) {
        self.bounds = None;
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_attached(&self) -> bool {
        self.bounds.is_some()
    }

    /// Current content offset, zero while detached
    pub fn content_offset(&self) -> Point {
        self.bounds.map_or(Point::ZERO, |b| b.origin)
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Whether a scroll from `last` to `current` warrants rebuilding the
    /// tracked set.
    ///
    /// Movements below the refresh threshold are ignored while springs exist;
    /// with no springs yet there is nothing to preserve.
    pub fn should_reconcile(&self, current: f32, last: f32, has_active_springs: bool) -> bool {
        let below_threshold = (current - last).abs() < self.refresh_threshold;
        !(below_threshold && has_active_springs)
    }

    /// [`should_reconcile`](Self::should_reconcile) for the attached viewport.
    /// Always false while detached.
    pub fn needs_reconcile(&self, has_active_springs: bool) -> bool {
        match self.bounds {
            Some(bounds) => self.should_reconcile(
                bounds.origin.y,
                self.state.last_content_offset.y,
                has_active_springs,
            ),
            None => false,
        }
    }

    /// The viewport grown by the scroll padding above and below
    pub fn expanded_query_region(&self, viewport: Rect) -> Rect {
        viewport.outset_vertical(self.scroll_padding)
    }

    /// Expanded region of the attached viewport
    pub fn current_region(&self) -> Option<Rect> {
        self.bounds.map(|b| self.expanded_query_region(b))
    }

    /// Record a bounds change reported by the host and return the scroll delta.
    ///
    /// While detached nothing is recorded and `None` is returned.
    pub fn record_bounds_change(&mut self, new_bounds: Rect, touch: Point) -> Option<f32> {
        let old = self.bounds?;
        let delta = new_bounds.origin.y - old.origin.y;
        self.state.last_scroll_delta = delta;
        self.state.last_touch_location = touch;
        self.bounds = Some(new_bounds);
        Some(delta)
    }

    /// Remember the current offset as the reconciled one
    pub fn mark_reconciled(&mut self) {
        self.state.last_content_offset = self.content_offset();
    }
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::from_config(&SpringyConfig::default())
    }
}
