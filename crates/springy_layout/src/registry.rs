//! Spring registry
//!
//! Owns one attachment spring per tracked item and keeps that set in step
//! with the items the provider reports for the expanded viewport.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use springy_animation::{AttachmentSpring, DisplacementPolicy, SpringConfig};
use springy_core::{ItemIndex, LayoutAttributes, Rect, Size};

use crate::viewport::ScrollState;

new_key_type! {
    /// Handle of a spring inside the registry
    pub struct SpringId;
}

/// A spring together with the item it animates
#[derive(Debug, Clone)]
pub struct TrackedSpring {
    index: ItemIndex,
    size: Size,
    spring: AttachmentSpring,
}

impl TrackedSpring {
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn spring(&self) -> &AttachmentSpring {
        &self.spring
    }

    /// Static attributes the spring is anchored to
    pub fn anchor_attributes(&self) -> LayoutAttributes {
        LayoutAttributes::new(self.index, self.spring.anchor(), self.size)
    }

    /// Attributes at the live simulated center
    pub fn live_attributes(&self) -> LayoutAttributes {
        LayoutAttributes::new(self.index, self.spring.center(), self.size)
    }

    pub fn live_frame(&self) -> Rect {
        Rect::from_center_size(self.spring.center(), self.size)
    }
}

/// Summary of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Springs created for newly visible items
    pub added: usize,
    /// Springs dropped for items that left the region
    pub removed: usize,
    /// Springs tracked after the pass
    pub active: usize,
}

/// Registry of active springs keyed by item index
#[derive(Debug, Default)]
pub struct SpringRegistry {
    springs: SlotMap<SpringId, TrackedSpring>,
    by_index: FxHashMap<ItemIndex, SpringId>,
}

impl SpringRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the tracked set match `visible`.
    ///
    /// Items missing from `visible` lose their spring, items in `visible`
    /// without one gain a fresh spring at their anchor.
    pub fn reconcile(
        &mut self,
        visible: &[LayoutAttributes],
        scroll: &ScrollState,
        policy: &DisplacementPolicy,
        config: &SpringConfig,
    ) -> Reconciliation {
        let wanted: FxHashSet<ItemIndex> = visible.iter().map(|attrs| attrs.index).collect();
        let stale: SmallVec<[ItemIndex; 16]> = self
            .by_index
            .keys()
            .filter(|index| !wanted.contains(*index))
            .copied()
            .collect();

        for index in &stale {
            self.remove(*index);
        }

        let mut added = 0;
        for attrs in visible {
            if !self.contains(attrs.index) {
                self.insert(*attrs, scroll, policy, config);
                added += 1;
            }
        }

        let result = Reconciliation {
            added,
            removed: stale.len(),
            active: self.len(),
        };
        tracing::debug!(
            "Reconciled springs: +{} -{} ({} active)",
            result.added,
            result.removed,
            result.active
        );
        result
    }

    /// Attach a spring to an item, or return the existing one.
    ///
    /// A spring created mid-scroll is displaced once right away so it moves
    /// with its already-displaced neighbours.
    pub fn insert(
        &mut self,
        attrs: LayoutAttributes,
        scroll: &ScrollState,
        policy: &DisplacementPolicy,
        config: &SpringConfig,
    ) -> SpringId {
        if let Some(&id) = self.by_index.get(&attrs.index) {
            return id;
        }

        let mut spring = AttachmentSpring::new(attrs.center, *config);
        if scroll.last_scroll_delta != 0.0 {
            policy.apply(
                &mut spring,
                scroll.last_scroll_delta,
                scroll.last_touch_location,
            );
        }

        let id = self.springs.insert(TrackedSpring {
            index: attrs.index,
            size: attrs.size,
            spring,
        });
        self.by_index.insert(attrs.index, id);
        id
    }

    /// Drop the spring attached to an item
    pub fn remove(&mut self, index: ItemIndex) -> Option<TrackedSpring> {
        let id = self.by_index.remove(&index)?;
        self.springs.remove(id)
    }

    pub fn contains(&self, index: ItemIndex) -> bool {
        self.by_index.contains_key(&index)
    }

    pub fn get(&self, index: ItemIndex) -> Option<&TrackedSpring> {
        self.by_index
            .get(&index)
            .and_then(|&id| self.springs.get(id))
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Live attributes of a tracked item
    pub fn live_attributes(&self, index: ItemIndex) -> Option<LayoutAttributes> {
        self.get(index).map(TrackedSpring::live_attributes)
    }

    /// Live attributes of every tracked item whose live frame meets `rect`,
    /// sorted by index
    pub fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut found: Vec<LayoutAttributes> = self
            .springs
            .values()
            .filter(|tracked| tracked.live_frame().intersects(&rect))
            .map(TrackedSpring::live_attributes)
            .collect();
        found.sort_unstable_by_key(|attrs| attrs.index);
        found
    }

    /// Nudge every spring by the latest scroll delta
    pub fn displace_all(&mut self, scroll: &ScrollState, policy: &DisplacementPolicy) {
        if scroll.last_scroll_delta == 0.0 {
            return;
        }
        for tracked in self.springs.values_mut() {
            policy.apply(
                &mut tracked.spring,
                scroll.last_scroll_delta,
                scroll.last_touch_location,
            );
        }
    }

    /// Advance every spring by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        for tracked in self.springs.values_mut() {
            tracked.spring.update(dt);
        }
    }

    /// True when no tracked spring is still moving
    pub fn is_settled(&self) -> bool {
        self.springs.values().all(|tracked| tracked.spring.is_settled())
    }

    /// Largest distance of any live center from its anchor
    pub fn max_offset(&self) -> f32 {
        self.springs
            .values()
            .map(|tracked| tracked.spring.offset().length())
            .fold(0.0, f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedSpring> {
        self.springs.values()
    }

    pub fn clear(&mut self) {
        self.springs.clear();
        self.by_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springy_core::Point;

    fn item(index: usize, y: f32) -> LayoutAttributes {
        LayoutAttributes::new(ItemIndex(index), Point::new(22.0, y), Size::new(44.0, 44.0))
    }

    fn reconcile(registry: &mut SpringRegistry, visible: &[LayoutAttributes]) -> Reconciliation {
        registry.reconcile(
            visible,
            &ScrollState::default(),
            &DisplacementPolicy::default(),
            &SpringConfig::default(),
        )
    }

    #[test]
    fn test_reconcile_adds_and_removes() {
        let mut registry = SpringRegistry::new();
        let first = reconcile(&mut registry, &[item(0, 22.0), item(1, 76.0), item(2, 130.0)]);
        assert_eq!(
            first,
            Reconciliation {
                added: 3,
                removed: 0,
                active: 3
            }
        );

        let second = reconcile(&mut registry, &[item(1, 76.0), item(2, 130.0), item(3, 184.0)]);
        assert_eq!(second.added, 1);
        assert_eq!(second.removed, 1);
        assert_eq!(second.active, 3);
        assert!(!registry.contains(ItemIndex(0)));
        assert!(registry.contains(ItemIndex(3)));
    }

    #[test]
    fn test_reconcile_keeps_existing_springs() {
        let mut registry = SpringRegistry::new();
        reconcile(&mut registry, &[item(0, 22.0)]);

        let scroll = ScrollState {
            last_scroll_delta: 30.0,
            ..Default::default()
        };
        registry.displace_all(&scroll, &DisplacementPolicy::default());
        let displaced = registry.live_attributes(ItemIndex(0)).unwrap().center;

        reconcile(&mut registry, &[item(0, 22.0)]);
        assert_eq!(registry.live_attributes(ItemIndex(0)).unwrap().center, displaced);
    }

    #[test]
    fn test_duplicate_attributes_track_once() {
        let mut registry = SpringRegistry::new();
        let result = reconcile(&mut registry, &[item(4, 22.0), item(4, 22.0)]);
        assert_eq!(result.added, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_mid_scroll_applies_displacement() {
        let mut registry = SpringRegistry::new();
        let scroll = ScrollState {
            last_content_offset: Point::ZERO,
            last_scroll_delta: 100.0,
            last_touch_location: Point::new(22.0, 0.0),
        };
        let policy = DisplacementPolicy::default();
        registry.insert(item(9, 400.0), &scroll, &policy, &SpringConfig::default());

        let live = registry.live_attributes(ItemIndex(9)).unwrap();
        assert!((live.center.y - (400.0 + 100.0 * 400.0 / 1500.0)).abs() < 1e-3);
        assert_eq!(live.center.x, 22.0);
    }

    #[test]
    fn test_attributes_in_rect_uses_live_frames() {
        let mut registry = SpringRegistry::new();
        reconcile(&mut registry, &[item(0, 22.0), item(1, 500.0)]);

        // Item 1 sits far from the touch, so it is pushed down into the query rect
        let scroll = ScrollState {
            last_scroll_delta: 100.0,
            ..Default::default()
        };
        registry.displace_all(&scroll, &DisplacementPolicy::default());

        let query = Rect::new(0.0, 540.0, 320.0, 100.0);
        let hits = registry.attributes_in_rect(query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, ItemIndex(1));
        assert!(hits[0].center.y > 500.0);
    }

    #[test]
    fn test_step_settles_everything() {
        let mut registry = SpringRegistry::new();
        reconcile(&mut registry, &[item(0, 300.0), item(1, 900.0)]);
        let scroll = ScrollState {
            last_scroll_delta: 80.0,
            ..Default::default()
        };
        registry.displace_all(&scroll, &DisplacementPolicy::default());
        assert!(registry.max_offset() > 1.0);

        for _ in 0..600 {
            registry.step(1.0 / 60.0);
        }
        assert!(registry.is_settled());
        assert!(registry.max_offset() <= 1.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = SpringRegistry::new();
        reconcile(&mut registry, &[item(0, 22.0), item(1, 76.0)]);
        assert!(registry.remove(ItemIndex(0)).is_some());
        assert!(registry.remove(ItemIndex(0)).is_none());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get(ItemIndex(1)).is_none());
    }
}
