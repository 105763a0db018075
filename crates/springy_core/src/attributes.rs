//! Layout attributes and the provider contract
//!
//! The static placement algorithm is a black box to the engine. It hands out
//! [`LayoutAttributes`] (an item's anchor) through the [`AttributeProvider`]
//! trait, and the engine hands the same type back to the host with the live,
//! possibly displaced, center filled in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Index of an item in the scrolling collection
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemIndex(pub usize);

impl ItemIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position and size of a single item
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub index: ItemIndex,
    pub center: Point,
    pub size: Size,
}

impl LayoutAttributes {
    pub fn new(index: ItemIndex, center: Point, size: Size) -> Self {
        Self {
            index,
            center,
            size,
        }
    }

    /// Build attributes from an item frame
    pub fn from_frame(index: ItemIndex, frame: Rect) -> Self {
        Self {
            index,
            center: frame.center(),
            size: frame.size,
        }
    }

    /// Frame of the item around its center
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Copy of these attributes moved to a different center
    pub fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }
}

/// Source of static (anchor) layout attributes.
///
/// Implemented by the grid placement algorithm. Lookups never fail: an
/// unknown index yields `None` and a rect covering no items yields an empty
/// list.
pub trait AttributeProvider {
    /// Attributes of every item whose frame intersects `rect`, in index order
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes>;

    /// Attributes of a single item
    fn attributes_for_item(&self, index: ItemIndex) -> Option<LayoutAttributes>;

    /// Total size of the scrollable content
    fn content_size(&self) -> Size;

    /// Called before each layout pass with the current viewport size
    fn prepare(&mut self, _viewport: Size) {}
}

impl<P: AttributeProvider + ?Sized> AttributeProvider for Box<P> {
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        (**self).attributes_in_rect(rect)
    }

    fn attributes_for_item(&self, index: ItemIndex) -> Option<LayoutAttributes> {
        (**self).attributes_for_item(index)
    }

    fn content_size(&self) -> Size {
        (**self).content_size()
    }

    fn prepare(&mut self, viewport: Size) {
        (**self).prepare(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_round_trips_center() {
        let frame = Rect::new(54.0, 108.0, 44.0, 44.0);
        let attrs = LayoutAttributes::from_frame(ItemIndex(7), frame);
        assert_eq!(attrs.center, Point::new(76.0, 130.0));
        assert_eq!(attrs.frame(), frame);
    }

    #[test]
    fn test_with_center_keeps_identity() {
        let attrs =
            LayoutAttributes::new(ItemIndex(3), Point::new(22.0, 22.0), Size::new(44.0, 44.0));
        let moved = attrs.with_center(Point::new(22.0, 40.0));
        assert_eq!(moved.index, ItemIndex(3));
        assert_eq!(moved.size, attrs.size);
        assert_eq!(moved.frame().y(), 18.0);
    }

    #[test]
    fn test_item_index_serializes_transparently() {
        let json = serde_json::to_string(&ItemIndex(42)).unwrap();
        assert_eq!(json, "42");
    }
}
