//! Springy Core
//!
//! Foundational types shared by the springy layout engine:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in content coordinates
//! - **Layout attributes**: an item's index, center and size
//! - **Attribute provider**: the contract a static grid placement implements
//!
//! # Example
//!
//! ```rust
//! use springy_core::{ItemIndex, LayoutAttributes, Point, Rect, Size};
//!
//! let attrs = LayoutAttributes::new(ItemIndex(0), Point::new(22.0, 22.0), Size::new(44.0, 44.0));
//! assert!(attrs.frame().intersects(&Rect::new(0.0, 0.0, 320.0, 800.0)));
//! ```

pub mod attributes;
pub mod geometry;

pub use attributes::{AttributeProvider, ItemIndex, LayoutAttributes};
pub use geometry::{Point, Rect, Size, Vec2};
