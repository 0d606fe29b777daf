//! tilegrid - Tile grid partitioning for large bordered surfaces
//!
//! This library splits a logical surface into a grid of tiles no larger than
//! a maximum texture size, optionally overlapping by a border, and enumerates
//! the tiles touched by a rectangle or by the difference of two rectangles.
//!
//! # Example
//!
//! ```
//! use tilegrid::geometry::{Rect, Size};
//! use tilegrid::tiling::TilingData;
//!
//! let tiling = TilingData::new(Size::new(256, 256), Size::new(1000, 600), true);
//!
//! // Tiles that must be redrawn for a damaged region
//! for tile in tiling.iter(Rect::new(200, 100, 100, 50)) {
//!     let src = tiling.tile_bounds_with_border(tile.x, tile.y);
//!     assert!(!src.is_empty());
//! }
//!
//! // Tiles newly exposed when the viewport grows
//! let exposed = tiling
//!     .difference_iter(Rect::new(0, 0, 1000, 600), Rect::new(0, 0, 500, 600))
//!     .count();
//! assert!(exposed > 0);
//! ```

pub mod config;
pub mod geometry;
pub mod logging;
pub mod tiling;

/// Version of the tilegrid library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
