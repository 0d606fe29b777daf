//! Tile grid partitioning
//!
//! Splits a large logical surface into a grid of tiles no larger than a
//! maximum texture size. Adjacent tiles may overlap by a number of border
//! texels so that filtering near a tile edge can sample its neighbour's
//! pixels without crossing a texture boundary.
//!
//! Every tile has two rectangles:
//!
//! - **exclusive bounds** ([`TilingData::tile_bounds`]): the disjoint region
//!   the tile owns. Exclusive bounds of all tiles partition the surface.
//! - **bordered bounds** ([`TilingData::tile_bounds_with_border`]): the full
//!   rasterised footprint, extending `border_texels` into each neighbour.
//!
//! # Example
//!
//! ```
//! use tilegrid::geometry::{Rect, Size};
//! use tilegrid::tiling::TilingData;
//!
//! let data = TilingData::new(Size::new(512, 512), Size::new(1000, 1000), true);
//! assert_eq!(data.num_tiles_x(), 2);
//! assert_eq!(data.tile_bounds(1, 0), Rect::new(511, 0, 489, 511));
//! assert_eq!(data.tile_bounds_with_border(1, 0), Rect::new(510, 0, 490, 512));
//!
//! let visited: Vec<_> = data.iter(Rect::new(500, 0, 20, 1)).collect();
//! assert_eq!(visited.len(), 2);
//! ```

mod iter;


pub use iter::{DifferenceIter, IndexRange, TileIter};

use tracing::trace;

use crate::geometry::{Rect, Size, Vector2d};

/// Computes how many tiles are needed along one axis.
///
/// When the border consumes the whole tile (`max_texture_size <= 2 * border_texels`)
/// there is no room for interior content, so the surface fits in a single
/// tile if it is no larger than `max_texture_size` and cannot be tiled at all
/// otherwise.
pub fn compute_num_tiles(max_texture_size: i32, total_size: i32, border_texels: i32) -> i32 {
    let inner_tile_size = max_texture_size.saturating_sub(border_texels.saturating_mul(2));
    if inner_tile_size <= 0 {
        return if total_size > 0 && max_texture_size >= total_size {
            1
        } else {
            0
        };
    }

    if total_size <= 0 {
        return 0;
    }

    // inner_tile_size > 0 implies 2 * border_texels < max_texture_size, so
    // none of this can overflow.
    let num_tiles = 1 + (total_size - 1 - 2 * border_texels) / inner_tile_size;
    num_tiles.max(1)
}

/// Tiling configuration and derived tile grid.
///
/// Tile counts are recomputed by every setter and are never stale. Tiles are
/// addressed by `(i, j)` with `0 <= i < num_tiles_x()` and
/// `0 <= j < num_tiles_y()`; passing anything else to a per-tile accessor is
/// a programming error caught by debug assertions. Release builds saturate
/// instead of wrapping and clamp results to the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilingData {
    max_texture_size: Size,
    total_size: Size,
    border_texels: i32,
    num_tiles_x: i32,
    num_tiles_y: i32,
}

impl TilingData {
    /// Creates a tiling with either no border or a single border texel.
    pub fn new(max_texture_size: Size, total_size: Size, has_border_texels: bool) -> Self {
        Self::with_border_texels(
            max_texture_size,
            total_size,
            i32::from(has_border_texels),
        )
    }

    /// Creates a tiling with an explicit border texel count.
    pub fn with_border_texels(max_texture_size: Size, total_size: Size, border_texels: i32) -> Self {
        debug_assert!(border_texels >= 0, "negative border: {}", border_texels);
        let mut data = Self {
            max_texture_size,
            total_size,
            border_texels: border_texels.max(0),
            num_tiles_x: 0,
            num_tiles_y: 0,
        };
        data.recompute_num_tiles();
        data
    }

    #[inline]
    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn set_total_size(&mut self, total_size: Size) {
        self.total_size = total_size;
        self.recompute_num_tiles();
    }

    #[inline]
    pub fn max_texture_size(&self) -> Size {
        self.max_texture_size
    }

    pub fn set_max_texture_size(&mut self, max_texture_size: Size) {
        self.max_texture_size = max_texture_size;
        self.recompute_num_tiles();
    }

    #[inline]
    pub fn border_texels(&self) -> i32 {
        self.border_texels
    }

    #[inline]
    pub fn has_border_texels(&self) -> bool {
        self.border_texels != 0
    }

    /// Sets the border to exactly one texel (`true`) or none (`false`).
    pub fn set_has_border_texels(&mut self, has_border_texels: bool) {
        self.set_border_texels(i32::from(has_border_texels));
    }

    pub fn set_border_texels(&mut self, border_texels: i32) {
        debug_assert!(border_texels >= 0, "negative border: {}", border_texels);
        self.border_texels = border_texels.max(0);
        self.recompute_num_tiles();
    }

    #[inline]
    pub fn num_tiles_x(&self) -> i32 {
        self.num_tiles_x
    }

    #[inline]
    pub fn num_tiles_y(&self) -> i32 {
        self.num_tiles_y
    }

    /// Total number of tiles in the grid.
    #[inline]
    pub fn num_tiles(&self) -> i64 {
        i64::from(self.num_tiles_x) * i64::from(self.num_tiles_y)
    }

    /// True when either axis has no tiles, so nothing can be enumerated.
    #[inline]
    pub fn has_empty_bounds(&self) -> bool {
        self.num_tiles_x <= 0 || self.num_tiles_y <= 0
    }

    /// Largest bordered tile extent in the grid.
    pub fn largest_tile_size(&self) -> Size {
        if self.has_empty_bounds() {
            return Size::default();
        }
        Size::new(
            self.x_axis().largest_tile_size(),
            self.y_axis().largest_tile_size(),
        )
    }

    /// Column owning the non-border content at `src_position`.
    pub fn tile_x_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.x_axis().index_from_src_coord(src_position)
    }

    /// Row owning the non-border content at `src_position`.
    pub fn tile_y_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.y_axis().index_from_src_coord(src_position)
    }

    /// First column whose bordered footprint may contain `src_position`.
    pub fn first_border_tile_x_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.x_axis().first_border_index_from_src_coord(src_position)
    }

    /// First row whose bordered footprint may contain `src_position`.
    pub fn first_border_tile_y_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.y_axis().first_border_index_from_src_coord(src_position)
    }

    /// Last column whose bordered footprint may contain `src_position`.
    pub fn last_border_tile_x_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.x_axis().last_border_index_from_src_coord(src_position)
    }

    /// Last row whose bordered footprint may contain `src_position`.
    pub fn last_border_tile_y_index_from_src_coord(&self, src_position: i32) -> i32 {
        self.y_axis().last_border_index_from_src_coord(src_position)
    }

    /// Exclusive bounds of tile `(i, j)`.
    pub fn tile_bounds(&self, i: i32, j: i32) -> Rect {
        self.assert_tile(i, j);
        let (x, width) = self.x_axis().bounds(i);
        let (y, height) = self.y_axis().bounds(j);
        Rect::new(x, y, width, height)
    }

    /// Bordered bounds of tile `(i, j)`, clamped to the surface.
    pub fn tile_bounds_with_border(&self, i: i32, j: i32) -> Rect {
        self.assert_tile(i, j);
        let (x, width) = self.x_axis().bounds_with_border(i);
        let (y, height) = self.y_axis().bounds_with_border(j);
        Rect::new(x, y, width, height)
    }

    /// Left edge of the exclusive bounds of column `x_index`.
    pub fn tile_position_x(&self, x_index: i32) -> i32 {
        self.x_axis().position(x_index)
    }

    /// Top edge of the exclusive bounds of row `y_index`.
    pub fn tile_position_y(&self, y_index: i32) -> i32 {
        self.y_axis().position(y_index)
    }

    /// Width of the exclusive bounds of column `x_index`.
    pub fn tile_size_x(&self, x_index: i32) -> i32 {
        self.x_axis().size(x_index)
    }

    /// Height of the exclusive bounds of row `y_index`.
    pub fn tile_size_y(&self, y_index: i32) -> i32 {
        self.y_axis().size(y_index)
    }

    /// Offset from the bordered origin to the exclusive origin of a tile.
    pub fn texture_offset(&self, x_index: i32, y_index: i32) -> Vector2d {
        Vector2d::new(
            self.x_axis().texture_offset(x_index),
            self.y_axis().texture_offset(y_index),
        )
    }

    /// Grows `rect` to the union of the bordered bounds of every tile whose
    /// footprint intersects it.
    ///
    /// Returns an empty rectangle when `rect` misses the surface.
    pub fn expand_rect_to_tile_bounds_with_borders(&self, rect: Rect) -> Rect {
        let Some(rect) = self.clamp_to_surface(rect) else {
            return Rect::default();
        };

        let range = IndexRange::covering(self, &rect);
        let top_left = self.tile_bounds_with_border(range.left, range.top);
        let bottom_right = self.tile_bounds_with_border(range.right, range.bottom);
        top_left.union(&bottom_right)
    }

    /// Grows `rect` to the union of the exclusive bounds of the tiles owning
    /// its content.
    ///
    /// Returns an empty rectangle when `rect` misses the surface.
    pub fn expand_rect_to_tile_bounds(&self, rect: Rect) -> Rect {
        let Some(rect) = self.clamp_to_surface(rect) else {
            return Rect::default();
        };

        let left = self.tile_x_index_from_src_coord(rect.x());
        let top = self.tile_y_index_from_src_coord(rect.y());
        let right = self.tile_x_index_from_src_coord(rect.right() - 1);
        let bottom = self.tile_y_index_from_src_coord(rect.bottom() - 1);
        self.tile_bounds(left, top)
            .union(&self.tile_bounds(right, bottom))
    }

    /// Iterates the tiles whose bordered bounds intersect `rect`, row-major.
    pub fn iter(&self, rect: Rect) -> TileIter<'_> {
        TileIter::new(self, rect)
    }

    /// Iterates the tiles covering `consider` minus those in the tile range
    /// covering `ignore`.
    pub fn difference_iter(&self, consider: Rect, ignore: Rect) -> DifferenceIter<'_> {
        DifferenceIter::new(self, consider, ignore)
    }

    fn clamp_to_surface(&self, rect: Rect) -> Option<Rect> {
        if self.has_empty_bounds() {
            return None;
        }
        let rect = rect.intersection(&Rect::from_size(self.total_size));
        (!rect.is_empty()).then_some(rect)
    }

    fn recompute_num_tiles(&mut self) {
        self.num_tiles_x = compute_num_tiles(
            self.max_texture_size.width(),
            self.total_size.width(),
            self.border_texels,
        );
        self.num_tiles_y = compute_num_tiles(
            self.max_texture_size.height(),
            self.total_size.height(),
            self.border_texels,
        );

        trace!(
            total_size = %self.total_size,
            max_texture_size = %self.max_texture_size,
            border_texels = self.border_texels,
            num_tiles_x = self.num_tiles_x,
            num_tiles_y = self.num_tiles_y,
            "Recomputed tile grid"
        );
    }

    #[inline]
    fn assert_tile(&self, i: i32, j: i32) {
        debug_assert!(
            (0..self.num_tiles_x).contains(&i) && (0..self.num_tiles_y).contains(&j),
            "tile ({}, {}) outside {}x{} grid",
            i,
            j,
            self.num_tiles_x,
            self.num_tiles_y
        );
    }

    #[inline]
    fn x_axis(&self) -> AxisLayout {
        AxisLayout {
            max_texture_size: self.max_texture_size.width(),
            total_size: self.total_size.width(),
            border_texels: self.border_texels,
            num_tiles: self.num_tiles_x,
        }
    }

    #[inline]
    fn y_axis(&self) -> AxisLayout {
        AxisLayout {
            max_texture_size: self.max_texture_size.height(),
            total_size: self.total_size.height(),
            border_texels: self.border_texels,
            num_tiles: self.num_tiles_y,
        }
    }
}

/// One axis of the grid. All per-tile math is separable, so the public
/// accessors project onto an axis and delegate here.
#[derive(Debug, Clone, Copy)]
struct AxisLayout {
    max_texture_size: i32,
    total_size: i32,
    border_texels: i32,
    num_tiles: i32,
}

impl AxisLayout {
    /// Content extent of one tile once both borders are removed.
    #[inline]
    fn inner_tile_size(&self) -> i32 {
        self.max_texture_size
            .saturating_sub(self.border_texels.saturating_mul(2))
    }

    #[inline]
    fn is_last(&self, index: i32) -> bool {
        index.saturating_add(1) == self.num_tiles
    }

    #[inline]
    fn assert_index(&self, index: i32) {
        debug_assert!(
            (0..self.num_tiles).contains(&index),
            "tile index {} outside 0..{}",
            index,
            self.num_tiles
        );
    }

    #[inline]
    fn clamp_index(&self, index: i32) -> i32 {
        index.clamp(0, self.num_tiles - 1)
    }

    /// Divides an offset by the inner tile size. Only called with more than
    /// one tile, where `compute_num_tiles` guarantees a positive divisor.
    #[inline]
    fn divide_by_inner(&self, offset: i32) -> i32 {
        let inner_tile_size = self.inner_tile_size();
        debug_assert!(inner_tile_size > 0, "multiple tiles with no interior");
        offset / inner_tile_size.max(1)
    }

    fn index_from_src_coord(&self, src_position: i32) -> i32 {
        if self.num_tiles <= 1 {
            return 0;
        }
        let index = self.divide_by_inner(src_position.saturating_sub(self.border_texels));
        self.clamp_index(index)
    }

    fn first_border_index_from_src_coord(&self, src_position: i32) -> i32 {
        if self.num_tiles <= 1 {
            return 0;
        }
        let offset = src_position.saturating_sub(self.border_texels.saturating_mul(2));
        self.clamp_index(self.divide_by_inner(offset))
    }

    fn last_border_index_from_src_coord(&self, src_position: i32) -> i32 {
        if self.num_tiles <= 1 {
            return 0;
        }
        self.clamp_index(self.divide_by_inner(src_position))
    }

    fn position(&self, index: i32) -> i32 {
        self.assert_index(index);
        let position = self.inner_tile_size().saturating_mul(index);
        if index != 0 {
            position.saturating_add(self.border_texels)
        } else {
            position
        }
    }

    /// Origin and extent of the exclusive span of `index`.
    fn bounds(&self, index: i32) -> (i32, i32) {
        let lo = self.position(index);
        let mut hi = self
            .inner_tile_size()
            .saturating_mul(index.saturating_add(1))
            .saturating_add(self.border_texels);
        if self.is_last(index) {
            hi = hi.saturating_add(self.border_texels);
        }
        hi = hi.min(self.total_size);

        debug_assert!(lo >= 0 && lo <= self.total_size, "tile origin {} off surface", lo);
        debug_assert!(hi >= lo, "tile {} has negative extent", index);
        (lo, hi.saturating_sub(lo).max(0))
    }

    /// Origin and extent of the bordered span of `index`.
    fn bounds_with_border(&self, index: i32) -> (i32, i32) {
        self.assert_index(index);
        let inner_tile_size = self.inner_tile_size();
        let lo = inner_tile_size.saturating_mul(index).clamp(0, self.total_size);
        let hi = lo
            .saturating_add(inner_tile_size)
            .saturating_add(self.border_texels.saturating_mul(2))
            .min(self.total_size);
        (lo, hi.saturating_sub(lo).max(0))
    }

    fn size(&self, index: i32) -> i32 {
        self.assert_index(index);
        if index == 0 && self.num_tiles == 1 {
            self.total_size
        } else if index == 0 {
            self.max_texture_size - self.border_texels
        } else if index < self.num_tiles - 1 {
            self.max_texture_size - 2 * self.border_texels
        } else {
            self.total_size - self.position(index)
        }
    }

    fn texture_offset(&self, index: i32) -> i32 {
        if index == 0 || self.num_tiles == 1 {
            0
        } else {
            self.border_texels
        }
    }

    fn largest_tile_size(&self) -> i32 {
        if self.num_tiles > 1 {
            self.max_texture_size
        } else {
            self.total_size
        }
    }
}
