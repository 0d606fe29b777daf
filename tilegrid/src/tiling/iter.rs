//! Tile enumeration over rectangles and rectangle differences.
//!
//! Both iterators borrow the [`TilingData`] they were built from, so the
//! tiling cannot be resized while an enumeration is in progress.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::trace;

use super::TilingData;
use crate::geometry::{Rect, TileIndex};

/// Inclusive block of tile indices `[left, right] × [top, bottom]`.
///
/// A range with `left > right` or `top > bottom` contains nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexRange {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IndexRange {
    /// Tiles whose bordered bounds may touch `rect`.
    ///
    /// `rect` must already be clamped to the surface and non-empty for the
    /// result to be meaningful; the index functions clamp into the grid
    /// regardless.
    pub fn covering(tiling_data: &TilingData, rect: &Rect) -> Self {
        Self {
            left: tiling_data.first_border_tile_x_index_from_src_coord(rect.x()),
            top: tiling_data.first_border_tile_y_index_from_src_coord(rect.y()),
            right: tiling_data
                .last_border_tile_x_index_from_src_coord(rect.right().saturating_sub(1)),
            bottom: tiling_data
                .last_border_tile_y_index_from_src_coord(rect.bottom().saturating_sub(1)),
        }
    }

    /// Restricts this range to lie within `outer`. May produce an empty range.
    pub fn clamped_to(&self, outer: &IndexRange) -> Self {
        Self {
            left: self.left.max(outer.left),
            top: self.top.max(outer.top),
            right: self.right.min(outer.right),
            bottom: self.bottom.min(outer.bottom),
        }
    }

    #[inline]
    pub fn contains(&self, index: TileIndex) -> bool {
        (self.left..=self.right).contains(&index.x) && (self.top..=self.bottom).contains(&index.y)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Cells from `index` (inclusive) to the end of the range in row-major order.
    fn remaining_from(&self, index: TileIndex) -> usize {
        let width = i64::from(self.right) - i64::from(self.left) + 1;
        let rest_of_row = i64::from(self.right) - i64::from(index.x) + 1;
        let later_rows = i64::from(self.bottom) - i64::from(index.y);
        usize::try_from(rest_of_row + later_rows * width).unwrap_or(0)
    }
}

/// Enumerates the tiles whose bordered bounds intersect a rectangle.
///
/// Tiles are yielded row-major (x varies fastest) over a contiguous
/// [`IndexRange`].
#[derive(Debug, Clone)]
pub struct TileIter<'a> {
    range: IndexRange,
    current: Option<TileIndex>,
    _tiling_data: PhantomData<&'a TilingData>,
}

impl<'a> TileIter<'a> {
    pub fn new(tiling_data: &'a TilingData, rect: Rect) -> Self {
        let mut iter = Self {
            range: IndexRange::default(),
            current: None,
            _tiling_data: PhantomData,
        };

        if tiling_data.has_empty_bounds() {
            trace!("Tile iteration over empty grid");
            return iter;
        }

        let rect = rect.intersection(&Rect::from_size(tiling_data.total_size()));
        iter.range = IndexRange::covering(tiling_data, &rect);

        // The index functions always clamp into the grid, so a rect that
        // misses the surface still produces a valid-looking start tile.
        let start = TileIndex::new(iter.range.left, iter.range.top);
        if !tiling_data
            .tile_bounds_with_border(start.x, start.y)
            .intersects(&rect)
        {
            trace!(%rect, "Tile iteration rect misses every tile");
            return iter;
        }

        iter.current = Some(start);
        iter
    }

    /// The tile the next call to `next()` will yield, or `None` once done.
    #[inline]
    pub fn index(&self) -> Option<TileIndex> {
        self.current
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Steps past the current tile. Does nothing once done.
    pub fn advance(&mut self) {
        let Some(mut index) = self.current else {
            return;
        };

        index.x += 1;
        if index.x > self.range.right {
            index.x = self.range.left;
            index.y += 1;
            if index.y > self.range.bottom {
                self.current = None;
                return;
            }
        }
        self.current = Some(index);
    }
}

impl Iterator for TileIter<'_> {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.advance();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileIter<'_> {
    fn len(&self) -> usize {
        self.current
            .map(|index| self.range.remaining_from(index))
            .unwrap_or(0)
    }
}

impl FusedIterator for TileIter<'_> {}

/// Enumerates the tiles covering a `consider` rectangle, skipping those in
/// the tile range covering an `ignore` rectangle.
///
/// Ignored runs are jumped over rather than stepped through, so the cost is
/// proportional to the number of yielded tiles, not to the ignored area.
#[derive(Debug, Clone)]
pub struct DifferenceIter<'a> {
    consider: IndexRange,
    ignore: Option<IndexRange>,
    current: Option<TileIndex>,
    _tiling_data: PhantomData<&'a TilingData>,
}

impl<'a> DifferenceIter<'a> {
    pub fn new(tiling_data: &'a TilingData, consider: Rect, ignore: Rect) -> Self {
        let mut iter = Self {
            consider: IndexRange::default(),
            ignore: None,
            current: None,
            _tiling_data: PhantomData,
        };

        if tiling_data.has_empty_bounds() {
            trace!("Difference iteration over empty grid");
            return iter;
        }

        let bounds = Rect::from_size(tiling_data.total_size());
        let consider = consider.intersection(&bounds);
        let ignore = ignore.intersection(&bounds);
        if consider.is_empty() {
            trace!("Difference iteration with nothing to consider");
            return iter;
        }

        iter.consider = IndexRange::covering(tiling_data, &consider);
        if !ignore.is_empty() {
            iter.ignore =
                Some(IndexRange::covering(tiling_data, &ignore).clamped_to(&iter.consider));
        }

        if iter.ignore == Some(iter.consider) {
            trace!(%consider, %ignore, "Ignore range covers every considered tile");
            return iter;
        }

        let start = TileIndex::new(iter.consider.left, iter.consider.top);
        iter.current = Some(start);
        if iter.ignored(start).is_some() {
            iter.advance();
        }
        iter
    }

    /// The tile the next call to `next()` will yield, or `None` once done.
    #[inline]
    pub fn index(&self) -> Option<TileIndex> {
        self.current
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Steps to the next tile outside the ignore range. Does nothing once done.
    pub fn advance(&mut self) {
        let Some(mut index) = self.current else {
            return;
        };

        index.x += 1;
        if let Some(ignore) = self.ignored(index) {
            index.x = ignore.right + 1;
        }

        if index.x > self.consider.right {
            index.x = self.consider.left;
            index.y += 1;

            if let Some(ignore) = self.ignored(index) {
                index.x = ignore.right + 1;
                // Ignore spans the full considered width: skip all of its rows.
                if ignore.contains(index) || index.x > self.consider.right {
                    index.y = ignore.bottom + 1;
                    index.x = self.consider.left;
                }
            }

            if index.y > self.consider.bottom {
                self.current = None;
                return;
            }
        }
        self.current = Some(index);
    }

    #[inline]
    fn ignored(&self, index: TileIndex) -> Option<IndexRange> {
        self.ignore.filter(|ignore| ignore.contains(index))
    }
}

impl Iterator for DifferenceIter<'_> {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.advance();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current {
            Some(index) => (1, Some(self.consider.remaining_from(index))),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for DifferenceIter<'_> {}
