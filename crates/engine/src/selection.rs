use std::collections::BTreeSet;

use super::error::GridError;
use super::grid::Grid;

/// A rectangular range of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Range {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// Create a single-cell range.
    pub fn single(row: usize, col: usize) -> Self {
        Self {
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Check if this range contains a cell.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row &&
        col >= self.start_col && col <= self.end_col
    }

    /// Number of cells in this range.
    pub fn cell_count(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Iterate over all cells in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let start_row = self.start_row;
        let end_row = self.end_row;
        let start_col = self.start_col;
        let end_col = self.end_col;

        (start_row..=end_row).flat_map(move |r| {
            (start_col..=end_col).map(move |c| (r, c))
        })
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}

/// An ephemeral set of selected coordinates.
///
/// Selections are rebuilt on every interaction and never persisted. Span
/// operations that need a span-closed selection call [`Selection::span_closure`]
/// before acting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    coords: BTreeSet<(usize, usize)>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-cell selection (click).
    pub fn single(row: usize, col: usize) -> Self {
        let mut coords = BTreeSet::new();
        coords.insert((row, col));
        Self { coords }
    }

    /// Every coordinate between two drag anchors.
    pub fn rect(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::from_range(Range::new(a.0, a.1, b.0, b.1))
    }

    pub fn from_range(range: Range) -> Self {
        Self {
            coords: range.cells().collect(),
        }
    }

    pub fn from_coords(coords: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            coords: coords.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.coords.contains(&(row, col))
    }

    /// Coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.coords.iter().copied()
    }

    /// Smallest rectangle containing every selected coordinate.
    pub fn bounding_range(&self) -> Option<Range> {
        let mut iter = self.coords.iter();
        let &(r0, c0) = iter.next()?;
        let mut range = Range::single(r0, c0);
        for &(r, c) in iter {
            range.start_row = range.start_row.min(r);
            range.end_row = range.end_row.max(r);
            range.start_col = range.start_col.min(c);
            range.end_col = range.end_col.max(c);
        }
        Some(range)
    }

    /// Whether the selection fills its bounding rectangle exactly.
    pub fn is_exact_rect(&self) -> bool {
        match self.bounding_range() {
            Some(range) => self.coords.len() == range.cell_count(),
            None => false,
        }
    }

    /// Span-close the selection: any slot covered by a master pulls the
    /// master's whole rectangle in, so no merged region is ever partially
    /// selected.
    pub fn span_closure(&self, grid: &Grid) -> Result<Selection, GridError> {
        let mut closed = self.coords.clone();
        let mut queue: Vec<(usize, usize)> = closed.iter().copied().collect();
        while let Some((row, col)) = queue.pop() {
            let (mr, mc, master) = grid.master_of(row, col)?;
            for r in mr..mr + master.row_span {
                for c in mc..mc + master.col_span {
                    if closed.insert((r, c)) {
                        queue.push((r, c));
                    }
                }
            }
        }
        Ok(Selection { coords: closed })
    }
}

/// Turn two drag anchors into the rectangle the user sees selected: the
/// anchor rectangle grown until no span straddles its boundary.
///
/// This is what an input layer calls while tracking a drag; the result is
/// always span-closed and exactly rectangular.
pub fn anchored_rect(grid: &Grid, a: (usize, usize), b: (usize, usize)) -> Result<Range, GridError> {
    let mut range = Range::new(a.0, a.1, b.0, b.1);
    loop {
        let closed = Selection::from_range(range).span_closure(grid)?;
        let grown = closed
            .bounding_range()
            .expect("closure of a non-empty rectangle is non-empty");
        if grown == range {
            return Ok(range);
        }
        range = grown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_single() {
        let r = Range::single(5, 3);
        assert!(r.contains(5, 3));
        assert!(!r.contains(5, 4));
        assert!(r.is_single());
        assert_eq!(r.cell_count(), 1);
    }

    #[test]
    fn test_range_multi() {
        let r = Range::new(1, 1, 3, 2);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(r.contains(3, 1));
        assert!(!r.contains(0, 0));
        assert!(!r.is_single());
        assert_eq!(r.cell_count(), 6); // 3 rows x 2 cols
    }

    #[test]
    fn test_range_normalizes() {
        let r = Range::new(5, 5, 1, 1);
        assert_eq!(r.start_row, 1);
        assert_eq!(r.start_col, 1);
        assert_eq!(r.end_row, 5);
        assert_eq!(r.end_col, 5);
    }

    #[test]
    fn test_selection_rect() {
        let sel = Selection::rect((2, 2), (4, 5));
        assert_eq!(sel.len(), 12);
        assert!(sel.contains(2, 2));
        assert!(sel.contains(3, 3));
        assert!(sel.contains(4, 5));
        assert!(!sel.contains(1, 1));
        assert!(sel.is_exact_rect());
    }

    #[test]
    fn test_non_rect_selection() {
        let sel = Selection::from_coords([(0, 0), (0, 1), (1, 0)]);
        assert!(!sel.is_exact_rect());
        assert_eq!(sel.bounding_range(), Some(Range::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_span_closure_pulls_in_whole_span() {
        let mut grid = Grid::new(4, 4);
        grid.set_span(0, 0, 2, 2).unwrap();

        let closed = Selection::single(1, 1).span_closure(&grid).unwrap();
        assert_eq!(closed.len(), 4);
        assert!(closed.contains(0, 0));
        assert!(closed.contains(1, 0));
    }

    #[test]
    fn test_span_closure_out_of_bounds() {
        let grid = Grid::new(2, 2);
        let err = Selection::single(5, 0).span_closure(&grid);
        assert_eq!(err, Err(GridError::OutOfBounds { row: 5, col: 0 }));
    }

    #[test]
    fn test_anchored_rect_grows_through_straddling_span() {
        let mut grid = Grid::new(5, 5);
        // 1x3 span sticking out of the anchor rectangle to the right.
        grid.set_span(1, 1, 1, 3).unwrap();

        let range = anchored_rect(&grid, (0, 0), (1, 1)).unwrap();
        assert_eq!(range, Range::new(0, 0, 1, 3));
    }

    #[test]
    fn test_anchored_rect_chained_expansion() {
        let mut grid = Grid::new(5, 5);
        grid.set_span(0, 1, 1, 2).unwrap(); // cols 1-2 in row 0
        grid.set_span(1, 2, 1, 3).unwrap(); // cols 2-4 in row 1

        // The first span widens the rectangle to column 2, which touches
        // the second span on row 1 and widens it again.
        let range = anchored_rect(&grid, (0, 0), (1, 1)).unwrap();
        assert_eq!(range, Range::new(0, 0, 1, 4));
    }

    #[test]
    fn test_anchored_rect_plain_cells() {
        let grid = Grid::new(3, 3);
        let range = anchored_rect(&grid, (2, 1), (0, 2)).unwrap();
        assert_eq!(range, Range::new(0, 1, 2, 2));
    }
}
