//! Span operations: merge, split, crop, alignment, content edits.
//!
//! Every operation takes the grid by shared reference, clones it, mutates
//! the clone, and returns it. A failure returns the error instead — the
//! caller's grid is untouched either way, which gives the
//! transaction-or-rollback discipline for free.

use super::cell::{Alignment, VerticalAlignment};
use super::error::GridError;
use super::grid::Grid;
use super::selection::Selection;

/// Merge the selected cells into one rectangular region.
///
/// The selection is span-closed first, so picking any slot of an existing
/// merged region picks the whole region. The closed set must be an exact
/// rectangle of at least two cells. The rectangle's top-left cell becomes
/// the master and keeps its content and alignment; everything else in the
/// rectangle is absorbed and discarded.
pub fn merge(grid: &Grid, selection: &Selection) -> Result<Grid, GridError> {
    let closed = selection.span_closure(grid)?;
    let range = closed
        .bounding_range()
        .ok_or(GridError::SelectionTooSmall)?;
    if closed.len() != range.cell_count() {
        return Err(GridError::NonRectangularSelection);
    }
    if range.is_single() {
        return Err(GridError::SelectionTooSmall);
    }

    let mut next = grid.clone();
    next.set_span(
        range.start_row,
        range.start_col,
        range.row_count(),
        range.col_count(),
    )?;
    Ok(next)
}

/// Split the merged region whose master is the single selected coordinate.
///
/// The selection is taken literally (not span-closed): it must name the
/// master slot itself. Every slot of the region becomes a fresh unit cell
/// with a regenerated default label; the master's content and alignment are
/// deliberately not spread over the region.
pub fn split(grid: &Grid, selection: &Selection) -> Result<Grid, GridError> {
    if selection.len() != 1 {
        return Err(GridError::NotASingleCell);
    }
    let (row, col) = selection.iter().next().expect("len checked above");

    let mut next = grid.clone();
    next.clear_span(row, col)?;
    Ok(next)
}

/// Crop the grid to the selected rectangle, re-basing the rectangle's
/// top-left to (0, 0).
///
/// The literal selection must form an exact rectangle. Spans that stick out
/// of the rectangle are clamped to their intersection with it: the
/// intersection's top-left becomes the (possibly smaller) master and keeps
/// the original master's content and alignment. Cells wholly outside are
/// discarded.
pub fn crop_to_selection(grid: &Grid, selection: &Selection) -> Result<Grid, GridError> {
    let range = selection
        .bounding_range()
        .ok_or(GridError::NonRectangularSelection)?;
    if selection.len() != range.cell_count() {
        return Err(GridError::NonRectangularSelection);
    }
    if range.end_row >= grid.rows() || range.end_col >= grid.cols() {
        return Err(GridError::OutOfBounds {
            row: range.end_row,
            col: range.end_col,
        });
    }

    let mut out = Grid::new(range.row_count(), range.col_count());
    for cell in grid.cells() {
        let top = cell.row.max(range.start_row);
        let left = cell.col.max(range.start_col);
        let bottom = (cell.row + cell.row_span - 1).min(range.end_row);
        let right = (cell.col + cell.col_span - 1).min(range.end_col);
        if top > bottom || left > right {
            continue;
        }

        let row = top - range.start_row;
        let col = left - range.start_col;
        out.set_span(row, col, bottom - top + 1, right - left + 1)?;
        let target = out.cell_mut(row, col)?;
        target.content = cell.content.clone();
        target.align_h = cell.align_h;
        target.align_v = cell.align_v;
        target.merge_intent = cell.merge_intent;
    }
    Ok(out)
}

/// Apply alignment to every non-absent cell in the literal selection.
///
/// Absent slots in the selection are skipped, not an error; out-of-bounds
/// coordinates are. `None` leaves the respective axis unchanged.
pub fn set_alignment(
    grid: &Grid,
    selection: &Selection,
    align_h: Option<Alignment>,
    align_v: Option<VerticalAlignment>,
) -> Result<Grid, GridError> {
    let mut next = grid.clone();
    for (row, col) in selection.iter() {
        if next.get(row, col)?.is_none() {
            continue;
        }
        let cell = next.cell_mut(row, col)?;
        if let Some(h) = align_h {
            cell.align_h = h;
        }
        if let Some(v) = align_v {
            cell.align_v = v;
        }
    }
    Ok(next)
}

/// Replace the content of the cell at `(row, col)`.
pub fn set_content(grid: &Grid, row: usize, col: usize, content: &str) -> Result<Grid, GridError> {
    let mut next = grid.clone();
    next.cell_mut(row, col)?.content = content.to_string();
    Ok(next)
}
