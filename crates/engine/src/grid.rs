use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::GridError;

/// A rectangular matrix of slots, each holding a cell or the absent
/// sentinel (`None`).
///
/// Structural invariants, maintained by every mutation:
/// - every slot belongs to exactly one region: it holds a cell whose span
///   rectangle covers only absent slots besides itself, or it is absent and
///   covered by exactly one such master;
/// - span rectangles of distinct masters never intersect;
/// - no span rectangle extends outside the grid.
///
/// Mutating operations on a document clone the grid first and commit the
/// clone only on success, so a failed operation never leaves a caller with
/// a half-edited grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major; `None` is an absent slot hidden under a master.
    slots: Vec<Option<Cell>>,
    /// Reverse index: absent slot -> owning master coordinate. Kept in
    /// lockstep with `slots` so master lookup is O(1) instead of a scan.
    covers: FxHashMap<(usize, usize), (usize, usize)>,
}

impl Grid {
    /// Grid of independent unit cells with default per-position labels.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut slots = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                slots.push(Some(Cell::unit(r, c)));
            }
        }
        Self {
            rows,
            cols,
            slots,
            covers: FxHashMap::default(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if self.in_bounds(row, col) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { row, col })
        }
    }

    /// The slot at `(row, col)`: `Some` for a unit cell or master, `None`
    /// for an absent slot.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&Cell>, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.slots[self.idx(row, col)].as_ref())
    }

    /// Mutable access to a non-absent cell.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GridError> {
        self.check_bounds(row, col)?;
        let idx = self.idx(row, col);
        self.slots[idx]
            .as_mut()
            .ok_or(GridError::HiddenSlot { row, col })
    }

    /// Resolve any slot to its owning master.
    ///
    /// For a non-absent slot that is the slot itself; for an absent slot the
    /// cover index gives the unique master whose rectangle contains it.
    /// `NoOwningMaster` is only reachable on a grid whose invariants are
    /// already broken.
    pub fn master_of(&self, row: usize, col: usize) -> Result<(usize, usize, &Cell), GridError> {
        self.check_bounds(row, col)?;
        if let Some(cell) = &self.slots[self.idx(row, col)] {
            return Ok((row, col, cell));
        }
        let &(mr, mc) = self
            .covers
            .get(&(row, col))
            .ok_or(GridError::NoOwningMaster { row, col })?;
        match &self.slots[self.idx(mr, mc)] {
            Some(cell) if cell.covers(row, col) => Ok((mr, mc, cell)),
            _ => Err(GridError::NoOwningMaster { row, col }),
        }
    }

    /// Turn `(row, col)` into the master of a `row_span` x `col_span`
    /// region, absorbing everything the rectangle covers.
    ///
    /// The target slot must be non-absent and every other covered slot must
    /// be a unit cell, a master fully inside the rectangle, or an absent
    /// slot whose owner lies inside the rectangle. Absorbed cells are
    /// discarded; only the master's content and alignment survive.
    pub fn set_span(
        &mut self,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        if row_span == 0 || col_span == 0 {
            return Err(GridError::SelectionTooSmall);
        }
        let end_row = row + row_span - 1;
        let end_col = col + col_span - 1;
        self.check_bounds(end_row, end_col)?;
        if self.slots[self.idx(row, col)].is_none() {
            return Err(GridError::HiddenSlot { row, col });
        }

        let inside = |r: usize, c: usize, rs: usize, cs: usize| {
            r >= row && r + rs - 1 <= end_row && c >= col && c + cs - 1 <= end_col
        };

        // No span may straddle the rectangle boundary.
        for r in row..=end_row {
            for c in col..=end_col {
                match &self.slots[self.idx(r, c)] {
                    Some(cell) => {
                        if !inside(cell.row, cell.col, cell.row_span, cell.col_span) {
                            return Err(GridError::NonRectangularSelection);
                        }
                    }
                    None => {
                        let &(mr, mc) = self
                            .covers
                            .get(&(r, c))
                            .ok_or(GridError::NoOwningMaster { row: r, col: c })?;
                        if !(mr >= row && mr <= end_row && mc >= col && mc <= end_col) {
                            return Err(GridError::NonRectangularSelection);
                        }
                    }
                }
            }
        }

        for r in row..=end_row {
            for c in col..=end_col {
                if r == row && c == col {
                    continue;
                }
                let idx = self.idx(r, c);
                self.slots[idx] = None;
                self.covers.insert((r, c), (row, col));
            }
        }

        let idx = self.idx(row, col);
        if let Some(master) = &mut self.slots[idx] {
            master.row_span = row_span;
            master.col_span = col_span;
            master.merge_intent = None;
        }
        Ok(())
    }

    /// Dissolve the span mastered at `(row, col)` back into fresh unit
    /// cells with regenerated default labels. The master's own content and
    /// alignment are not preserved.
    pub fn clear_span(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let (row_span, col_span) = match &self.slots[self.idx(row, col)] {
            None => return Err(GridError::HiddenSlot { row, col }),
            Some(cell) if !cell.is_span() => return Err(GridError::NotMerged),
            Some(cell) => (cell.row_span, cell.col_span),
        };
        for r in row..row + row_span {
            for c in col..col + col_span {
                let idx = self.idx(r, c);
                self.slots[idx] = Some(Cell::unit(r, c));
                self.covers.remove(&(r, c));
            }
        }
        Ok(())
    }

    /// All slots in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, usize, Option<&Cell>)> {
        let cols = self.cols;
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (i / cols, i % cols, slot.as_ref()))
    }

    /// All non-absent cells (unit cells and masters) in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Verify the structural invariants. Test and debugging aid; the public
    /// operations keep these true.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut claimed: FxHashMap<(usize, usize), (usize, usize)> = FxHashMap::default();
        for (r, c, slot) in self.slots() {
            let Some(cell) = slot else { continue };
            if cell.row != r || cell.col != c {
                return Err(format!(
                    "cell at ({r}, {c}) believes it is at ({}, {})",
                    cell.row, cell.col
                ));
            }
            if cell.row_span == 0 || cell.col_span == 0 {
                return Err(format!("cell at ({r}, {c}) has a zero span"));
            }
            if r + cell.row_span > self.rows || c + cell.col_span > self.cols {
                return Err(format!("span at ({r}, {c}) extends outside the grid"));
            }
            for rr in r..r + cell.row_span {
                for cc in c..c + cell.col_span {
                    if (rr, cc) == (r, c) {
                        continue;
                    }
                    if self.slots[self.idx(rr, cc)].is_some() {
                        return Err(format!(
                            "span at ({r}, {c}) overlaps the cell at ({rr}, {cc})"
                        ));
                    }
                    if let Some(other) = claimed.insert((rr, cc), (r, c)) {
                        return Err(format!(
                            "slot ({rr}, {cc}) claimed by masters at {:?} and ({r}, {c})",
                            other
                        ));
                    }
                    if self.covers.get(&(rr, cc)) != Some(&(r, c)) {
                        return Err(format!(
                            "cover index for ({rr}, {cc}) does not point at ({r}, {c})"
                        ));
                    }
                }
            }
        }
        for (r, c, slot) in self.slots() {
            if slot.is_none() && !claimed.contains_key(&(r, c)) {
                return Err(format!("absent slot ({r}, {c}) has no owning master"));
            }
            if slot.is_some() && self.covers.contains_key(&(r, c)) {
                return Err(format!("occupied slot ({r}, {c}) has a cover entry"));
            }
        }
        for (slot, master) in &self.covers {
            if claimed.get(slot) != Some(master) {
                return Err(format!("stale cover entry {slot:?} -> {master:?}"));
            }
        }
        Ok(())
    }
}
