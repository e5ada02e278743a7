use serde::{Deserialize, Serialize};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Merge-direction annotation on a cell whose span is still 1x1.
///
/// Some exported documents tag a unit cell with a direction (the wire
/// format's `merge_type`) without any covered neighbors. The annotation is
/// carried separately from `row_span`/`col_span` so those documents survive
/// a decode/encode round-trip. Span-changing operations clear it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MergeIntent {
    Horizontal,
    Vertical,
    Both,
}

/// A grid cell: either an independent unit cell or the top-left master of a
/// merged rectangular region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    /// Zero-based position, fixed at creation.
    pub row: usize,
    pub col: usize,
    pub content: String,
    /// Both 1 means an ordinary unit cell; either >1 makes this a master.
    pub row_span: usize,
    pub col_span: usize,
    pub align_h: Alignment,
    pub align_v: VerticalAlignment,
    pub merge_intent: Option<MergeIntent>,
}

impl Cell {
    /// Fresh unit cell with the default per-position label.
    pub fn unit(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            content: default_label(row, col),
            row_span: 1,
            col_span: 1,
            align_h: Alignment::default(),
            align_v: VerticalAlignment::default(),
            merge_intent: None,
        }
    }

    /// Whether this cell is the master of a real merged region.
    pub fn is_span(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// Whether this cell's span rectangle covers `(row, col)`.
    pub fn covers(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.row_span
            && col >= self.col && col < self.col + self.col_span
    }
}

/// Default content for a freshly created or split-out cell ("R1C1" style,
/// 1-based for display).
pub fn default_label(row: usize, col: usize) -> String {
    format!("R{}C{}", row + 1, col + 1)
}
