//! spangrid export wire format — v1 frozen
//!
//! This crate defines the canonical per-cell record exchanged with other
//! tools: a flat JSON array with exactly one record per grid slot. Span
//! shape is not transmitted directly; it is reconstructed on import from
//! the pattern of adjacent `merge_type` tags and `is_master` flags (the
//! codec lives in `spangrid-io`).
//!
//! The wire format is **frozen**. Field names, the 1-based coordinates and
//! the `merge_type` spellings must not change; existing exported documents
//! depend on them.
//!
//! # Compatibility notes
//!
//! - `is_master` is a JSON boolean on output. One widespread exporter
//!   variant writes the strings `"True"`/`"False"` instead; both forms are
//!   accepted on input.
//! - `alignH`/`alignV` are optional; importers default them to
//!   `left`/`middle`.
//!
//! # Usage
//!
//! ```ignore
//! use spangrid_protocol::CellRecord;
//!
//! let records: Vec<CellRecord> = serde_json::from_str(&json)?;
//! let json = serde_json::to_string_pretty(&records)?;
//! ```

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};

/// Current wire-format version. Increment for breaking changes.
pub const WIRE_VERSION: u32 = 1;

/// Span-shape tag carried on every slot of a merged region, master and
/// hidden slots alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeType {
    /// Not part of a merged region.
    #[default]
    #[serde(rename = "")]
    None,
    /// Horizontal run: `col_span > 1`, `row_span == 1`.
    H,
    /// Vertical run: `row_span > 1`, `col_span == 1`.
    V,
    /// Rectangular region spanning both directions.
    #[serde(rename = "HV")]
    Hv,
}

impl MergeType {
    /// Tag for a master with the given span shape.
    pub fn from_span(row_span: usize, col_span: usize) -> Self {
        match (row_span > 1, col_span > 1) {
            (false, false) => Self::None,
            (false, true) => Self::H,
            (true, false) => Self::V,
            (true, true) => Self::Hv,
        }
    }

    /// Whether the tag participates in a horizontal run.
    pub fn has_h(self) -> bool {
        matches!(self, Self::H | Self::Hv)
    }

    /// Whether the tag participates in a vertical run.
    pub fn has_v(self) -> bool {
        matches!(self, Self::V | Self::Hv)
    }
}

/// Horizontal alignment, wire spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignH {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment, wire spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignV {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// One record per grid slot.
///
/// Hidden slots of a merged region carry their master's `merge_type`,
/// `is_master: false` and empty content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
    #[serde(default)]
    pub merge_type: MergeType,
    #[serde(deserialize_with = "bool_or_python_string")]
    pub is_master: bool,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "alignH", default, skip_serializing_if = "Option::is_none")]
    pub align_h: Option<AlignH>,
    #[serde(rename = "alignV", default, skip_serializing_if = "Option::is_none")]
    pub align_v: Option<AlignV>,
}

/// Accept `true`/`false` as well as the `"True"`/`"False"` string variant
/// some exporters emit.
fn bool_or_python_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> de::Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a boolean or \"True\"/\"False\"")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value {
                "True" | "true" => Ok(true),
                "False" | "false" => Ok(false),
                other => Err(E::invalid_value(Unexpected::Str(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}
