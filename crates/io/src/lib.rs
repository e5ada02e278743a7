//! `spangrid-io` — serialization between grids and the flat wire format.
//!
//! Encoding is a straight per-slot dump. Decoding is the interesting half:
//! span shape is not on the wire, so it is reconstructed from adjacent
//! `merge_type` tags and `is_master` flags. See [`json::decode`].

pub mod json;

pub use json::{decode, decode_str, encode, export, import, DecodeMode};
