//! CLI Exit Code Registry
//!
//! Single source of truth for the `spangrid` exit codes. Exit codes are
//! part of the shell contract — scripts rely on them.
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | Operation failed (merge/split/crop rejected)  |
//! | 2    | CLI usage error (bad args, bad range syntax)  |
//! | 3    | File I/O error                                |
//! | 4    | Wire-format parse/decode error                |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// The grid operation itself was rejected (e.g. non-rectangular
/// selection, splitting an unmerged cell).
pub const EXIT_OP_ERROR: u8 = 1;

/// Usage error - bad arguments, malformed coordinates.
pub const EXIT_USAGE: u8 = 2;

/// File could not be read or written.
pub const EXIT_IO_ERROR: u8 = 3;

/// Input file is not a valid wire-format document.
pub const EXIT_PARSE_ERROR: u8 = 4;
