//! Per-clause detectors
//!
//! Each detector reads the shared clause list and returns its own record;
//! none of them depends on another's output.

pub mod compliance;
pub mod obligations;
pub mod responsibility;
pub mod risk;

/// Single sentences are parsed up to this many chars
pub(crate) const PARSE_CHAR_LIMIT: usize = 500;
