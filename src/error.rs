//! Shared error plumbing (spec.md §7).
//!
//! Parse errors accumulate as plain messages in the parser; they are never
//! fatal (spec.md §4.2, §7). Runtime errors are represented directly as
//! `Value::Error` (see object.rs) rather than a separate error type, per
//! spec.md §3.3's design note that `Error` is an internal short-circuit
//! carrier, not an exception.

use std::fmt;

/// A single accumulated parser diagnostic (spec.md §7: unexpected-token,
/// missing-prefix, bad-integer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}
