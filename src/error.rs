//! GTP protocol error taxonomy.
//!
//! The teacher's `gtp.rs` returns hand-written `(bool, String)` tuples with
//! the message typed ad hoc at each call site. This crate keeps that
//! response shape (GTP clients expect `? <message>` text, not a Rust enum)
//! but gives the messages a single typed source of truth via `thiserror`,
//! the way the rest of this codebase's pack derives its error enums rather
//! than hand-rolling `Display`. The variant set is closed, matching spec's
//! protocol-error table exactly: no error outside these four is ever
//! returned.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GtpError {
    #[error("unknown command")]
    UnknownCommand,
    #[error("unacceptable size")]
    UnacceptableSize,
    #[error("illegal move")]
    IllegalMove,
    #[error("cannot undo")]
    CannotUndo,
}
