//! Event parser for the `[Events]` section of ASS subtitle scripts.
//!
//! This crate is I/O-free: it turns raw file content into an ordered sequence
//! of typed events and nothing else. Text fields are preserved verbatim,
//! including inline override tags and `\N` line-break markers, so that
//! downstream checks can both inspect and report on them.

mod event;

pub use event::{parse_script, Event, EventKind, ScriptParseError};
