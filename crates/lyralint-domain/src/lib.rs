//! Domain logic: clean-text derivation + rule evaluation.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod clean;
pub mod evaluate;
pub mod registry;
pub mod script;
pub mod suppression;

pub use clean::{clean_event_text, CleanText};
pub use evaluate::evaluate_events;
pub use registry::{CleanLine, CompiledChecks, Finding, RuleDescriptor, REGISTRY};
pub use script::{char_script, is_exception, line_script, matches_exception, ScriptClass};
pub use suppression::{parse_line_directive, LineDirective, SuppressionState};
