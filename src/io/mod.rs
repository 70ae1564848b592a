//! Host-facing input/output: CLI, constants, errors, progress and text export

/// Command-line host driving the solver
pub mod cli;
/// Defaults and limits
pub mod configuration;
/// Error types and context
pub mod error;
/// Terminal progress display
pub mod progress;
/// Text rendering of grid state
pub mod text;
