//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through the `tracing` macros, fields named after
//!   the component and field being handled
//! - Log level configurable via the command line and `RUST_LOG`

pub mod logging;
