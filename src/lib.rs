//! Theia prerequisites - item prerequisite enforcement for a virtual tabletop host.
//!
//! `host` models the host application's documents and extension points;
//! `prereqs` holds the rule logic and the gate registered against them.

pub mod error;
pub mod host;
pub mod prereqs;

pub use error::PrereqError;
