//! Shared test support for the engine workspace.

pub mod logging;
