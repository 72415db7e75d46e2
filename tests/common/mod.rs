//! Shared test utilities
//!
//! - Script and config fixtures
//! - TUI terminal testing helpers

#![allow(dead_code)]

pub mod fixtures;
pub mod terminal;
