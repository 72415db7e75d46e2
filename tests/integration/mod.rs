//! Integration tests for the advisor demo
//!
//! These tests drive the controller, the terminal page and the app together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod composer_flow;
pub mod playback_flow;
pub mod render;
