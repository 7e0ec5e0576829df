//! Kitty Calm library crate — re-exports all modules for integration
//! testing.
//!
//! The binary crate (`main.rs`) is the actual app entry point. This
//! library crate exposes the same modules so that `tests/` integration
//! tests can import types, systems, and resources without needing a
//! window or GPU.

pub mod shared;
pub mod input;
pub mod data;
pub mod theme;
pub mod mascot;
pub mod particles;
pub mod quiz;
pub mod ui;
