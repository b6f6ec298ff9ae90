//! Asteroid-shooting arcade game logic.
//!
//! Everything here is terminal-agnostic; the binary in `main.rs` owns the
//! terminal, the event thread and the renderer.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod scores;
pub mod screen;
pub mod session;
