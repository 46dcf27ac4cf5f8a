//! Animal guessing game with a self-growing knowledge tree.
//!
//! Layers, inside out:
//! - [`domain`]: the arena-backed knowledge tree, answer classification and
//!   the replayable transcript format
//! - [`application`]: traversal engine, learning mutator and persistence
//! - [`infrastructure`]: filesystem and messenger implementations, wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
