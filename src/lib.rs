//! Terminal multiple-choice quiz player.
//!
//! The binary in `main.rs` drives the terminal; everything it needs lives
//! here so integration tests and benchmarks can reach the quiz core.

pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod quiz;
pub mod store;
pub mod ui;
