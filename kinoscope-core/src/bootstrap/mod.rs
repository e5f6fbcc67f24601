//! Application bootstrap
//!
//! Configuration resolution and the one-shot autostart flow that takes a
//! fresh install from "zero providers" to a populated first feed.

pub mod autostart;
pub mod config;

pub use autostart::run_autostart;
pub use config::load_config;
