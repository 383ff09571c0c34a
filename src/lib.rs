//! Browser Profile Launcher library root
//!
//! Re-exports core functionality for the CLI and GUI front ends.

pub mod config;
pub mod core;
pub mod server;
pub mod util;

pub use config::Config;
