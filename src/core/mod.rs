//! Core module
//!
//! Profile discovery, lookup and launching.

pub mod collection;
pub mod history;
pub mod icon;
pub mod launch;
pub mod profile;
pub mod registry;
pub mod view;
