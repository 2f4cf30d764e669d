//! Core module: the planning engine and its supporting pieces

pub mod config;
pub mod loader;
pub mod models;
pub mod planner;
pub mod report;
pub mod requirements;
pub mod scorer;

/// Returns the current version of the `uw-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
