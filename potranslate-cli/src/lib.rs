//! CLI library for testing purposes

pub mod args;
pub mod ui;
pub mod validation;

pub use args::{Args, TierArg};
