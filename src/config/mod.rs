//! Configuration module for cert-expiry
//!
//! Handles loading settings from TOML files.

pub mod settings;

pub use settings::{AlertSettings, ProbeSettings, Settings};
