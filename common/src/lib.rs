//! Shared building blocks for geoset.
//!
//! Holds everything that is not tied to a particular storage structure:
//! the address-family tags, the prefix normalizer, inclusive IP ranges and
//! the error taxonomy used across the workspace.

pub mod action;
pub mod config;
pub mod error;
pub mod network;

pub use error::{GeoError, Result};
