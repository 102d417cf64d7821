//! Deal Intel — deterministic health analysis for real-estate deals.

pub mod config;
pub mod deal;
pub mod error;
pub mod intelligence;
