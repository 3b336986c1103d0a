//! Common utilities for the Wren engines.
//!
//! This crate provides shared infrastructure used by layout and paint:
//! - **Warning System** - deduplicated diagnostics for degraded input

pub mod warning;
