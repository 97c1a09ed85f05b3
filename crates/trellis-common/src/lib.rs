//! Common utilities for the trellis widget toolkit.
//!
//! This crate provides shared infrastructure used by all trellis components:
//! - **Warning System** - colored terminal output for compatibility patches
//! - **Id Sequences** - per-document generators for unique element ids

pub mod id;
pub mod warning;

pub use id::IdSequence;
