//! # Roster App Library
//!
//! Composition root and console demo for the Roster user directory.

pub mod demo;
pub mod di;
