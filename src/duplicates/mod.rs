//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Accumulating fingerprinted paths across roots ([`GroupMap`])
//! - Driving the walker and hasher over every root ([`DuplicateFinder`])
//! - Reporting groups with two or more members ([`DuplicateGroup`])

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{DuplicateGroup, GroupMap};
