//! Core services for parsing, scoring, scanning, resolution, and replay

pub mod format;
pub mod hash;
pub mod parse;
pub mod purge;
pub mod resolve;
pub mod scan;
pub mod score;
