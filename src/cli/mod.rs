//! Command-line interface: argument parsing and output formatting

pub mod args;
pub mod output;
