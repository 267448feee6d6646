//! Persistence for reports and scan caches

pub mod cache;
pub mod report;
