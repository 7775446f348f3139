//! File input/output: two-column numeric tables, spectrum artifacts,
//! detector noise curves, and JSON report export.

pub mod columns;
pub mod noise;
pub mod report;
pub mod spectrum;
