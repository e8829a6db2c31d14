// File: crates/pulse-dashboard/src/lib.rs
// Summary: Dashboard data layer shared by the CLI and the window host.

pub mod data;

pub use data::{load_rows, Dashboard, Metric, Row};
