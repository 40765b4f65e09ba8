//! Database query functions, grouped by table.

pub mod offices;
pub mod progress;
pub mod saved_offices;
