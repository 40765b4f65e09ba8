//! Core campaign-planning logic for Decide to Run.
//!
//! This crate is pure domain logic: it turns an elected-office record into a
//! category-specific campaign checklist, tracks per-user completion state,
//! and renders the resulting plan as a line-oriented document. All I/O goes
//! through the collaborator traits in [`office`] and [`progress`]; the
//! PostgreSQL implementations live in `d2r-db`.

pub mod assistant;
pub mod office;
pub mod plan;
pub mod progress;
