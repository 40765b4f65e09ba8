//! PostgreSQL persistence for Decide to Run: the offices catalog, the
//! saved-offices relation, and per-(user, office) plan progress.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;
