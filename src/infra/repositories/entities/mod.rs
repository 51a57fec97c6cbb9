//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod activity;
pub mod lead;
pub mod user;
