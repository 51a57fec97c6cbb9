//! Lead Tracker - Real-estate lead management API
//!
//! Leads move through a sales pipeline, collect activities (calls, emails,
//! meetings, notes) and roll up into a conversion dashboard. Leads are
//! soft-deleted and can be restored; at most one live lead may hold a
//! given email address.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and validation rules
//! - **services**: Application use cases
//! - **infra**: Database, migrations, repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Activity, Actor, Lead, LeadStatus};
pub use errors::{AppError, AppResult};
