//! Shared types used across layers.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedActivities, PaginatedLeads, PaginationMeta, PaginationParams};
pub use response::{Created, NoContent};
