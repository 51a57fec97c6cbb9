//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod activity_repository;
pub(crate) mod entities;
mod lead_repository;
mod user_repository;

pub use activity_repository::{ActivityRepository, ActivityStore};
pub use lead_repository::{LeadRepository, LeadStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use activity_repository::MockActivityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use lead_repository::MockLeadRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
