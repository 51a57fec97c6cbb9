//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work for centralized repository access.

mod activity_service;
mod auth_service;
pub mod container;
mod dashboard_service;
mod lead_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use activity_service::{ActivityManager, ActivityService};
pub use auth_service::{AuthService, Authenticator, Claims};
pub use dashboard_service::{DashboardManager, DashboardService};
pub use lead_service::{LeadManager, LeadService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
