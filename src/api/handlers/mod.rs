//! HTTP request handlers.

pub mod activity_handler;
pub mod dashboard_handler;
pub mod lead_handler;

pub use activity_handler::activity_routes;
pub use dashboard_handler::dashboard_routes;
pub use lead_handler::lead_routes;
