pub mod context;
pub mod dashboard_service;
pub mod report_service;
pub mod session_service;

pub use context::ServiceContext;
