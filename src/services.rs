pub mod activity_recorder;
pub mod customer_service;
pub mod dashboard_service;
pub mod export;
pub mod filter;
pub mod followup;
pub mod import;

pub use activity_recorder::ActivityRecorder;
pub use customer_service::CustomerService;
pub use dashboard_service::DashboardService;
pub use followup::FollowUpService;
pub use import::ImportService;
