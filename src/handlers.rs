pub mod activity_logs;
pub mod customers;
pub mod dashboard;
pub mod email_logs;
pub mod followups;
pub mod notes;
pub mod transfer;
