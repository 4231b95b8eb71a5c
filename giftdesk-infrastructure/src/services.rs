pub mod activity_log;
pub mod reconcile_service;

pub use activity_log::*;
pub use reconcile_service::*;
