// GiftDesk Application Layer

pub mod activity;
pub mod commands;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod ops;
pub mod queries;
pub mod state;

pub use error::AppError;
pub use metrics::Metrics;
pub use ops::LiveUpdateHub;
pub use state::AppState;
