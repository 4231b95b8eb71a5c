// Domain entities

pub mod activity;
pub mod checkin_record;
pub mod config;
pub mod event;
pub mod guest;
pub mod inventory_item;
pub mod live_update;
pub mod outcomes;
pub mod requests;

pub use activity::*;
pub use checkin_record::*;
pub use config::*;
pub use event::*;
pub use guest::*;
pub use inventory_item::*;
pub use live_update::*;
pub use outcomes::*;
pub use requests::*;
