pub mod checkin_handlers;
pub mod guest_handlers;
pub mod inventory_handlers;
pub mod ops_handlers;

pub use checkin_handlers::*;
pub use guest_handlers::*;
pub use inventory_handlers::*;
pub use ops_handlers::*;
