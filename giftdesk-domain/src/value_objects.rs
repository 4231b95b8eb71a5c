// Domain value objects
pub mod activity_kind;
pub mod actor;
pub mod identifiers;
pub mod inventory_action;

pub use activity_kind::*;
pub use actor::*;
pub use identifiers::*;
pub use inventory_action::*;
