// Pure domain services

pub mod checkin_flow;
pub mod gift_selection;
pub mod projection_match;

pub use checkin_flow::*;
pub use gift_selection::*;
pub use projection_match::*;
