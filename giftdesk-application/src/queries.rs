// Read paths over guests, inventory and check-in records

pub mod checkin_queries;
pub mod guest_queries;
pub mod inventory_queries;
