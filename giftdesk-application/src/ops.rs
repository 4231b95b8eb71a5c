pub mod live_update_hub;

pub use live_update_hub::*;
