pub mod memory_store;
pub mod snapshot_file;

pub use memory_store::*;
pub use snapshot_file::*;
