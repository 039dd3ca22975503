mod instance;
mod window;
mod instance_cache;
pub mod sculpture;

pub use instance::InstanceRecord;
pub use window::DisplayWindow;
pub use instance_cache::{DEFAULT_CAPACITY, InstanceBufferCache, Published, SyncOutcome};
