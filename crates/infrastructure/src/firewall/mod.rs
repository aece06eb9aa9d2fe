pub mod adapters;
pub mod platform;

pub use platform::{all_adapters, current_adapter, detect_platform, AdapterDescriptor};
