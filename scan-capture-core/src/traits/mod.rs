pub mod capture_delegate;
pub mod classifier;
pub mod key_value_store;
pub mod media_devices;
