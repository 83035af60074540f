pub mod artifact_store;
pub mod memory_store;
pub mod metadata;
pub mod scan_log;
