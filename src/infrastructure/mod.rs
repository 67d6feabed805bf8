pub mod backend;
pub mod fixtures;
pub mod metrics;
pub mod simulator;
pub mod storage;
pub mod weather;

// Re-export the factory functions for easy access
pub use backend::create_backend;
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use storage::{create_file_repository, create_memory_repository};
