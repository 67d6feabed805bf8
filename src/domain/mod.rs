mod backend;
mod clock;
mod error;
mod metrics;
mod models;
mod repository;

pub mod filter;
pub mod layout;
pub mod navigation;
pub mod pricing;
pub mod random;
pub mod weather;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the persistence and backend abstractions
pub use backend::{Backend, BackendPtr};
pub use repository::{Repository, RepositoryPtr, StorageKey};

pub use clock::{Clock, ClockPtr, FixedClock, SystemClock};
pub use error::{is_not_found, ClientError};
pub use models::*;
