//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod activity_repository;
mod plan_repository;
mod progress_repository;

pub use activity_repository::*;
pub use plan_repository::*;
pub use progress_repository::*;
