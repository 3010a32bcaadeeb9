//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and the progression engine.

mod catalog_service;
mod plan_service;
mod progress_service;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog_service::CatalogService;
pub use plan_service::PlanService;
pub use progress_service::{CompletionReport, ProgressService};
