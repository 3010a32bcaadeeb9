//! Stride API Data Models
//!
//! - Progress: XP, level, day streak and stress of a user
//! - Catalog: lifestyle categories and activities
//! - Plan: the activities a user picked
//! - Dashboard: everything above in one response

mod catalog;
mod dashboard;
mod plan;
mod progress;

pub use catalog::*;
pub use dashboard::*;
pub use plan::*;
pub use progress::*;
