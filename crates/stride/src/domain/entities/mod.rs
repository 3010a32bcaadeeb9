//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Progression: per-user XP / level / streak / stress state and completion events
//! - User: account profile the progression state hangs off
//! - Activity: catalog entries and lifestyle categories
//! - Plan: a user's selection of catalog activities

mod activity;
mod plan;
mod progression;
mod user;

pub use activity::*;
pub use plan::*;
pub use progression::*;
pub use user::*;
