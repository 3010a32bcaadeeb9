//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod activity_type;
mod stress_level;

pub use activity_type::*;
pub use stress_level::*;
