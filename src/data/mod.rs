//! Demo data models and small parsing helpers.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "1s", "500ms")
//! - [`user`]: The sample user directory shown by the demo binary

pub mod duration;
pub mod user;

pub use user::{filter_users, sample_users, User, UserStatus};
