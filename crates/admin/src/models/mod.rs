//! Domain models for the team directory.

pub mod user;

pub use user::{UserFields, UserRecord};
