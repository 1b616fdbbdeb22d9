//! Utilities shared by the store implementations

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
