//! Document store connectivity for the pantry services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, configuration and health check
//! - `config` - `core_config::FromEnv` support for the configuration types
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
