//! MongoDB connection management.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, DEFAULT_URI, MongoConfig};
pub use connector::connect_from_config;
pub use health::{HealthStatus, check_health_detailed};
