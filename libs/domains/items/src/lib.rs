//! Items Domain
//!
//! Pantry and shopping-list items stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, `{ ok, data }` envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Normalization, validation, id parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, CreateItem, UpdateItem, enum value sets
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, mongodb::MongoItemRepository, service::ItemService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("pantry");
//!
//! let repository = MongoItemRepository::new(db);
//! repository.ensure_schema().await?;
//!
//! let router = handlers::router(ItemService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateItem, Item, ItemCategory, ItemPriority, ItemSource, ItemStatus, ItemType, ItemUnit,
    StorageCondition, UpdateItem,
};
pub use mongodb::MongoItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
