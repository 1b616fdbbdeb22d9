//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::{FindOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    CreateItem, Item, ItemCategory, ItemEnum, ItemPriority, ItemSource, ItemStatus, ItemType,
    ItemUnit, MAX_NAME_LEN, StorageCondition, UpdateItem, now_millis,
};
use crate::repository::ItemRepository;

pub const COLLECTION: &str = "items";

/// Stored shape of an [`Item`]: `_id` as a string, BSON dates for timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: ItemUnit,
    pub category: ItemCategory,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub priority: ItemPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ItemSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_condition: Option<StorageCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> ItemResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| ItemError::Internal(format!("timestamp out of range: {}", dt)))
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit,
            category: item.category,
            item_type: item.item_type,
            status: item.status,
            priority: item.priority,
            source: item.source,
            storage_condition: item.storage_condition,
            notes: item.notes.clone(),
            completed: item.completed,
            created_at: to_bson_datetime(item.created_at),
            updated_at: to_bson_datetime(item.updated_at),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = ItemError;

    fn try_from(doc: ItemDocument) -> ItemResult<Self> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| ItemError::Internal(format!("stored id '{}' is invalid: {}", doc.id, e)))?;

        Ok(Self {
            id,
            name: doc.name,
            quantity: doc.quantity,
            unit: doc.unit,
            category: doc.category,
            item_type: doc.item_type,
            status: doc.status,
            priority: doc.priority,
            source: doc.source,
            storage_condition: doc.storage_condition,
            notes: doc.notes,
            completed: doc.completed,
            created_at: from_bson_datetime(doc.created_at)?,
            updated_at: from_bson_datetime(doc.updated_at)?,
        })
    }
}

fn enum_property<E: ItemEnum>() -> Document {
    doc! { "enum": E::values() }
}

/// `$jsonSchema` collection validator mirroring the [`Item`] invariants.
///
/// Enum members are generated from the Rust value sets.
pub fn item_schema() -> Document {
    let max_name_len = MAX_NAME_LEN as i64;
    let units = enum_property::<ItemUnit>();
    let categories = enum_property::<ItemCategory>();
    let types = enum_property::<ItemType>();
    let statuses = enum_property::<ItemStatus>();
    let priorities = enum_property::<ItemPriority>();
    let sources = enum_property::<ItemSource>();
    let conditions = enum_property::<StorageCondition>();

    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": [
                "_id", "name", "quantity", "unit", "category", "type", "status",
                "priority", "completed", "createdAt", "updatedAt"
            ],
            "properties": {
                "_id": { "bsonType": "string" },
                "name": { "bsonType": "string", "minLength": 1, "maxLength": max_name_len },
                "quantity": { "bsonType": ["double", "int", "long", "decimal"], "minimum": 0 },
                "unit": units,
                "category": categories,
                "type": types,
                "status": statuses,
                "priority": priorities,
                "source": sources,
                "storageCondition": conditions,
                "notes": { "bsonType": "string" },
                "completed": { "bsonType": "bool" },
                "createdAt": { "bsonType": "date" },
                "updatedAt": { "bsonType": "date" }
            }
        }
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    db: Database,
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(client.database("pantry"));
    /// repo.ensure_schema().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ItemDocument>(COLLECTION);
        Self { db, collection }
    }

    /// Install the collection validator and the list index.
    ///
    /// Creates the collection when missing, otherwise replaces its validator
    /// with `collMod`. Safe to run on every startup.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> ItemResult<()> {
        let existing = self.db.list_collection_names().await?;

        if existing.iter().any(|name| name.as_str() == COLLECTION) {
            self.db
                .run_command(doc! {
                    "collMod": COLLECTION,
                    "validator": item_schema(),
                    "validationLevel": "strict",
                    "validationAction": "error"
                })
                .await?;
        } else {
            self.db
                .create_collection(COLLECTION)
                .validator(item_schema())
                .await?;
        }

        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1, "_id": -1 })
            .build();
        self.collection.create_index(index).await?;

        tracing::info!(collection = COLLECTION, "Item schema ensured");
        Ok(())
    }

    async fn find_document(&self, id: Uuid) -> ItemResult<Option<Item>> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(Item::try_from)
            .transpose()
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, input), fields(item_name = ?input.name))]
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::from_create(Uuid::now_v7(), input, now_millis());
        item.validate()?;

        self.collection.insert_one(ItemDocument::from(&item)).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        self.find_document(id).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let mut updated = self
            .find_document(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;

        updated.apply_update(input);
        updated.validate()?;

        let result = self
            .collection
            .replace_one(id_filter(id), ItemDocument::from(&updated))
            .await?;

        if result.matched_count == 0 {
            return Err(ItemError::NotFound(id.to_string()));
        }

        tracing::info!(item_id = %id, "Item updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn toggle_completed(&self, id: Uuid) -> ItemResult<Item> {
        // Evaluated server-side in one write; updatedAt = max(now, previous + 1ms).
        let pipeline = vec![doc! {
            "$set": {
                "completed": { "$not": ["$completed"] },
                "updatedAt": { "$max": ["$$NOW", { "$add": ["$updatedAt", 1] }] }
            }
        }];

        let document = self
            .collection
            .find_one_and_update(id_filter(id), pipeline)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;

        let item = Item::try_from(document)?;
        tracing::info!(item_id = %id, completed = item.completed, "Item toggled");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ItemError::NotFound(id.to_string()));
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> ItemResult<()> {
        let status = database::mongodb::check_health_detailed(&self.db).await;
        if status.healthy {
            tracing::debug!(latency_ms = status.response_time_ms, "MongoDB ping ok");
            Ok(())
        } else {
            Err(ItemError::Database(
                status
                    .message
                    .unwrap_or_else(|| "MongoDB ping failed".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateItem;

    fn sample() -> Item {
        let input = CreateItem {
            source: Some(ItemSource::FarmerMarket),
            notes: Some("organic".to_string()),
            ..CreateItem::named("Apples")
        };
        Item::from_create(Uuid::now_v7(), input, now_millis())
    }

    #[test]
    fn test_document_field_names() {
        let document = bson::to_document(&ItemDocument::from(&sample())).unwrap();

        assert!(document.get_str("_id").is_ok());
        assert_eq!(document.get_str("type").unwrap(), "other");
        assert_eq!(document.get_str("source").unwrap(), "farmer_market");
        assert!(document.get_datetime("createdAt").is_ok());
        assert!(!document.contains_key("storageCondition"));
    }

    #[test]
    fn test_document_round_trip_preserves_item() {
        let item = sample();
        let restored = Item::try_from(ItemDocument::from(&item)).unwrap();
        assert_eq!(restored, item);
    }

    #[test]
    fn test_corrupt_id_is_internal_error() {
        let mut document = ItemDocument::from(&sample());
        document.id = "not-a-uuid".to_string();
        assert!(matches!(Item::try_from(document), Err(ItemError::Internal(_))));
    }

    #[test]
    fn test_schema_lists_every_enum_member() {
        let schema = item_schema();
        let properties = schema
            .get_document("$jsonSchema")
            .and_then(|s| s.get_document("properties"))
            .unwrap();

        let units = properties
            .get_document("unit")
            .and_then(|u| u.get_array("enum"))
            .unwrap();
        assert_eq!(units.len(), ItemUnit::values().len());

        let conditions = properties
            .get_document("storageCondition")
            .and_then(|u| u.get_array("enum"))
            .unwrap();
        assert!(conditions.contains(&bson::Bson::String("refrigerated".into())));
    }
}
