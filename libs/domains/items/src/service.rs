//! Item Service - validation and orchestration over an [`ItemRepository`]

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

/// Identifiers arrive as path text; anything that is not a UUID cannot exist.
fn parse_id(id: &str) -> ItemResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| ItemError::NotFound(id.to_string()))
}

/// Item service providing the item operations exposed over HTTP
///
/// Every input is normalized and validated here before the repository is
/// touched, so a rejected request never reaches the store.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All items, newest first
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input), fields(item_name = ?input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let input = input.normalized();
        input.validate()?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ItemResult<Item> {
        let uuid = parse_id(id)?;
        self.repository
            .get_by_id(uuid)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: &str, input: UpdateItem) -> ItemResult<Item> {
        let uuid = parse_id(id)?;
        let input = input.normalized();
        input.validate()?;

        self.repository.update(uuid, input).await
    }

    /// Negate `completed`
    #[instrument(skip(self))]
    pub async fn toggle_item(&self, id: &str) -> ItemResult<Item> {
        let uuid = parse_id(id)?;
        self.repository.toggle_completed(uuid).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemResult<()> {
        let uuid = parse_id(id)?;
        self.repository.delete(uuid).await
    }

    /// Readiness probe: succeeds when the store answers
    #[instrument(skip(self))]
    pub async fn check_store(&self) -> ItemResult<()> {
        self.repository.ping().await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemUnit, now_millis};
    use crate::repository::{InMemoryItemRepository, MockItemRepository};
    use mockall::predicate;

    fn stored(input: CreateItem) -> Item {
        Item::from_create(Uuid::now_v7(), input, now_millis())
    }

    #[tokio::test]
    async fn test_create_trims_and_persists() {
        let mut repo = MockItemRepository::new();
        repo.expect_create()
            .with(predicate::eq(CreateItem::named("Milk")))
            .times(1)
            .returning(|input| Ok(stored(input)));

        let service = ItemService::new(repo);
        let item = service
            .create_item(CreateItem::named("  Milk "))
            .await
            .unwrap();

        assert_eq!(item.name, "Milk");
    }

    #[tokio::test]
    async fn test_create_invalid_never_reaches_store() {
        let mut repo = MockItemRepository::new();
        repo.expect_create().never();
        let service = ItemService::new(repo);

        for input in [
            CreateItem::default(),
            CreateItem::named(""),
            CreateItem {
                quantity: Some(-1.0),
                ..CreateItem::named("Milk")
            },
        ] {
            let result = service.create_item(input).await;
            assert!(matches!(result, Err(ItemError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_get_by_id().never();
        let service = ItemService::new(repo);

        let result = service.get_item("definitely-not-an-id").await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockItemRepository::new();
        repo.expect_get_by_id()
            .with(predicate::eq(id))
            .returning(|_| Ok(None));

        let service = ItemService::new(repo);
        let result = service.get_item(&id.to_string()).await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name_before_store() {
        let mut repo = MockItemRepository::new();
        repo.expect_update().never();
        let service = ItemService::new(repo);

        let update = UpdateItem {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let result = service.update_item(&Uuid::now_v7().to_string(), update).await;
        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut repo = MockItemRepository::new();
        repo.expect_list()
            .returning(|| Err(ItemError::Database("connection refused".to_string())));
        repo.expect_ping()
            .returning(|| Err(ItemError::Database("connection refused".to_string())));

        let service = ItemService::new(repo);
        assert!(matches!(
            service.list_items().await,
            Err(ItemError::Database(_))
        ));
        assert!(service.check_store().await.is_err());
    }

    #[tokio::test]
    async fn test_defaults_on_minimal_create() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let item = service.create_item(CreateItem::named("Salt")).await.unwrap();

        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.unit, ItemUnit::Piece);
        assert!(!item.completed);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let a = service.create_item(CreateItem::named("A")).await.unwrap();
        let b = service.create_item(CreateItem::named("B")).await.unwrap();

        let list = service.list_items().await.unwrap();
        assert_eq!(list, vec![b, a]);
    }

    #[tokio::test]
    async fn test_toggle_three_times_alternates() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let item = service.create_item(CreateItem::named("Jam")).await.unwrap();
        let id = item.id.to_string();

        let mut seen = Vec::new();
        let mut last_updated = item.updated_at;
        for _ in 0..3 {
            let toggled = service.toggle_item(&id).await.unwrap();
            assert!(toggled.updated_at > last_updated);
            last_updated = toggled.updated_at;
            seen.push(toggled.completed);
        }

        assert_eq!(seen, vec![true, false, true]);
    }

    #[tokio::test]
    async fn test_update_changes_only_name() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let item = service
            .create_item(CreateItem {
                quantity: Some(3.0),
                unit: Some(ItemUnit::Packet),
                ..CreateItem::named("Pasta")
            })
            .await
            .unwrap();

        let updated = service
            .update_item(
                &item.id.to_string(),
                UpdateItem {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(
            Item {
                name: item.name.clone(),
                updated_at: item.updated_at,
                ..updated.clone()
            },
            item
        );
        assert!(updated.updated_at > item.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let item = service.create_item(CreateItem::named("Oil")).await.unwrap();
        let id = item.id.to_string();

        service.delete_item(&id).await.unwrap();
        assert!(matches!(
            service.get_item(&id).await,
            Err(ItemError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_item(&id).await,
            Err(ItemError::NotFound(_))
        ));
    }
}
