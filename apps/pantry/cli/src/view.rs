//! Terminal list state: items, loading flag, last error

use domain_items::Item;
use std::fmt::Write;

use crate::client::{ItemDraft, ItemsApi};

/// What the terminal shows
///
/// Every operation leaves the list untouched on failure and records the
/// error message instead.
#[derive(Debug, Default)]
pub struct ItemsView {
    items: Vec<Item>,
    loading: bool,
    last_error: Option<String>,
}

impl ItemsView {
    /// A fresh view is loading until the first [`ItemsView::refresh`].
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Item at a 1-based list position
    pub fn item_at(&self, position: usize) -> Option<&Item> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub async fn refresh<A: ItemsApi + ?Sized>(&mut self, api: &A) {
        self.loading = true;
        match api.list_items().await {
            Ok(items) => self.items = items,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Create and prepend. A blank name is ignored without calling the API.
    pub async fn add<A: ItemsApi + ?Sized>(&mut self, api: &A, draft: ItemDraft) {
        if draft.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return;
        }

        self.loading = true;
        self.last_error = None;
        match api.create_item(&draft).await {
            Ok(created) => self.items.insert(0, created),
            Err(e) => self.last_error = Some(e.to_string()),
        }
        self.loading = false;
    }

    pub async fn edit<A: ItemsApi + ?Sized>(&mut self, api: &A, id: &str, draft: ItemDraft) {
        self.loading = true;
        self.last_error = None;
        match api.update_item(id, &draft).await {
            Ok(updated) => self.replace(updated),
            Err(e) => self.last_error = Some(e.to_string()),
        }
        self.loading = false;
    }

    pub async fn toggle<A: ItemsApi + ?Sized>(&mut self, api: &A, id: &str) {
        match api.toggle_item(id).await {
            Ok(updated) => self.replace(updated),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    pub async fn delete<A: ItemsApi + ?Sized>(&mut self, api: &A, id: &str) {
        match api.delete_item(id).await {
            Ok(()) => self.items.retain(|item| item.id.to_string() != id),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn replace(&mut self, updated: Item) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) {
            *slot = updated;
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(error) = &self.last_error {
            let _ = writeln!(out, "Error: {}", error);
        }
        if self.loading {
            let _ = writeln!(out, "Loading...");
        } else if self.items.is_empty() {
            let _ = writeln!(out, "No items yet. Add your first item!");
        }

        for (index, item) in self.items.iter().enumerate() {
            let _ = writeln!(out, "{}", render_item(index + 1, item));
        }
        out
    }
}

fn render_item(position: usize, item: &Item) -> String {
    let mark = if item.completed { "x" } else { " " };
    format!(
        "{:>3}. [{}] {} ({} {}, {})",
        position, mark, item.name, item.quantity, item.unit, item.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, MockItemsApi};
    use chrono::Utc;
    use domain_items::{CreateItem, ItemCategory, ItemUnit};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn item(name: &str) -> Item {
        Item::from_create(Uuid::now_v7(), CreateItem::named(name), Utc::now())
    }

    fn loaded(items: Vec<Item>) -> ItemsView {
        ItemsView {
            items,
            loading: false,
            last_error: None,
        }
    }

    #[test]
    fn test_new_view_renders_loading() {
        assert_eq!(ItemsView::new().render(), "Loading...\n");
    }

    #[test]
    fn test_empty_view_renders_hint() {
        assert_eq!(
            loaded(vec![]).render(),
            "No items yet. Add your first item!\n"
        );
    }

    #[test]
    fn test_render_item_line() {
        let mut milk = item("Milk");
        milk.quantity = 2.0;
        milk.unit = ItemUnit::Liter;
        milk.category = ItemCategory::Dairy;
        milk.completed = true;

        assert_eq!(render_item(1, &milk), "  1. [x] Milk (2 liter, dairy)");
    }

    #[tokio::test]
    async fn test_refresh_loads_items() {
        let items = vec![item("B"), item("A")];
        let expected = items.clone();
        let mut api = MockItemsApi::new();
        api.expect_list_items()
            .times(1)
            .returning(move || Ok(items.clone()));

        let mut view = ItemsView::new();
        view.refresh(&api).await;

        assert!(!view.loading);
        assert_eq!(view.items.as_slice(), expected.as_slice());
        assert_eq!(view.item_at(1).map(|i| i.name.as_str()), Some("B"));
        assert!(view.item_at(0).is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_message() {
        let mut api = MockItemsApi::new();
        api.expect_list_items()
            .returning(|| Err(ClientError::Api("Failed to list items".to_string())));

        let mut view = ItemsView::new();
        view.refresh(&api).await;

        assert_eq!(view.last_error(), Some("Failed to list items"));
        assert!(view.render().starts_with("Error: Failed to list items\n"));
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let existing = item("Old");
        let created = item("New");
        let returned = created.clone();
        let mut api = MockItemsApi::new();
        api.expect_create_item()
            .withf(|draft| draft.name.as_deref() == Some("New"))
            .returning(move |_| Ok(returned.clone()));

        let mut view = loaded(vec![existing.clone()]);
        view.add(
            &api,
            ItemDraft {
                name: Some("New".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(view.items.as_slice(), &[created, existing]);
    }

    #[tokio::test]
    async fn test_add_blank_name_is_ignored() {
        let mut api = MockItemsApi::new();
        api.expect_create_item().never();

        let mut view = loaded(vec![]);
        view.add(
            &api,
            ItemDraft {
                name: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(view.items.as_slice().is_empty());
        assert!(view.last_error().is_none());
    }

    #[tokio::test]
    async fn test_toggle_replaces_in_place() {
        let first = item("First");
        let second = item("Second");
        let mut toggled = second.clone();
        toggled.completed = true;
        let returned = toggled.clone();
        let id = second.id.to_string();

        let mut api = MockItemsApi::new();
        api.expect_toggle_item()
            .with(eq(id.clone()))
            .returning(move |_| Ok(returned.clone()));

        let mut view = loaded(vec![first.clone(), second]);
        view.toggle(&api, &id).await;

        assert_eq!(view.items.as_slice(), &[first, toggled]);
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_list_unchanged() {
        let original = item("Bread");
        let id = original.id.to_string();
        let mut api = MockItemsApi::new();
        api.expect_update_item()
            .returning(|_, _| Err(ClientError::Api("name is required".to_string())));

        let mut view = loaded(vec![original.clone()]);
        view.edit(
            &api,
            &id,
            ItemDraft {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(view.items.as_slice(), &[original]);
        assert_eq!(view.last_error(), Some("name is required"));
    }

    #[tokio::test]
    async fn test_delete_removes_and_failure_keeps() {
        let keep = item("Keep");
        let gone = item("Gone");
        let gone_id = gone.id.to_string();
        let keep_id = keep.id.to_string();

        let mut api = MockItemsApi::new();
        api.expect_delete_item()
            .with(eq(gone_id.clone()))
            .returning(|_| Ok(()));
        api.expect_delete_item()
            .with(eq(keep_id.clone()))
            .returning(|_| Err(ClientError::Api("Failed to delete item".to_string())));

        let mut view = loaded(vec![keep.clone(), gone]);
        view.delete(&api, &gone_id).await;
        assert_eq!(view.items.as_slice(), &[keep.clone()]);

        view.delete(&api, &keep_id).await;
        assert_eq!(view.items.as_slice(), &[keep]);
        assert_eq!(view.last_error(), Some("Failed to delete item"));
    }
}
