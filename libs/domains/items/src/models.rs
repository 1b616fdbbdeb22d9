use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Longest accepted item name, in characters
pub const MAX_NAME_LEN: usize = 200;

/// Quantity assigned when a create request omits it
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Implemented by every closed value set an [`Item`] field draws from.
///
/// `FIELD` is the JSON key the set populates; parse failures name it
/// (e.g. `invalid unit`), and the store schema is generated from `values()`.
pub trait ItemEnum: IntoEnumIterator + std::fmt::Display {
    const FIELD: &'static str;

    fn values() -> Vec<String> {
        Self::iter().map(|v| v.to_string()).collect()
    }
}

macro_rules! item_enum {
    ($ty:ty, $field:literal) => {
        impl ItemEnum for $ty {
            const FIELD: &'static str = $field;
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse()
                    .map_err(|_| de::Error::custom(concat!("invalid ", $field)))
            }
        }
    };
}

/// Unit of measure
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemUnit {
    #[default]
    Piece,
    Gram,
    Kilogram,
    Liter,
    Milliliter,
    Packet,
}
item_enum!(ItemUnit, "unit");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Fruit,
    Vegetable,
    Dairy,
    Meat,
    Grain,
    Snack,
    Beverage,
    Supplement,
    #[default]
    Other,
}
item_enum!(ItemCategory, "category");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemType {
    Food,
    Beverage,
    Supplement,
    #[default]
    Other,
}
item_enum!(ItemType, "type");

/// Stock status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Available,
    OutOfStock,
    Expired,
}
item_enum!(ItemStatus, "status");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemPriority {
    Low,
    #[default]
    Medium,
    High,
}
item_enum!(ItemPriority, "priority");

/// Where the item was bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemSource {
    Store,
    FarmerMarket,
    Online,
    Other,
}
item_enum!(ItemSource, "source");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StorageCondition {
    RoomTemperature,
    Refrigerated,
    Frozen,
}
item_enum!(StorageCondition, "storageCondition");

/// Current time at the store's millisecond precision.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(message_error("required", "name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(message_error(
            "length",
            "name must be at most 200 characters",
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: f64) -> Result<(), ValidationError> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(message_error(
            "range",
            "quantity must be a non-negative number",
        ))
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A pantry or shopping-list entry.
///
/// `validate()` checks the invariants the store enforces on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier (UUIDv7, time ordered)
    pub id: Uuid,
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_quantity"))]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create request: every field but `name` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(
        required(message = "name is required"),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: Option<f64>,
    pub unit: Option<ItemUnit>,
    pub category: Option<ItemCategory>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub status: Option<ItemStatus>,
    pub priority: Option<ItemPriority>,
    pub source: Option<ItemSource>,
    pub storage_condition: Option<StorageCondition>,
    pub notes: Option<String>,
}

impl CreateItem {
    /// Shorthand for a request carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Trim free-text fields; blank notes are dropped.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.notes = trimmed(self.notes);
        self
    }
}

/// Partial update: only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: Option<f64>,
    pub unit: Option<ItemUnit>,
    pub category: Option<ItemCategory>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub status: Option<ItemStatus>,
    pub priority: Option<ItemPriority>,
    pub source: Option<ItemSource>,
    pub storage_condition: Option<StorageCondition>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateItem {
    /// Trim free-text fields. A blank `notes` clears the stored notes.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.notes = self.notes.map(|n| n.trim().to_string());
        self
    }
}

impl Item {
    /// Build a new item from a validated create request.
    ///
    /// `id` and `now` come from the store; createdAt and updatedAt start equal.
    pub fn from_create(id: Uuid, input: CreateItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name.unwrap_or_default(),
            quantity: input.quantity.unwrap_or(DEFAULT_QUANTITY),
            unit: input.unit.unwrap_or_default(),
            category: input.category.unwrap_or_default(),
            item_type: input.item_type.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            source: input.source,
            storage_condition: input.storage_condition,
            notes: input.notes,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields and advance `updated_at`.
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(item_type) = update.item_type {
            self.item_type = item_type;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(source) = update.source {
            self.source = Some(source);
        }
        if let Some(storage_condition) = update.storage_condition {
            self.storage_condition = Some(storage_condition);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes).filter(|n| !n.is_empty());
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.touch();
    }

    /// Flip `completed` and advance `updated_at`.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    /// Set `updated_at` to now, or 1ms past its previous value when the clock
    /// has not moved on, so every mutation is observable.
    pub fn touch(&mut self) {
        let now = now_millis();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::milliseconds(1)
        };
    }
}
