//! Grocery List Store
//!
//! Authoritative item list plus the two view filters. Every mutation is
//! written through to the key-value store without waiting for the write.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{
    DomainError, DomainResult, Entity, GroceryItem, NewGroceryItem, StorageFilter, ViewMode,
};
use crate::pipeline::{self, CategorySection};
use crate::repository::{decode, encode, KeyValueStore, WriteThrough};
use crate::seed::seed_items;

/// Namespace key the grocery state is stored under
pub const GROCERY_STORAGE_KEY: &str = "grocery-storage";

const GROCERY_STATE_VERSION: u32 = 0;

/// Fields written to storage
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedGroceryRef<'a> {
    items: &'a [GroceryItem],
    view_mode: ViewMode,
    storage_filter: StorageFilter,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedGrocery {
    items: Vec<GroceryItem>,
    #[serde(default)]
    view_mode: ViewMode,
    #[serde(default)]
    storage_filter: StorageFilter,
}

/// Completion summary for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub checked: usize,
    pub percentage: u32,
}

pub struct GroceryStore {
    items: Vec<GroceryItem>,
    view_mode: ViewMode,
    storage_filter: StorageFilter,
    /// Set once persisted state has been read back; never written
    hydrated: bool,
    key: String,
    writer: WriteThrough,
}

impl GroceryStore {
    /// Open the store under the default key
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(kv, GROCERY_STORAGE_KEY).await
    }

    /// Read persisted state under `key`, falling back to the seed list when
    /// nothing usable is stored
    pub async fn open_with_key(kv: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let restored = match kv.get(key).await {
            Ok(Some(bytes)) => match decode::<PersistedGrocery>(&bytes, GROCERY_STATE_VERSION) {
                Ok(state) => Some(state),
                Err(e) => {
                    log::warn!("Discarding persisted grocery state: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read grocery state: {}", e);
                None
            }
        };

        let writer = WriteThrough::spawn(kv);
        let mut store = Self {
            items: seed_items(),
            view_mode: ViewMode::default(),
            storage_filter: StorageFilter::default(),
            hydrated: false,
            key: key.to_string(),
            writer,
        };

        if let Some(state) = restored {
            log::info!("Restored {} grocery items", state.items.len());
            store.items = state.items;
            store.view_mode = state.view_mode;
            store.storage_filter = state.storage_filter;
            store.hydrated = true;
        }
        store
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn storage_filter(&self) -> StorageFilter {
        self.storage_filter
    }

    /// Whether state came from storage rather than the seed list
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Sections for the current filters
    pub fn sections(&self) -> Vec<CategorySection<'_>> {
        pipeline::get_filtered_and_grouped_items(&self.items, self.view_mode, self.storage_filter)
    }

    /// Progress over the whole list
    pub fn progress(&self) -> Progress {
        Progress {
            total: pipeline::get_total_item_count(&self.items),
            checked: pipeline::get_checked_item_count(&self.items),
            percentage: pipeline::get_completion_percentage(&self.items),
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.persist();
    }

    pub fn set_storage_filter(&mut self, filter: StorageFilter) {
        self.storage_filter = filter;
        self.persist();
    }

    /// Flip the checked flag; unknown ids are ignored
    pub fn toggle_item_check(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.checked = !item.checked;
        }
        self.persist();
    }

    /// Set the quantity and record it as a user override. No validation.
    pub fn update_item_quantity(&mut self, id: &str, quantity: f64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.ingredient.quantity = quantity;
            item.custom_quantity = Some(quantity);
        }
        self.persist();
    }

    /// Append a user-added item and return its generated id
    pub fn add_custom_item(&mut self, data: NewGroceryItem) -> String {
        let id = pipeline::generate_grocery_item_id(&self.items);
        self.items.push(GroceryItem {
            id: id.clone(),
            ingredient: data.ingredient,
            checked: false,
            is_custom: true,
            source_meals: data.source_meals,
            custom_quantity: None,
        });
        self.persist();
        id
    }

    /// Remove the item with `id`, custom or not
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
        self.persist();
    }

    /// Back to the seed list and default filters
    pub fn reset_items(&mut self) {
        self.items = seed_items();
        self.view_mode = ViewMode::default();
        self.storage_filter = StorageFilter::default();
        self.persist();
    }

    /// Drop every checked item, returning how many were removed
    pub fn clear_checked_items(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        self.persist();
        before - self.items.len()
    }

    /// Wait for queued writes to reach storage
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Allow-listed snapshot of the state that goes to storage
    fn partialize(&self) -> PersistedGroceryRef<'_> {
        PersistedGroceryRef {
            items: &self.items,
            view_mode: self.view_mode,
            storage_filter: self.storage_filter,
        }
    }

    fn snapshot(&self) -> DomainResult<Vec<u8>> {
        encode(&self.partialize(), GROCERY_STATE_VERSION)
    }

    fn persist(&self) {
        match self.snapshot() {
            Ok(bytes) => self.writer.submit(&self.key, bytes),
            Err(e) => log::error!("Failed to serialize grocery state: {}", e),
        }
    }
}

impl std::fmt::Debug for GroceryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroceryStore")
            .field("items", &self.items.len())
            .field("view_mode", &self.view_mode)
            .field("storage_filter", &self.storage_filter)
            .field("hydrated", &self.hydrated)
            .finish()
    }
}

/// Look up an item or report it missing
pub fn require_item<'a>(store: &'a GroceryStore, id: &str) -> DomainResult<&'a GroceryItem> {
    store
        .item(id)
        .ok_or_else(|| DomainError::NotFound(format!("grocery item {}", id)))
}
