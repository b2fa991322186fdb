//! Grocery List Commands
//!
//! Handlers a UI calls. Input parsing and the policies the store leaves to
//! its caller (positive quantities, custom-only removal) live here.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, GroceryItem, Ingredient, NewGroceryItem, PurchaseFrequency, StorageFilter,
    StorageType, Unit, ViewMode,
};
use crate::pipeline::{format_quantity, CategorySection};
use crate::store::{require_item, Progress};
use crate::AppState;

/// One rendered line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: GroceryItem,
    /// e.g. `200g`
    pub display_quantity: String,
}

/// One rendered section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub category: Category,
    pub label: String,
    pub items: Vec<ItemView>,
}

impl From<&CategorySection<'_>> for SectionView {
    fn from(section: &CategorySection<'_>) -> Self {
        Self {
            category: section.category,
            label: section.label.to_string(),
            items: section
                .items
                .iter()
                .map(|item| ItemView {
                    item: (*item).clone(),
                    display_quantity: format_quantity(item.quantity(), item.unit()),
                })
                .collect(),
        }
    }
}

/// Everything the grocery screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListView {
    pub view_mode: ViewMode,
    pub storage_filter: StorageFilter,
    pub sections: Vec<SectionView>,
    pub progress: Progress,
}

/// Raw form input for a user-added item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomItemInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub purchase_frequency: String,
    pub storage_type: String,
}

/// Parse a user-entered quantity; must be a finite number above zero
pub fn parse_quantity(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => Ok(q),
        _ => Err(format!("Please enter a valid quantity (got '{}')", raw.trim())),
    }
}

/// Current list under the active filters
pub async fn get_grocery_list(state: &AppState) -> Result<GroceryListView, String> {
    let store = state.grocery.lock().await;

    Ok(GroceryListView {
        view_mode: store.view_mode(),
        storage_filter: store.storage_filter(),
        sections: store.sections().iter().map(SectionView::from).collect(),
        progress: store.progress(),
    })
}

pub async fn set_view_mode(state: &AppState, mode: &str) -> Result<(), String> {
    let mode: ViewMode = mode.parse().map_err(|e| format!("{}", e))?;
    state.grocery.lock().await.set_view_mode(mode);
    Ok(())
}

pub async fn set_storage_filter(state: &AppState, filter: &str) -> Result<(), String> {
    let filter: StorageFilter = filter.parse().map_err(|e| format!("{}", e))?;
    state.grocery.lock().await.set_storage_filter(filter);
    Ok(())
}

/// Toggle checked status, returning the new value
pub async fn toggle_item(state: &AppState, id: &str) -> Result<bool, String> {
    let mut store = state.grocery.lock().await;
    require_item(&store, id).map_err(|e| e.to_string())?;

    store.toggle_item_check(id);
    Ok(require_item(&store, id).map_err(|e| e.to_string())?.checked)
}

pub async fn update_item_quantity(
    state: &AppState,
    id: &str,
    raw: &str,
) -> Result<GroceryItem, String> {
    let quantity = parse_quantity(raw)?;
    let mut store = state.grocery.lock().await;
    require_item(&store, id).map_err(|e| e.to_string())?;

    store.update_item_quantity(id, quantity);
    require_item(&store, id).cloned().map_err(|e| e.to_string())
}

/// Validate form input and append the item
pub async fn add_custom_item(
    state: &AppState,
    input: CustomItemInput,
) -> Result<GroceryItem, String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err("Item name is required".to_string());
    }
    let quantity = parse_quantity(&input.quantity)?;
    let unit: Unit = input.unit.parse().map_err(|e| format!("{}", e))?;
    let category: Category = input.category.parse().map_err(|e| format!("{}", e))?;
    let frequency: PurchaseFrequency = input
        .purchase_frequency
        .parse()
        .map_err(|e| format!("{}", e))?;
    let storage: StorageType = input.storage_type.parse().map_err(|e| format!("{}", e))?;

    let ingredient = Ingredient::new(name, quantity, unit, category, frequency, storage);
    let data = NewGroceryItem::from(ingredient);

    let mut store = state.grocery.lock().await;
    let id = store.add_custom_item(data);
    log::info!("Added custom grocery item {} ({})", id, name);
    require_item(&store, &id).cloned().map_err(|e| e.to_string())
}

/// Remove a user-added item. Items derived from the meal plan stay.
pub async fn remove_item(state: &AppState, id: &str) -> Result<(), String> {
    let mut store = state.grocery.lock().await;
    let item = require_item(&store, id).map_err(|e| e.to_string())?;
    if !item.is_custom {
        return Err(format!(
            "Only custom items can be removed ({} comes from your meal plan)",
            item.name()
        ));
    }

    store.remove_item(id);
    Ok(())
}

pub async fn reset_items(state: &AppState) -> Result<(), String> {
    state.grocery.lock().await.reset_items();
    log::info!("Grocery list reset to meal plan");
    Ok(())
}

/// Returns the number of items removed
pub async fn clear_checked_items(state: &AppState) -> Result<usize, String> {
    Ok(state.grocery.lock().await.clear_checked_items())
}
