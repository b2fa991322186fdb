//! Grocery Item Entity
//!
//! A shopping-list entry derived from an ingredient, plus the view filters
//! applied to the list.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ingredient::{quantity_serde, Category, Ingredient, PurchaseFrequency, StorageType, Unit};

/// A single grocery list line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// Unique identifier, `g<N>`
    pub id: String,
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub checked: bool,
    /// Added by the user rather than derived from a meal plan
    pub is_custom: bool,
    /// Meals this item was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_meals: Option<Vec<String>>,
    /// Quantity the user overrode
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "quantity_serde::option"
    )]
    pub custom_quantity: Option<f64>,
}

impl GroceryItem {
    /// Create an unchecked item derived from a meal plan
    pub fn from_ingredient(id: impl Into<String>, ingredient: Ingredient) -> Self {
        Self {
            id: id.into(),
            ingredient,
            checked: false,
            is_custom: false,
            source_meals: None,
            custom_quantity: None,
        }
    }

    pub fn with_source_meals<I, S>(mut self, meals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_meals = Some(meals.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.ingredient.name
    }

    pub fn quantity(&self) -> f64 {
        self.ingredient.quantity
    }

    pub fn unit(&self) -> Unit {
        self.ingredient.unit
    }

    pub fn category(&self) -> Category {
        self.ingredient.category
    }

    pub fn purchase_frequency(&self) -> PurchaseFrequency {
        self.ingredient.purchase_frequency
    }

    pub fn storage_type(&self) -> StorageType {
        self.ingredient.storage_type
    }
}

impl Entity for GroceryItem {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for a user-added item; id and flags are assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroceryItem {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    #[serde(default)]
    pub source_meals: Option<Vec<String>>,
}

impl From<Ingredient> for NewGroceryItem {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            ingredient,
            source_meals: None,
        }
    }
}

/// Frequency view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Weekly,
    Monthly,
    #[default]
    All,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Weekly => "weekly",
            ViewMode::Monthly => "monthly",
            ViewMode::All => "all",
        }
    }

    /// `None` means every frequency passes
    pub fn frequency(&self) -> Option<PurchaseFrequency> {
        match self {
            ViewMode::Weekly => Some(PurchaseFrequency::Weekly),
            ViewMode::Monthly => Some(PurchaseFrequency::Monthly),
            ViewMode::All => None,
        }
    }
}

/// Storage-type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFilter {
    Fresh,
    Frozen,
    Pantry,
    #[default]
    All,
}

impl StorageFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageFilter::Fresh => "fresh",
            StorageFilter::Frozen => "frozen",
            StorageFilter::Pantry => "pantry",
            StorageFilter::All => "all",
        }
    }

    /// `None` means every storage type passes
    pub fn storage_type(&self) -> Option<StorageType> {
        match self {
            StorageFilter::Fresh => Some(StorageType::Fresh),
            StorageFilter::Frozen => Some(StorageType::Frozen),
            StorageFilter::Pantry => Some(StorageType::Pantry),
            StorageFilter::All => None,
        }
    }
}

impl_token_traits!(ViewMode, "view mode", [ViewMode::Weekly, ViewMode::Monthly, ViewMode::All]);
impl_token_traits!(StorageFilter, "storage filter", [
    StorageFilter::Fresh,
    StorageFilter::Frozen,
    StorageFilter::Pantry,
    StorageFilter::All,
]);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroceryItem {
        GroceryItem::from_ingredient(
            "g7",
            Ingredient::new(
                "Spinach",
                200.0,
                Unit::G,
                Category::Vegetables,
                PurchaseFrequency::Weekly,
                StorageType::Fresh,
            ),
        )
    }

    #[test]
    fn test_item_creation() {
        let item = sample();
        assert_eq!(item.id(), "g7");
        assert_eq!(item.name(), "Spinach");
        assert!(!item.checked);
        assert!(!item.is_custom);
    }

    #[test]
    fn test_item_json_is_flat() {
        let item = sample().with_source_meals(["m1"]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Spinach");
        assert_eq!(json["isCustom"], false);
        assert_eq!(json["sourceMeals"][0], "m1");
        assert!(json.get("customQuantity").is_none());
        assert!(json.get("ingredient").is_none());

        let back: GroceryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_filter_tokens() {
        assert_eq!("Weekly".parse::<ViewMode>().unwrap(), ViewMode::Weekly);
        assert_eq!("all".parse::<StorageFilter>().unwrap(), StorageFilter::All);
        assert!("daily".parse::<ViewMode>().is_err());
        assert_eq!(" Pantry ".parse::<StorageFilter>().unwrap(), StorageFilter::Pantry);
        assert_eq!(StorageFilter::Frozen.to_string(), "frozen");
        let err = "yearly".parse::<ViewMode>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: unknown view mode: yearly");
        assert_eq!(ViewMode::default(), ViewMode::All);
        assert_eq!(StorageFilter::Frozen.storage_type(), Some(StorageType::Frozen));
        assert_eq!(ViewMode::All.frequency(), None);
    }
}
