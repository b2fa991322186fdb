//! Ingredient Value Types
//!
//! Closed enumerations describing how an ingredient is measured, grouped,
//! bought and stored.

use serde::{Deserialize, Serialize};

/// Unit an ingredient quantity is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Kg,
    Ml,
    L,
    Cups,
    Tbsp,
    Tsp,
    Pieces,
    Units,
    Oz,
    Lb,
}

impl Unit {
    pub const ALL: [Unit; 11] = [
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Cups,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::Pieces,
        Unit::Units,
        Unit::Oz,
        Unit::Lb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Cups => "cups",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Pieces => "pieces",
            Unit::Units => "units",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
        }
    }
}

/// Ingredient category, used for grouping the list into sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Proteins,
    Dairy,
    Grains,
    Spices,
    Oils,
    Condiments,
    Beverages,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Proteins,
        Category::Dairy,
        Category::Grains,
        Category::Spices,
        Category::Oils,
        Category::Condiments,
        Category::Beverages,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Proteins => "proteins",
            Category::Dairy => "dairy",
            Category::Grains => "grains",
            Category::Spices => "spices",
            Category::Oils => "oils",
            Category::Condiments => "condiments",
            Category::Beverages => "beverages",
            Category::Other => "other",
        }
    }

    /// Section heading shown above items of this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vegetables => "VEGETABLES",
            Category::Fruits => "FRUITS",
            Category::Proteins => "PROTEINS",
            Category::Dairy => "DAIRY",
            Category::Grains => "GRAINS",
            Category::Spices => "SPICES",
            Category::Oils => "OILS",
            Category::Condiments => "CONDIMENTS",
            Category::Beverages => "BEVERAGES",
            Category::Other => "OTHER",
        }
    }
}

/// How often an ingredient is bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseFrequency {
    Weekly,
    Monthly,
}

impl PurchaseFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseFrequency::Weekly => "weekly",
            PurchaseFrequency::Monthly => "monthly",
        }
    }
}

/// How an ingredient is kept once bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Fresh,
    Frozen,
    Pantry,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Fresh => "fresh",
            StorageType::Frozen => "frozen",
            StorageType::Pantry => "pantry",
        }
    }
}

impl_token_traits!(Unit, "unit", [
    Unit::G, Unit::Kg, Unit::Ml, Unit::L, Unit::Cups, Unit::Tbsp,
    Unit::Tsp, Unit::Pieces, Unit::Units, Unit::Oz, Unit::Lb,
]);
impl_token_traits!(Category, "category", [
    Category::Vegetables, Category::Fruits, Category::Proteins, Category::Dairy,
    Category::Grains, Category::Spices, Category::Oils, Category::Condiments,
    Category::Beverages, Category::Other,
]);
impl_token_traits!(PurchaseFrequency, "purchase frequency", [
    PurchaseFrequency::Weekly, PurchaseFrequency::Monthly,
]);
impl_token_traits!(StorageType, "storage type", [
    StorageType::Fresh, StorageType::Frozen, StorageType::Pantry,
]);

/// A measured ingredient as it appears in a meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(with = "quantity_serde")]
    pub quantity: f64,
    pub unit: Unit,
    pub category: Category,
    pub purchase_frequency: PurchaseFrequency,
    pub storage_type: StorageType,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: Unit,
        category: Category,
        purchase_frequency: PurchaseFrequency,
        storage_type: StorageType,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
            category,
            purchase_frequency,
            storage_type,
        }
    }
}

/// JSON has no NaN or infinity, so non-finite quantities are written as the
/// strings `"NaN"`, `"inf"` and `"-inf"`. A `null` quantity reads back as NaN.
pub(crate) mod quantity_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Stored>::deserialize(deserializer)? {
            Some(Stored::Number(n)) => Ok(n),
            Some(Stored::Text(text)) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid quantity: {}", text))),
            None => Ok(f64::NAN),
        }
    }

    /// Same encoding for an optional quantity; a missing field stays `None`
    /// when paired with `#[serde(default)]`.
    pub mod option {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(quantity) => super::serialize(quantity, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<f64>, D::Error> {
            super::deserialize(deserializer).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_unit_tokens() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!(" KG ".parse::<Unit>().unwrap(), Unit::Kg);
        assert!("stone".parse::<Unit>().is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Fruits.label(), "FRUITS");
        assert_eq!(Category::Vegetables.label(), "VEGETABLES");
        for category in Category::ALL {
            assert_eq!(category.label(), category.as_str().to_ascii_uppercase());
        }
    }

    #[test]
    fn test_ingredient_json_shape() {
        let ingredient = Ingredient::new(
            "Oats",
            500.0,
            Unit::G,
            Category::Grains,
            PurchaseFrequency::Monthly,
            StorageType::Pantry,
        );
        let json = serde_json::to_value(&ingredient).unwrap();
        assert_eq!(json["purchaseFrequency"], "monthly");
        assert_eq!(json["storageType"], "pantry");
        assert_eq!(json["unit"], "g");
    }

    #[test]
    fn test_non_finite_quantity_round_trips() {
        let mut ingredient = Ingredient::new(
            "Salt",
            f64::NAN,
            Unit::Tsp,
            Category::Spices,
            PurchaseFrequency::Monthly,
            StorageType::Pantry,
        );
        let json = serde_json::to_value(&ingredient).unwrap();
        assert_eq!(json["quantity"], "NaN");
        let back: Ingredient = serde_json::from_value(json).unwrap();
        assert!(back.quantity.is_nan());

        ingredient.quantity = f64::NEG_INFINITY;
        let json = serde_json::to_string(&ingredient).unwrap();
        let back: Ingredient = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quantity, f64::NEG_INFINITY);

        ingredient.quantity = 2.5;
        let json = serde_json::to_value(&ingredient).unwrap();
        assert_eq!(json["quantity"], 2.5);
    }

    #[test]
    fn test_null_quantity_reads_as_nan() {
        let json = serde_json::json!({
            "name": "Salt",
            "quantity": null,
            "unit": "tsp",
            "category": "spices",
            "purchaseFrequency": "monthly",
            "storageType": "pantry",
        });
        let ingredient: Ingredient = serde_json::from_value(json).unwrap();
        assert!(ingredient.quantity.is_nan());
    }

    #[test]
    fn test_unknown_token_error_message() {
        let err = "liquid".parse::<StorageType>().unwrap_err();
        assert_eq!(err, DomainError::InvalidInput("unknown storage type: liquid".to_string()));
    }
}
