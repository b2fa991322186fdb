//! Mock grocery list the store starts from and resets to.

use crate::domain::{
    Category, GroceryItem, Ingredient, PurchaseFrequency, StorageType, Unit,
};

use Category::*;
use PurchaseFrequency::*;
use StorageType::*;

type SeedRow = (
    &'static str,
    &'static str,
    f64,
    Unit,
    Category,
    PurchaseFrequency,
    StorageType,
    &'static [&'static str],
);

const SEED: [SeedRow; 10] = [
    ("g1", "Spinach", 200.0, Unit::G, Vegetables, Weekly, Fresh, &["m1", "m4"]),
    ("g2", "Bananas", 6.0, Unit::Pieces, Fruits, Weekly, Fresh, &["m2"]),
    ("g3", "Chicken breast", 1.2, Unit::Kg, Proteins, Weekly, Fresh, &["m1", "m3", "m5"]),
    ("g4", "Greek yogurt", 500.0, Unit::G, Dairy, Weekly, Fresh, &["m2"]),
    ("g5", "Brown rice", 2.0, Unit::Kg, Grains, Monthly, Pantry, &["m1", "m3"]),
    ("g6", "Olive oil", 1.0, Unit::L, Oils, Monthly, Pantry, &[]),
    ("g7", "Ground cumin", 50.0, Unit::G, Spices, Monthly, Pantry, &["m3"]),
    ("g8", "Mixed berries", 500.0, Unit::G, Fruits, Weekly, Frozen, &["m2"]),
    ("g9", "Green peas", 400.0, Unit::G, Vegetables, Weekly, Frozen, &["m5"]),
    ("g10", "Salmon fillets", 4.0, Unit::Pieces, Proteins, Weekly, Frozen, &["m4"]),
];

/// Fresh copy of the seed list
pub fn seed_items() -> Vec<GroceryItem> {
    SEED.iter()
        .map(|&(id, name, quantity, unit, category, freq, storage, meals)| {
            let item = GroceryItem::from_ingredient(
                id,
                Ingredient::new(name, quantity, unit, category, freq, storage),
            );
            if meals.is_empty() {
                item
            } else {
                item.with_source_meals(meals.iter().copied())
            }
        })
        .collect()
}
