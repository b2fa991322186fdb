//! Grocery List Pipeline
//!
//! Pure functions turning a flat item list into labelled category sections:
//! frequency filter, storage filter, category grouping, quantity formatting.
//! Filters hand back references into the input so nothing is copied until a
//! caller needs owned data.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{Category, GroceryItem, StorageFilter, Unit, ViewMode};

/// Items of one category under its display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySection<'a> {
    pub category: Category,
    pub label: &'static str,
    pub items: Vec<&'a GroceryItem>,
}

impl CategorySection<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Keep items bought at the given frequency; `All` keeps everything
pub fn filter_by_frequency<'a, I>(items: I, mode: ViewMode) -> Vec<&'a GroceryItem>
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    match mode.frequency() {
        None => items.into_iter().collect(),
        Some(freq) => items
            .into_iter()
            .filter(|item| item.purchase_frequency() == freq)
            .collect(),
    }
}

/// Keep items with the given storage type; `All` keeps everything
pub fn filter_by_storage_type<'a, I>(items: I, filter: StorageFilter) -> Vec<&'a GroceryItem>
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    match filter.storage_type() {
        None => items.into_iter().collect(),
        Some(storage) => items
            .into_iter()
            .filter(|item| item.storage_type() == storage)
            .collect(),
    }
}

/// Partition items by category. Sections come back sorted by label; items
/// keep their input order within a section.
pub fn group_by_category<'a, I>(items: I) -> Vec<CategorySection<'a>>
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    let mut groups: BTreeMap<Category, Vec<&'a GroceryItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category()).or_default().push(item);
    }

    let mut sections: Vec<CategorySection<'a>> = groups
        .into_iter()
        .map(|(category, items)| CategorySection {
            category,
            label: category.label(),
            items,
        })
        .collect();
    sections.sort_by(|a, b| a.label.cmp(b.label));
    sections
}

/// Frequency filter, then storage filter, then grouping
pub fn get_filtered_and_grouped_items(
    items: &[GroceryItem],
    mode: ViewMode,
    storage_filter: StorageFilter,
) -> Vec<CategorySection<'_>> {
    let by_frequency = filter_by_frequency(items, mode);
    let by_storage = filter_by_storage_type(by_frequency, storage_filter);
    group_by_category(by_storage)
}

pub fn get_total_item_count<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    items.into_iter().count()
}

pub fn get_checked_item_count<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    items.into_iter().filter(|item| item.checked).count()
}

/// Checked share of the list as a whole percentage; 0 for an empty list
pub fn get_completion_percentage<'a, I>(items: I) -> u32
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    let (total, checked) = items.into_iter().fold((0usize, 0usize), |(total, checked), item| {
        (total + 1, checked + usize::from(item.checked))
    });
    if total == 0 {
        return 0;
    }
    ((checked as f64 / total as f64) * 100.0).round() as u32
}

/// `2kg`, `1.5l`, `2.6g`: whole numbers without decimals, anything else to
/// one decimal place, unit appended without a space
pub fn format_quantity(quantity: f64, unit: Unit) -> String {
    if quantity.fract() == 0.0 {
        format!("{}{}", quantity, unit.as_str())
    } else {
        format!("{:.1}{}", quantity, unit.as_str())
    }
}

/// Next sequential id: `g` + (largest numeric id + 1). Ids with no parsable
/// digits, or whose successor does not fit in a `u64`, are skipped.
pub fn generate_grocery_item_id<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a GroceryItem>,
{
    let next = items
        .into_iter()
        .filter_map(|item| numeric_suffix(&item.id))
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(1);
    format!("g{}", next)
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ingredient, PurchaseFrequency, StorageType};
    use crate::seed::seed_items;

    fn item(
        id: &str,
        category: Category,
        freq: PurchaseFrequency,
        storage: StorageType,
    ) -> GroceryItem {
        GroceryItem::from_ingredient(
            id,
            Ingredient::new(format!("item {}", id), 1.0, Unit::Pieces, category, freq, storage),
        )
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a GroceryItem>) -> Vec<&'a str> {
        items.into_iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let items = seed_items();
        let filtered = filter_by_frequency(&items, ViewMode::All);
        assert_eq!(filtered.len(), items.len());
        for (kept, original) in filtered.iter().zip(items.iter()) {
            assert!(std::ptr::eq(*kept, original));
        }
        assert_eq!(filter_by_storage_type(&items, StorageFilter::All).len(), items.len());
    }

    #[test]
    fn test_filter_by_frequency_keeps_matching_only() {
        let items = seed_items();
        let weekly = filter_by_frequency(&items, ViewMode::Weekly);
        assert_eq!(weekly.len(), 7);
        assert!(weekly.iter().all(|i| i.purchase_frequency() == PurchaseFrequency::Weekly));

        let monthly = filter_by_frequency(&items, ViewMode::Monthly);
        assert_eq!(monthly.len(), 3);
        assert!(monthly.iter().all(|i| i.purchase_frequency() == PurchaseFrequency::Monthly));
    }

    #[test]
    fn test_filter_by_storage_type() {
        let items = seed_items();
        let frozen = filter_by_storage_type(&items, StorageFilter::Frozen);
        assert_eq!(frozen.len(), 3);
        assert!(frozen.iter().all(|i| i.storage_type() == StorageType::Frozen));
    }

    #[test]
    fn test_group_by_category_is_partition() {
        let items = seed_items();
        let sections = group_by_category(&items);

        let mut seen: Vec<&str> = sections
            .iter()
            .flat_map(|s| ids(s.items.iter().copied()))
            .collect();
        let mut expected = ids(&items);
        seen.sort_unstable();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        for section in &sections {
            assert!(!section.is_empty());
            assert!(section.items.iter().all(|i| i.category() == section.category));
            assert_eq!(section.label, section.category.label());
        }
    }

    #[test]
    fn test_group_by_category_sorted_by_label() {
        let items = vec![
            item("g1", Category::Vegetables, PurchaseFrequency::Weekly, StorageType::Fresh),
            item("g2", Category::Fruits, PurchaseFrequency::Weekly, StorageType::Fresh),
            item("g3", Category::Vegetables, PurchaseFrequency::Weekly, StorageType::Fresh),
        ];
        let sections = group_by_category(&items);
        let labels: Vec<&str> = sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["FRUITS", "VEGETABLES"]);
        assert_eq!(ids(sections[1].items.iter().copied()), vec!["g1", "g3"]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(&Vec::<GroceryItem>::new()).is_empty());
    }

    #[test]
    fn test_weekly_fresh_end_to_end() {
        let items = seed_items();
        assert_eq!(items.len(), 10);

        let sections =
            get_filtered_and_grouped_items(&items, ViewMode::Weekly, StorageFilter::Fresh);
        let total: usize = sections.iter().map(CategorySection::len).sum();
        assert_eq!(total, 4);
        for section in &sections {
            for item in &section.items {
                assert_eq!(item.purchase_frequency(), PurchaseFrequency::Weekly);
                assert_eq!(item.storage_type(), StorageType::Fresh);
            }
        }
        let labels: Vec<&str> = sections.iter().map(|s| s.label).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
        assert_eq!(labels, vec!["DAIRY", "FRUITS", "PROTEINS", "VEGETABLES"]);
    }

    #[test]
    fn test_filters_commute() {
        let items = seed_items();
        let weekly = filter_by_frequency(&items, ViewMode::Weekly);
        let a = filter_by_storage_type(weekly, StorageFilter::Frozen);
        let frozen = filter_by_storage_type(&items, StorageFilter::Frozen);
        let b = filter_by_frequency(frozen, ViewMode::Weekly);
        assert_eq!(ids(a), ids(b));
    }

    #[test]
    fn test_counts_and_completion() {
        assert_eq!(get_completion_percentage(&Vec::<GroceryItem>::new()), 0);

        let mut items = vec![
            item("g1", Category::Dairy, PurchaseFrequency::Weekly, StorageType::Fresh),
            item("g2", Category::Dairy, PurchaseFrequency::Weekly, StorageType::Fresh),
            item("g3", Category::Dairy, PurchaseFrequency::Weekly, StorageType::Fresh),
        ];
        items[0].checked = true;
        assert_eq!(get_total_item_count(&items), 3);
        assert_eq!(get_checked_item_count(&items), 1);
        assert_eq!(get_completion_percentage(&items), 33);

        items[1].checked = true;
        assert_eq!(get_completion_percentage(&items), 67);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0, Unit::Kg), "2kg");
        assert_eq!(format_quantity(1.5, Unit::L), "1.5l");
        assert_eq!(format_quantity(2.567, Unit::G), "2.6g");
        assert_eq!(format_quantity(250.0, Unit::Ml), "250ml");
        assert_eq!(format_quantity(0.33, Unit::Cups), "0.3cups");
    }

    #[test]
    fn test_generate_id_skips_non_numeric() {
        let items = vec![
            item("g1", Category::Other, PurchaseFrequency::Weekly, StorageType::Pantry),
            item("g3", Category::Other, PurchaseFrequency::Weekly, StorageType::Pantry),
            item("custom-x", Category::Other, PurchaseFrequency::Weekly, StorageType::Pantry),
        ];
        assert_eq!(generate_grocery_item_id(&items), "g4");
    }

    #[test]
    fn test_generate_id_empty_and_seed() {
        assert_eq!(generate_grocery_item_id(&Vec::<GroceryItem>::new()), "g1");
        assert_eq!(generate_grocery_item_id(&seed_items()), "g11");
    }

    #[test]
    fn test_generate_id_at_top_of_range() {
        let mut items = vec![
            item("g1", Category::Other, PurchaseFrequency::Weekly, StorageType::Pantry),
            item("g2", Category::Other, PurchaseFrequency::Weekly, StorageType::Pantry),
        ];
        items[0].id = format!("g{}", u64::MAX);
        assert_eq!(generate_grocery_item_id(&items), "g3");

        items[1].id = format!("g{}", u64::MAX - 1);
        assert_eq!(generate_grocery_item_id(&items), format!("g{}", u64::MAX));

        items[1].id = "g99999999999999999999999".to_string();
        assert_eq!(generate_grocery_item_id(&items), "g1");
    }
}
