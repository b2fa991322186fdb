//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! The only external dependencies are serde and serde_json.

/// `FromStr` and `Display` for a closed enum with an `as_str` token.
/// Parsing is case-insensitive and ignores surrounding whitespace.
macro_rules! impl_token_traits {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::domain::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = s.trim().to_ascii_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == token)
                    .ok_or_else(|| {
                        $crate::domain::DomainError::InvalidInput(format!(
                            "unknown {}: {}",
                            $what, s
                        ))
                    })
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod entity;
mod grocery_item;
mod ingredient;
mod profile;

pub use entity::{DomainError, DomainResult, Entity};
pub use grocery_item::{GroceryItem, NewGroceryItem, StorageFilter, ViewMode};
pub use ingredient::{Category, Ingredient, PurchaseFrequency, StorageType, Unit};
pub use profile::{ActivityLevel, FitnessGoal, ProfileUpdate, Session, UserProfile};
