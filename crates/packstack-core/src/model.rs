//! # Pack Data Model
//!
//! The document the Packstack API returns for a shared pack:
//!
//! ```json
//! {
//!   "pack": { "id": 12, "title": "JMT 2023", "description": "..." },
//!   "categories": [
//!     { "id": 3, "name": "Shelter", "items": [
//!       { "id": 9, "name": "Tent", "quantity": 1, "weight": 1150,
//!         "worn": false, "consumable": false }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Weights are grams. Category and item order is insertion order and is
//! preserved by every derived structure. Unknown fields are ignored so the
//! model tolerates additions to the upstream schema.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::identity::{CategoryId, ItemId, PackId};

/// Pack metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single gear entry.
///
/// `quantity` is kept signed so that a malformed negative value reaches the
/// engine and is reported against this item instead of failing the whole
/// document at parse time. `worn` and `consumable` are independent; an item
/// may carry both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    /// Unit weight in grams.
    pub weight: f64,
    #[serde(default)]
    pub worn: bool,
    #[serde(default)]
    pub consumable: bool,
}

/// A named, ordered group of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// The full pack document: metadata plus ordered categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackData {
    pub pack: Pack,
    pub categories: Vec<Category>,
}

impl PackData {
    /// Parse a pack document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// SHA-256 over every field of the document, hex-encoded.
    ///
    /// Strings are length-prefixed and weights hashed by their bit pattern,
    /// so two documents share a digest only when every field is equal. The
    /// view cache keys on it.
    pub fn content_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hash_str(&mut hasher, self.pack.id.as_str());
        hash_str(&mut hasher, &self.pack.title);
        match &self.pack.description {
            Some(description) => {
                hasher.update([1u8]);
                hash_str(&mut hasher, description);
            }
            None => hasher.update([0u8]),
        }

        hasher.update((self.categories.len() as u64).to_le_bytes());
        for category in &self.categories {
            hash_str(&mut hasher, category.id.as_str());
            hash_str(&mut hasher, &category.name);
            hasher.update((category.items.len() as u64).to_le_bytes());
            for item in &category.items {
                hash_str(&mut hasher, item.id.as_str());
                hash_str(&mut hasher, &item.name);
                hasher.update(item.quantity.to_le_bytes());
                hasher.update(item.weight.to_bits().to_le_bytes());
                hasher.update([u8::from(item.worn), u8::from(item.consumable)]);
            }
        }

        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

fn hash_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}
