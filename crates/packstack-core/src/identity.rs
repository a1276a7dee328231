//! # Identifier Newtypes
//!
//! Typed identifiers for packs, categories and items. You cannot pass an
//! `ItemId` where a `CategoryId` is expected.
//!
//! The upstream pack API emits numeric ids for some records and string ids
//! for others, so each identifier deserializes from either a JSON string or
//! a JSON integer and is held as its string form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Wire form of an identifier before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => n.to_string(),
            RawId::Str(s) => s,
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a pack, as used in `/pack/{id}` share links.
    PackId
);
string_id!(
    /// Identifier of a category within a pack.
    CategoryId
);
string_id!(
    /// Identifier of an item within a category.
    ItemId
);
