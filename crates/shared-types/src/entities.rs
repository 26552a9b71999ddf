//! # Catalog Identifiers
//!
//! UUID-backed identifiers for the entities whose order is managed:
//! restaurants own categories, categories own menu items, and menu items own
//! their recommendation lists.

use crate::errors::IdParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh random identifier.
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::parse_str(s.trim()).map_err(|_| IdParseError::Malformed {
                    kind: $kind,
                    value: s.to_string(),
                })?;
                if uuid.is_nil() {
                    return Err(IdParseError::Nil { kind: $kind });
                }
                Ok(Self(uuid))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

uuid_id!(
    /// Restaurant; the scope of category ordering.
    RestaurantId,
    "restaurant"
);

uuid_id!(
    /// Category; ordered within a restaurant, and the scope of menu item ordering.
    CategoryId,
    "category"
);

uuid_id!(
    /// Menu item; ordered within a category, and the source of recommendations.
    MenuItemId,
    "menu item"
);

/// A recommendation edge: `source` recommends `recommended`.
///
/// Recommendations are ordered per source item, so the edge itself is the
/// ranked entity and `source` is its scope. On the wire it is the
/// `source->recommended` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecommendationKey {
    pub source: MenuItemId,
    pub recommended: MenuItemId,
}

impl RecommendationKey {
    pub fn new(source: MenuItemId, recommended: MenuItemId) -> Self {
        Self {
            source,
            recommended,
        }
    }

    /// An item recommending itself.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.recommended
    }
}

impl fmt::Display for RecommendationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.recommended)
    }
}

impl FromStr for RecommendationKey {
    type Err = IdParseError;

    /// Parse the `source->recommended` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, recommended) = s.split_once("->").ok_or_else(|| IdParseError::Malformed {
            kind: "recommendation",
            value: s.to_string(),
        })?;
        Ok(Self::new(source.parse()?, recommended.parse()?))
    }
}

impl TryFrom<String> for RecommendationKey {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecommendationKey> for String {
    fn from(key: RecommendationKey) -> Self {
        key.to_string()
    }
}
