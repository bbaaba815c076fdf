//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are opaque strings. The backend is free to hand out numeric IDs, so
//! deserialization accepts either a JSON string or a JSON integer and keeps
//! the textual form.

use core::fmt;

use serde::Deserializer;
use serde::de::{self, Visitor};

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string
/// - `Deserialize` from either a string or an integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_str()`
///
/// # Example
///
/// ```rust
/// # use marketplace_core::define_id;
/// define_id!(ReviewId);
/// define_id!(StoreId);
///
/// let review_id = ReviewId::new("r-1");
/// let store_id = StoreId::new("r-1");
///
/// // These are different types, so this won't compile:
/// // let _: ReviewId = store_id;
/// # let _ = (review_id, store_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::types::id::deserialize_id(deserializer).map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);

/// Deserialize an identifier given as a string or an integer.
///
/// # Errors
///
/// Returns the deserializer's error for any other JSON type.
#[doc(hidden)]
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor)
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_string() {
        let id: UserId = serde_json::from_str("\"64f1c0ffee\"").unwrap();
        assert_eq!(id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn test_deserialize_from_integer() {
        let id: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(id, UserId::new("42"));
    }

    #[test]
    fn test_deserialize_rejects_other_types() {
        assert!(serde_json::from_str::<ProductId>("true").is_err());
        assert!(serde_json::from_str::<ProductId>("[1]").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::new("sku-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-1\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
