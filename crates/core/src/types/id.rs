//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use localprice_core::define_id;
/// define_id!(CountryId);
/// define_id!(SelectionId);
///
/// let country_id = CountryId::new(59);
/// let selection_id = SelectionId::new(59);
///
/// // These are different types, so this won't compile:
/// // let _: CountryId = selection_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CountryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = CountryId::new(115);
        assert_eq!(id.as_i32(), 115);
        assert_eq!(i32::from(id), 115);
        assert_eq!(CountryId::from(115), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CountryId::new(59).to_string(), "59");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = CountryId::new(185);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "185");
        let back: CountryId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
