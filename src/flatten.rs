//! Listing flattener.
//!
//! Reduces one raw listing (a JSON object whose fields are scalars or nested
//! objects) to a single level of scalar fields.
//!
//! - Scalars (string, number, bool, null) at the top level are copied under
//!   their own key.
//! - Each nested object contributes its scalar fields under their own keys.
//! - A key that is already present gets the first free `_1`, `_2`, ...
//!   suffix, so the first occurrence keeps the bare key and later ones are
//!   never lost.
//! - Arrays, and objects nested two or more levels deep, are dropped. The
//!   rest of the record is kept.

use serde_json::Value;

use crate::models::{FlatListing, FlatValue, RawListing};

/// Flatten one raw listing. Pure and deterministic: the output only depends
/// on the field order of `raw`.
pub fn flatten_listing(raw: &RawListing) -> FlatListing {
    let mut flat = FlatListing::new();

    for (key, value) in raw {
        match value {
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested {
                    if let Some(scalar) = FlatValue::from_json(nested_value) {
                        flat.insert_unique(nested_key, scalar);
                    }
                }
            }
            other => {
                if let Some(scalar) = FlatValue::from_json(other) {
                    flat.insert_unique(key, scalar);
                }
            }
        }
    }

    flat
}
