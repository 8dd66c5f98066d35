use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// One marketplace listing exactly as the API returned it.
pub type RawListing = Map<String, Value>;

/// The `GET /marketplace/products` body: group key -> listings of that group.
///
/// Values are left untyped so a malformed group can be skipped on its own.
pub type ProductPayload = Map<String, Value>;

// ---------------------------------------------------------------------------
// FlatValue: A scalar leaf of a flattened listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl FlatValue {
    /// Convert a JSON value into a scalar, or `None` for arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FlatValue::Null),
            Value::Bool(b) => Some(FlatValue::Bool(*b)),
            Value::Number(n) => Some(FlatValue::Number(n.clone())),
            Value::String(s) => Some(FlatValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlatValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of a number. Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlatValue::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FlatValue::Null)
    }

    /// Render the value as a display string (ids may be numeric or textual).
    pub fn to_display_string(&self) -> String {
        match self {
            FlatValue::Null => String::new(),
            FlatValue::Bool(b) => b.to_string(),
            FlatValue::Number(n) => n.to_string(),
            FlatValue::String(s) => s.clone(),
        }
    }
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatValue::Null => serializer.serialize_unit(),
            FlatValue::Bool(b) => serializer.serialize_bool(*b),
            FlatValue::Number(n) => n.serialize(serializer),
            FlatValue::String(s) => serializer.serialize_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// FlatListing: A listing reduced to one level of scalar fields
// ---------------------------------------------------------------------------

/// Ordered key/value view of a listing. Keys are unique and kept in the order
/// they were first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatListing {
    fields: Vec<(String, FlatValue)>,
}

impl FlatListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Insert under `key`, or under the first free `key_1`, `key_2`, ... if
    /// `key` is taken. Returns the key actually used.
    pub fn insert_unique(&mut self, key: &str, value: FlatValue) -> String {
        let mut candidate = key.to_string();
        let mut counter = 1;
        while self.contains_key(&candidate) {
            candidate = format!("{}_{}", key, counter);
            counter += 1;
        }
        self.fields.push((candidate.clone(), value));
        candidate
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FlatListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
