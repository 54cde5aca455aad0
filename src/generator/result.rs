//! Generated records

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::attribute::AttributeSet;
use crate::value::AttributeValue;

/// One generated record, ordered like its attribute set
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    entries: Vec<(String, AttributeValue)>,
    index: FxHashMap<String, usize>,
}

impl GenerationResult {
    /// Order resolved values by the attribute set
    pub(crate) fn from_values(
        attributes: &AttributeSet,
        mut values: FxHashMap<String, AttributeValue>,
    ) -> Self {
        let mut entries = Vec::with_capacity(values.len());
        let mut index = FxHashMap::default();
        for name in attributes.names() {
            if let Some(value) = values.remove(name) {
                index.insert(name.to_string(), entries.len());
                entries.push((name.to_string(), value));
            }
        }
        Self { entries, index }
    }

    /// Value of an attribute
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Numeric value of an attribute
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(AttributeValue::as_f64)
    }

    /// Attributes and values in set order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy into an unordered map, e.g. as an analyzer input row
    #[must_use]
    pub fn to_map(&self) -> FxHashMap<String, AttributeValue> {
        self.entries.iter().cloned().collect()
    }
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
