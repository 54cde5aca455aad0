//! Attribute specifications and ordered attribute sets

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::distribution::{
    Beta, Binomial, Categorical, Distribution, Exponential, LogNormal, Normal, Uniform,
};
use crate::value::AttributeValue;

/// How one attribute obtains its value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    /// Copied verbatim into every record
    Literal(AttributeValue),
    /// Drawn from a distribution (and possibly adjusted by rules)
    Sampled(Distribution),
}

impl AttributeSpec {
    /// The backing distribution of a sampled attribute
    #[must_use]
    pub fn distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Sampled(d) => Some(d),
            Self::Literal(_) => None,
        }
    }

    /// Whether the attribute is a literal
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<Distribution> for AttributeSpec {
    fn from(d: Distribution) -> Self {
        Self::Sampled(d)
    }
}

macro_rules! impl_sampled_from {
    ($($primitive:ty),*) => {
        $(
            impl From<$primitive> for AttributeSpec {
                fn from(d: $primitive) -> Self {
                    Self::Sampled(d.into())
                }
            }
        )*
    };
}

impl_sampled_from!(Normal, Uniform, Exponential, Beta, Binomial, LogNormal, Categorical<AttributeValue>);

impl From<AttributeValue> for AttributeSpec {
    fn from(v: AttributeValue) -> Self {
        Self::Literal(v)
    }
}

/// Named attribute specifications in insertion order
///
/// Order matters: with a seeded RNG, attributes are sampled in this order,
/// which keeps generation reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: Vec<(String, AttributeSpec)>,
}

impl AttributeSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new set with `name` added or replaced
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, spec: impl Into<AttributeSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Add or replace an attribute in place
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<AttributeSpec>) {
        let name = name.into();
        let spec = spec.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Look up an attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Whether the set defines `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, spec)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, S: Into<AttributeSpec>> FromIterator<(N, S)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, spec) in iter {
            set.insert(name, spec);
        }
        set
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, spec) in &self.entries {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = AttributeSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to literals or distributions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AttributeSet, A::Error> {
                let mut set = AttributeSet::new();
                while let Some((name, spec)) = access.next_entry::<String, AttributeSpec>()? {
                    set.insert(name, spec);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
