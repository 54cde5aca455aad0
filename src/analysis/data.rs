//! Tabular survey input

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SynthError};
use crate::value::AttributeValue;

/// One observed row, keyed by field name
pub type Record = FxHashMap<String, AttributeValue>;

/// Kind of values a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Numeric,
    Categorical,
    Ordinal,
    Boolean,
}

impl FieldType {
    /// Whether the field is modelled by a fitted continuous marginal
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }
}

/// Schema entry for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

impl FieldSchema {
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
        }
    }

    #[must_use]
    pub fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }
}

/// Survey rows together with their schema
///
/// Fields are visited in name order, which keeps correlation matrices and
/// marginals stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyData {
    pub rows: Vec<Record>,
    pub schema: BTreeMap<String, FieldSchema>,
}

impl SurveyData {
    #[must_use]
    pub fn new(rows: Vec<Record>, schema: BTreeMap<String, FieldSchema>) -> Self {
        Self { rows, schema }
    }

    /// Parse survey data from JSON and check required fields
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Ensure every required field is present in every row
    pub fn validate(&self) -> Result<()> {
        for (field, schema) in &self.schema {
            if !schema.required {
                continue;
            }
            if let Some(row) = self.rows.iter().position(|r| !r.contains_key(field)) {
                return Err(SynthError::InvalidParameter(format!(
                    "required field {field} is missing in row {row}"
                )));
            }
        }
        Ok(())
    }

    /// Fields of the given types, in name order
    #[must_use]
    pub fn fields_of_type(&self, types: &[FieldType]) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|(_, s)| types.contains(&s.field_type))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Numeric fields, in name order
    #[must_use]
    pub fn numeric_fields(&self) -> Vec<&str> {
        self.fields_of_type(&[FieldType::Numeric])
    }

    /// All numeric values of a field, skipping missing and non-numeric cells
    #[must_use]
    pub fn numeric_values(&self, field: &str) -> Vec<f64> {
        numeric_column(&self.rows, field).into_iter().flatten().collect()
    }

    /// All present values of a field
    #[must_use]
    pub fn values(&self, field: &str) -> Vec<&AttributeValue> {
        self.rows.iter().filter_map(|r| r.get(field)).collect()
    }
}

/// Numeric view of one column, aligned with the rows
pub fn numeric_column(rows: &[Record], field: &str) -> Vec<Option<f64>> {
    rows.iter()
        .map(|row| row.get(field).and_then(AttributeValue::as_f64))
        .collect()
}
