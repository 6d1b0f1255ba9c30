//! The in-memory dataset handed to the engine by its caller.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NormalyzeError, Result};

/// A single row: a mapping from attribute name to a scalar value (or null).
///
/// Cells are `serde_json::Value` so the 1NF check can distinguish atomic
/// scalars from composite structures (arrays, objects).
pub type Row = IndexMap<String, Value>;

/// A relation sample: an ordered attribute universe plus its rows.
///
/// Row order is irrelevant to every algorithm (the dataset is treated as a
/// bag), but attribute order is preserved for readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// The attribute universe, in declaration order.
    pub attributes: Vec<String>,
    /// The sample rows. Every row shares the attribute universe.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset, validating the input contract.
    ///
    /// Fails fast on an empty attribute universe, an empty row set, a
    /// duplicate attribute name, or any row whose key set does not equal the
    /// universe. No partial result is produced.
    pub fn new(attributes: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let dataset = Self { attributes, rows };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Re-check the input contract.
    ///
    /// Useful for datasets built by deserialization, which bypasses
    /// [`Dataset::new`]. The engine runs this before analysis.
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(NormalyzeError::EmptyAttributes);
        }
        if self.rows.is_empty() {
            return Err(NormalyzeError::EmptyDataset);
        }

        let mut seen = std::collections::HashSet::new();
        for attr in &self.attributes {
            if !seen.insert(attr.as_str()) {
                return Err(NormalyzeError::DuplicateAttribute {
                    attribute: attr.clone(),
                });
            }
        }

        for (idx, row) in self.rows.iter().enumerate() {
            for attr in &self.attributes {
                if !row.contains_key(attr) {
                    return Err(NormalyzeError::MissingAttribute {
                        row: idx,
                        attribute: attr.clone(),
                    });
                }
            }
            for key in row.keys() {
                if !seen.contains(key.as_str()) {
                    return Err(NormalyzeError::UnknownAttribute {
                        row: idx,
                        attribute: key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Get a cell value by row index and attribute name.
    pub fn get(&self, row: usize, attribute: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(attribute))
    }

    /// All values of one attribute, in row order.
    pub fn attribute_values<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a Value> {
        self.rows
            .iter()
            .map(move |row| row.get(attribute).unwrap_or(&Value::Null))
    }

    /// A dataset restricted to its first `n` rows, for sampled detection.
    /// Returns a borrowed slice view; the universe is unchanged.
    pub fn sample(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }
}
