//! Output schema types for decomposition stages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nf::NormalForm;

/// A foreign key edge from one table to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Referencing columns in the owning table.
    pub columns: Vec<String>,
    /// Name of the referenced table.
    pub referenced_table: String,
}

/// Schema of a single decomposed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub name: String,
    /// Attributes in presentation order, unique.
    pub attributes: Vec<String>,
    /// Primary key attribute set.
    pub primary_key: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Create a table with no foreign keys.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<String>,
        primary_key: BTreeSet<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            primary_key,
            foreign_keys: Vec::new(),
        }
    }

    /// True if every attribute of `set` belongs to this table.
    pub fn contains_all(&self, set: &BTreeSet<String>) -> bool {
        set.iter().all(|attr| self.contains(attr))
    }

    /// True if the named attribute belongs to this table.
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

/// One stage of the normalization pipeline: the tables after reaching a
/// normal form, plus human-readable notes on what changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationStage {
    pub normal_form: NormalForm,
    pub tables: Vec<TableSchema>,
    pub transformations: Vec<String>,
}

impl NormalizationStage {
    /// Union of attributes across all tables in this stage.
    pub fn attribute_union(&self) -> BTreeSet<String> {
        self.tables
            .iter()
            .flat_map(|t| t.attributes.iter().cloned())
            .collect()
    }
}
