use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sql::names::normalize_data_type;

/// Prefix marking a value that still names a relative date range (e.g. `this month`).
pub const RELATIVE_DATE_PREFIX: &str = "__rel_date:";

/// One user-specified filter term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Column the term applies to; must be present in the [`FilterContext`].
    pub column: String,
    /// Free-form operator token, interpreted by the handler that claims it.
    pub operator: String,
    /// Scalar, list, or string-encoded composite such as `"10,20"`.
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    /// Build a condition from its parts.
    pub fn new(column: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value,
        }
    }

    /// The value as a string slice, if it is a JSON string.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// True when the value is a relative-date sentinel still awaiting expansion.
    pub fn has_relative_date_value(&self) -> bool {
        self.value_str()
            .is_some_and(|s| s.starts_with(RELATIVE_DATE_PREFIX))
    }
}

/// UI-facing metadata attached to a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Underlying SQL type, e.g. `jsonb` or `timestamp with time zone`.
    #[serde(default)]
    pub data_type: String,
}

/// Metadata for one column of the table being filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as stored in the catalog.
    pub name: String,
    /// UI metadata, including the declared SQL type.
    #[serde(default)]
    pub ui_config: UiConfig,
}

impl ColumnDescriptor {
    /// Build a descriptor with the given SQL type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ui_config: UiConfig {
                data_type: data_type.into(),
            },
        }
    }

    /// Declared SQL type, lower-cased with whitespace collapsed.
    pub fn data_type(&self) -> String {
        normalize_data_type(&self.ui_config.data_type)
    }

    /// True for `json` and `jsonb` columns.
    pub fn is_json(&self) -> bool {
        matches!(self.data_type().as_str(), "json" | "jsonb")
    }

    /// True for `date`, `timestamp` and `timestamp with time zone` columns.
    pub fn is_date_like(&self) -> bool {
        matches!(
            self.data_type().as_str(),
            "date" | "timestamp" | "timestamp with time zone" | "timestamptz"
        )
    }
}

/// Column metadata supplied with each compilation call. Never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterContext {
    /// Columns of the filtered table.
    pub columns: Vec<ColumnDescriptor>,
}

impl FilterContext {
    /// Build a context from column descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Look up a column by its exact name.
    ///
    /// Generated SQL quotes the condition's column name verbatim, so no
    /// trimming or unquoting happens here.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Descriptor of the column a condition targets.
    pub fn column_for(&self, condition: &FilterCondition) -> Option<&ColumnDescriptor> {
        self.column(&condition.column)
    }
}
