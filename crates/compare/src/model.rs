use rust_decimal::Decimal;
use serde::Serialize;

/// Suffix marking a column that carries remaining lifetime for its base column.
pub const TTL_SUFFIX: &str = "_ttl";
/// Suffix marking a column that carries the last-write timestamp (micros).
pub const WRITETIME_SUFFIX: &str = "_writetime";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single typed cell value. The variant set is closed: tolerant equality
/// is a pattern match over value shapes, and mismatched shapes compare
/// unequal through the default arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Bytes(Vec<u8>),
    Bool(bool),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
}

impl Value {
    /// Integer view, used for `_ttl` and `_writetime` metadata columns.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// One row from either system: an ordered list of named, nullable cells.
///
/// Column order is declaration order and significant — two rows with the
/// same columns in a different order are not structurally equal. Metadata
/// columns follow the `<base>_ttl` / `<base>_writetime` naming convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    columns: Vec<(String, Option<Value>)>,
}

impl Record {
    /// Build a record from ordered `(name, value)` pairs.
    ///
    /// Panics on a duplicate column name: that is a bug in the retrieval
    /// collaborator, not a runtime condition.
    pub fn new(columns: Vec<(String, Option<Value>)>) -> Self {
        for (i, (name, _)) in columns.iter().enumerate() {
            assert!(
                !columns[..i].iter().any(|(n, _)| n == name),
                "duplicate column name '{name}'"
            );
        }
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// The value of `name`, or `None` if the column is absent or null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// The first column's value, used as row identity when rendering.
    pub fn key(&self) -> Option<&Value> {
        self.columns.first().and_then(|(_, v)| v.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Absolute drift on one metadata column, or the surviving side's value
/// when the column is present on one side only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftEntry {
    pub column: String,
    pub delta: i64,
}

/// One kind of divergence between a source and target row. At most one
/// finding of each kind appears per discrepancy; the aggregating variants
/// carry every offending column in record order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Finding {
    MissingTargetRow,
    ColumnCountMismatch,
    ColumnNameMismatch,
    ValueMismatch { columns: Vec<String> },
    TtlMismatch { entries: Vec<DriftEntry> },
    WritetimeMismatch { entries: Vec<DriftEntry> },
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The verdict for one row pair that is not equivalent under the configured
/// tolerances. Absence of a discrepancy means the rows matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub source: Record,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Record>,
    pub findings: Vec<Finding>,
}

/// Batch rollup over the discrepancies of a dataset traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompareSummary {
    pub total_discrepancies: usize,
    pub missing_rows: usize,
    pub column_count_mismatches: usize,
    pub column_name_mismatches: usize,
    pub value_mismatches: usize,
    pub ttl_drift: usize,
    pub writetime_drift: usize,
}
