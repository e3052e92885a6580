use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CompareError;

/// Tolerances and mode switches for one comparison run.
///
/// Writetimes are recorded in microseconds; `writetime_tolerance_millis`
/// is converted before use. TTL values share the unit of
/// `ttl_tolerance_millis`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    /// Instant before which writetime-based suppression of value diffs is
    /// permitted. Defaults to the Unix epoch, which suppresses nothing.
    #[serde(default = "epoch")]
    pub writetime_cutoff: DateTime<Utc>,
    /// Absolute tolerance for float/double/decimal equality (inclusive).
    #[serde(default)]
    pub floating_point_tolerance: f64,
    #[serde(default)]
    pub ttl_tolerance_millis: i64,
    #[serde(default)]
    pub writetime_tolerance_millis: i64,
    /// When true, TTL and writetime drift is checked and a missing target
    /// row may be excused as a benign expiration. When false, value diffs
    /// may be suppressed by the writetime cutoff instead.
    #[serde(default)]
    pub compare_timestamps: bool,
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            writetime_cutoff: epoch(),
            floating_point_tolerance: 0.0,
            ttl_tolerance_millis: 0,
            writetime_tolerance_millis: 0,
            compare_timestamps: false,
        }
    }
}

impl ComparisonConfig {
    pub fn from_toml(input: &str) -> Result<Self, CompareError> {
        let config: ComparisonConfig =
            toml::from_str(input).map_err(|e| CompareError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompareError> {
        if !self.floating_point_tolerance.is_finite() || self.floating_point_tolerance < 0.0 {
            return Err(CompareError::ConfigValidation(format!(
                "floating_point_tolerance must be finite and non-negative, got {}",
                self.floating_point_tolerance
            )));
        }
        if self.ttl_tolerance_millis < 0 {
            return Err(CompareError::ConfigValidation(format!(
                "ttl_tolerance_millis must be non-negative, got {}",
                self.ttl_tolerance_millis
            )));
        }
        if self.writetime_tolerance_millis < 0 {
            return Err(CompareError::ConfigValidation(format!(
                "writetime_tolerance_millis must be non-negative, got {}",
                self.writetime_tolerance_millis
            )));
        }
        Ok(())
    }

    /// Cutoff instant in the writetime unit.
    pub fn cutoff_micros(&self) -> i64 {
        self.writetime_cutoff.timestamp_micros()
    }

    /// Writetime tolerance in the writetime unit.
    pub fn writetime_tolerance_micros(&self) -> i64 {
        self.writetime_tolerance_millis.saturating_mul(1000)
    }

    /// The floating-point tolerance as a decimal, for decimal-typed cells.
    /// `validate` guarantees the value is finite and non-negative.
    pub fn decimal_tolerance(&self) -> Decimal {
        Decimal::from_f64_retain(self.floating_point_tolerance).unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
