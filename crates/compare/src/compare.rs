use rust_decimal::Decimal;

use crate::config::ComparisonConfig;
use crate::model::{
    Discrepancy, DriftEntry, Finding, Record, Value, TTL_SUFFIX, WRITETIME_SUFFIX,
};

/// Compare one source row against its (possibly absent) target row.
///
/// Returns `None` when the two are equivalent under the configured
/// tolerances, otherwise a [`Discrepancy`] carrying every applicable
/// finding. Pure and total: well-formed input never fails.
pub fn compare(
    source: &Record,
    target: Option<&Record>,
    config: &ComparisonConfig,
) -> Option<Discrepancy> {
    let Some(target) = target else {
        return compare_missing_target(source, config);
    };

    // Structural checks are terminal: a row pair with different shapes is
    // not comparable column-by-column.
    if source.len() != target.len() {
        return Some(discrepancy(source, Some(target), vec![Finding::ColumnCountMismatch]));
    }
    if !source.column_names().eq(target.column_names()) {
        return Some(discrepancy(source, Some(target), vec![Finding::ColumnNameMismatch]));
    }

    let mut findings = Vec::new();

    let flagged = compare_values(source, target, config);
    if !flagged.is_empty() {
        findings.push(Finding::ValueMismatch { columns: flagged });
    }

    if config.compare_timestamps {
        let ttl = compare_drift(source, target, TTL_SUFFIX, config.ttl_tolerance_millis);
        if !ttl.is_empty() {
            findings.push(Finding::TtlMismatch { entries: ttl });
        }
        let wt = compare_drift(
            source,
            target,
            WRITETIME_SUFFIX,
            config.writetime_tolerance_micros(),
        );
        if !wt.is_empty() {
            findings.push(Finding::WritetimeMismatch { entries: wt });
        }
    }

    if findings.is_empty() {
        None
    } else {
        Some(discrepancy(source, Some(target), findings))
    }
}

fn discrepancy(source: &Record, target: Option<&Record>, findings: Vec<Finding>) -> Discrepancy {
    Discrepancy {
        source: source.clone(),
        target: target.cloned(),
        findings,
    }
}

/// Target row absent. When timestamps are compared and every present `_ttl`
/// value on the source is within tolerance of zero, the row could have
/// legitimately expired between the two reads and no finding is raised.
fn compare_missing_target(source: &Record, config: &ComparisonConfig) -> Option<Discrepancy> {
    if config.compare_timestamps {
        let witnesses: Vec<i64> = source
            .column_names()
            .filter(|n| n.ends_with(TTL_SUFFIX))
            .filter_map(|n| source.get(n).and_then(Value::as_int))
            .collect();
        if !witnesses.is_empty()
            && witnesses.iter().all(|ttl| *ttl <= config.ttl_tolerance_millis)
        {
            return None;
        }
    }
    Some(discrepancy(source, None, vec![Finding::MissingTargetRow]))
}

/// Tolerant per-column value pass over non-metadata columns. Returns the
/// flagged column names in record order.
fn compare_values(source: &Record, target: &Record, config: &ComparisonConfig) -> Vec<String> {
    let decimal_tolerance = config.decimal_tolerance();
    let mut flagged = Vec::new();

    for name in source.column_names() {
        if name.ends_with(TTL_SUFFIX) || name.ends_with(WRITETIME_SUFFIX) {
            continue;
        }
        let unequal = match (source.get(name), target.get(name)) {
            (None, None) => false,
            (Some(l), Some(r)) => {
                !values_equal(l, r, config.floating_point_tolerance, decimal_tolerance)
            }
            // Present on one side only.
            _ => true,
        };
        if unequal && !suppressed_by_cutoff(source, target, name, config) {
            flagged.push(name.to_string());
        }
    }

    flagged
}

/// Tolerant equality over the closed value-shape set. Boundary inclusive
/// for the fuzzy shapes; byte columns compare by content; everything else
/// by plain value equality.
fn values_equal(left: &Value, right: &Value, tolerance: f64, decimal_tolerance: Decimal) -> bool {
    match (left, right) {
        (Value::Float(l), Value::Float(r)) => (f64::from(*l) - f64::from(*r)).abs() <= tolerance,
        (Value::Double(l), Value::Double(r)) => (l - r).abs() <= tolerance,
        (Value::Decimal(l), Value::Decimal(r)) => {
            (*l - *r).abs() <= decimal_tolerance
        }
        (Value::Bytes(l), Value::Bytes(r)) => l == r,
        _ => left == right,
    }
}

/// A value diff is excused when timestamps are not being compared and both
/// sides' `<col>_writetime` lies strictly before the cutoff: the diff is
/// presumed to be a write landing between the two non-atomic reads.
fn suppressed_by_cutoff(
    source: &Record,
    target: &Record,
    column: &str,
    config: &ComparisonConfig,
) -> bool {
    if config.compare_timestamps {
        return false;
    }
    let sibling = format!("{column}{WRITETIME_SUFFIX}");
    match (
        source.get(&sibling).and_then(Value::as_int),
        target.get(&sibling).and_then(Value::as_int),
    ) {
        (Some(l), Some(r)) => {
            let cutoff = config.cutoff_micros();
            l < cutoff && r < cutoff
        }
        _ => false,
    }
}

/// Drift pass over metadata columns with the given suffix. Both present:
/// an entry when the absolute difference exceeds `tolerance`. Present on
/// one side only: an unconditional entry carrying that side's value.
fn compare_drift(
    source: &Record,
    target: &Record,
    suffix: &str,
    tolerance: i64,
) -> Vec<DriftEntry> {
    let mut entries = Vec::new();

    for name in source.column_names() {
        if !name.ends_with(suffix) {
            continue;
        }
        let delta = match (
            source.get(name).and_then(Value::as_int),
            target.get(name).and_then(Value::as_int),
        ) {
            (Some(l), Some(r)) => {
                let delta = (l - r).abs();
                if delta > tolerance {
                    Some(delta)
                } else {
                    None
                }
            }
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        };
        if let Some(delta) = delta {
            entries.push(DriftEntry {
                column: name.to_string(),
                delta,
            });
        }
    }

    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
