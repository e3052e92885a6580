use std::fmt;

use crate::model::{CompareSummary, Discrepancy, Finding, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Bytes(v) => {
                write!(f, "0x")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Timestamp(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTargetRow => write!(f, "row missing from target"),
            Self::ColumnCountMismatch => write!(f, "column counts differ"),
            Self::ColumnNameMismatch => write!(f, "column names differ"),
            Self::ValueMismatch { columns } => {
                write!(f, "values differ: {}", columns.join(", "))
            }
            Self::TtlMismatch { entries } => {
                write!(f, "ttl drift:")?;
                for e in entries {
                    write!(f, " {}={}", e.column, e.delta)?;
                }
                Ok(())
            }
            Self::WritetimeMismatch { entries } => {
                write!(f, "writetime drift:")?;
                for e in entries {
                    write!(f, " {}={}", e.column, e.delta)?;
                }
                Ok(())
            }
        }
    }
}

/// One report line per finding, keyed by the source row's first column.
impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match self.source.key() {
                Some(key) => write!(f, "row {key}: {finding}")?,
                None => write!(f, "row <no key>: {finding}")?,
            }
        }
        Ok(())
    }
}

/// Compute summary statistics over the discrepancies of a traversal.
/// How many are tolerable stays the caller's policy.
pub fn compute_summary(discrepancies: &[Discrepancy]) -> CompareSummary {
    let mut summary = CompareSummary {
        total_discrepancies: discrepancies.len(),
        ..CompareSummary::default()
    };

    for d in discrepancies {
        for finding in &d.findings {
            match finding {
                Finding::MissingTargetRow => summary.missing_rows += 1,
                Finding::ColumnCountMismatch => summary.column_count_mismatches += 1,
                Finding::ColumnNameMismatch => summary.column_name_mismatches += 1,
                Finding::ValueMismatch { .. } => summary.value_mismatches += 1,
                Finding::TtlMismatch { .. } => summary.ttl_drift += 1,
                Finding::WritetimeMismatch { .. } => summary.writetime_drift += 1,
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DriftEntry, Record};

    fn source() -> Record {
        Record::new(vec![
            ("id".into(), Some(Value::Int(42))),
            ("score".into(), Some(Value::Double(9.5))),
        ])
    }

    fn with_findings(findings: Vec<Finding>) -> Discrepancy {
        Discrepancy {
            source: source(),
            target: None,
            findings,
        }
    }

    #[test]
    fn render_missing_row() {
        let d = with_findings(vec![Finding::MissingTargetRow]);
        assert_eq!(d.to_string(), "row 42: row missing from target");
    }

    #[test]
    fn render_multiple_findings_one_line_each() {
        let d = with_findings(vec![
            Finding::ValueMismatch { columns: vec!["score".into()] },
            Finding::TtlMismatch {
                entries: vec![DriftEntry { column: "score_ttl".into(), delta: 1600 }],
            },
        ]);
        assert_eq!(
            d.to_string(),
            "row 42: values differ: score\nrow 42: ttl drift: score_ttl=1600"
        );
    }

    #[test]
    fn render_bytes_as_hex() {
        assert_eq!(Value::Bytes(vec![0xde, 0xad, 0x01]).to_string(), "0xdead01");
    }

    #[test]
    fn summary_counts() {
        let results = vec![
            with_findings(vec![Finding::MissingTargetRow]),
            with_findings(vec![
                Finding::ValueMismatch { columns: vec!["a".into()] },
                Finding::WritetimeMismatch {
                    entries: vec![DriftEntry { column: "a_writetime".into(), delta: 5 }],
                },
            ]),
            with_findings(vec![Finding::ColumnNameMismatch]),
        ];
        let summary = compute_summary(&results);
        assert_eq!(summary.total_discrepancies, 3);
        assert_eq!(summary.missing_rows, 1);
        assert_eq!(summary.column_count_mismatches, 0);
        assert_eq!(summary.column_name_mismatches, 1);
        assert_eq!(summary.value_mismatches, 1);
        assert_eq!(summary.ttl_drift, 0);
        assert_eq!(summary.writetime_drift, 1);
    }

    #[test]
    fn summary_of_empty_batch() {
        assert_eq!(compute_summary(&[]), CompareSummary::default());
    }
}
