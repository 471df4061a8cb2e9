use std::collections::BTreeMap;

use crate::models::{MooringRow, QcFlag, Quantity};

#[derive(Debug, Clone, Default)]
pub struct QcReport {
    pub total_rows: usize,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    pub out_of_order_rows: usize,
    pub quantities: BTreeMap<&'static str, QuantityQc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantityQc {
    pub valid: usize,
    pub excluded: usize,
    pub flags: BTreeMap<QcFlag, usize>,
}

impl QuantityQc {
    pub fn valid_percentage(&self) -> f64 {
        let total = self.valid + self.excluded;
        if total == 0 {
            return 0.0;
        }
        100.0 * self.valid as f64 / total as f64
    }
}

/// Tallies QC codes per quantity without aggregating values
pub struct QcChecker;

impl QcChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, rows: &[MooringRow]) -> QcReport {
        let mut report = QcReport {
            total_rows: rows.len(),
            ..QcReport::default()
        };

        for quantity in Quantity::ALL {
            report.quantities.insert(quantity.key(), QuantityQc::default());
        }

        let mut previous: Option<&str> = None;
        for row in rows {
            // Last-write-wins date tracking depends on time order
            if let Some(prev) = previous {
                if row.time.as_str() < prev {
                    report.out_of_order_rows += 1;
                }
            }
            previous = Some(row.time.as_str());

            for quantity in Quantity::ALL {
                let observation = quantity.observe(row);
                let stats = report.quantities.entry(quantity.key()).or_default();

                if observation.is_good() {
                    stats.valid += 1;
                } else {
                    stats.excluded += 1;
                }
                *stats.flags.entry(observation.flag()).or_default() += 1;
            }
        }

        report.first_time = rows.first().map(|r| r.time.clone());
        report.last_time = rows.last().map(|r| r.time.clone());

        report
    }

    pub fn generate_summary(&self, report: &QcReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== QC Report ===\n");
        summary.push_str(&format!("Total Rows: {}\n", report.total_rows));
        if let (Some(first), Some(last)) = (&report.first_time, &report.last_time) {
            summary.push_str(&format!("Time Span: {} to {}\n", first, last));
        }
        summary.push_str(&format!(
            "Out-of-order Rows: {}\n",
            report.out_of_order_rows
        ));

        for quantity in Quantity::ALL {
            let Some(stats) = report.quantities.get(quantity.key()) else {
                continue;
            };
            summary.push_str(&format!(
                "\n{}: {} valid ({:.1}%), {} excluded\n",
                quantity,
                stats.valid,
                stats.valid_percentage(),
                stats.excluded
            ));
            for (flag, count) in &stats.flags {
                summary.push_str(&format!("  - {} ({}): {}\n", flag, flag.as_i8(), count));
            }
        }

        summary
    }
}

impl Default for QcChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::row::tests::sample_values;
    use serde_json::json;

    fn row_at(time: &str, current_qc: i64, salinity_qc: i64) -> MooringRow {
        let mut values = sample_values();
        values[3] = json!(time);
        values[5] = json!(current_qc);
        values[17] = json!(salinity_qc);
        MooringRow::from_values(&values, 0).unwrap()
    }

    #[test]
    fn test_qc_counts() {
        let rows = vec![
            row_at("2015-08-25T15:00:00Z", 0, 0),
            row_at("2015-08-25T16:00:00Z", 2, 0),
            row_at("2015-08-25T17:00:00Z", 9, 3),
        ];

        let report = QcChecker::new().check(&rows);

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.out_of_order_rows, 0);

        let current = &report.quantities["current_speed"];
        assert_eq!(current.valid, 1);
        assert_eq!(current.excluded, 2);
        assert_eq!(current.flags[&QcFlag::Questionable], 1);
        assert_eq!(current.flags[&QcFlag::Missing], 1);

        let salinity = &report.quantities["salinity"];
        assert_eq!(salinity.valid, 2);
        assert_eq!(salinity.flags[&QcFlag::Bad], 1);

        let temperature = &report.quantities["temperature"];
        assert_eq!(temperature.valid, 3);
        assert_eq!(temperature.valid_percentage(), 100.0);
    }

    #[test]
    fn test_out_of_order_detection() {
        let rows = vec![
            row_at("2020-01-05T00:00:00Z", 0, 0),
            row_at("2020-01-01T00:00:00Z", 0, 0),
            row_at("2020-01-06T00:00:00Z", 0, 0),
        ];

        let checker = QcChecker::new();
        let report = checker.check(&rows);
        assert_eq!(report.out_of_order_rows, 1);

        let text = checker.generate_summary(&report);
        assert!(text.contains("Out-of-order Rows: 1"));
        assert!(text.contains("Total Rows: 3"));
    }

    #[test]
    fn test_empty_report() {
        let report = QcChecker::new().check(&[]);
        assert_eq!(report.total_rows, 0);
        assert_eq!(report.quantities.len(), 3);
        assert_eq!(report.quantities["salinity"].valid_percentage(), 0.0);
    }
}
