pub mod aggregation_set;
pub mod qc_checker;

pub use aggregation_set::AggregationSet;
pub use qc_checker::{QcChecker, QcReport, QuantityQc};
