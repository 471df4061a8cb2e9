pub mod aggregate;
pub mod observation;
pub mod row;
pub mod summary;

pub use aggregate::{AggregateState, AggregationPolicy};
pub use observation::{Observation, QcFlag, Quantity};
pub use row::MooringRow;
pub use summary::AggregationSummary;
