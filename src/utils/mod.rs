pub mod constants;
pub mod progress;
pub mod query;

pub use constants::*;
pub use progress::ProgressReporter;
pub use query::TableQuery;
