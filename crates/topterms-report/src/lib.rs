pub mod aggregate;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod types;

pub use aggregate::GroupAggregator;
pub use error::ReportError;
pub use extract::ArrayElementScanner;
pub use pipeline::{convert, ConvertOptions, ConvertSummary, SEARCH_TERM_ARRAY_FIELD};
pub use types::RawSearchTermEntry;
