//! Output generation for extracted exam records.
//!
//! - **Tabular output**: delimited text whose header is fixed by the first record
//! - **Error sidecar**: one rejected record per line
//! - **Sinks**: where either of them goes (a file or standard output)

mod error;
mod error_sink;
mod sink;
mod tabular;

pub use error::{OutputError, Result};
pub use error_sink::ErrorSink;
pub use sink::Sink;
pub use tabular::{TabularWriter, WriteSummary, WriterOptions};
