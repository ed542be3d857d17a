// Report module.
// Locates, fetches, and parses per-commit records produced by the report generator.

pub mod loader;
pub mod paths;
pub mod source;
pub mod types;

pub use loader::{CommitLoader, fetch_registry};
pub use source::{FsSource, HttpSource, RecordSource, ReportSource};
pub use types::{CommitRecord, DiffLine, FileDiff, LineKind, RawCommit};
