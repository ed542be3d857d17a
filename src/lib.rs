//! Commit detail view core.
//!
//! Keeps a bounded working set of repositories whose heavy payload stays in
//! memory, loads per-commit records from a generated report on demand, and
//! tracks which file diffs of the displayed commit are expanded.
//!
//! - `cache`: repository registry and FIFO working set
//! - `report`: record locations, transports, and parsing
//! - `state`: per-view load and expand state
//! - `viewer`: runs a display request end to end

pub mod cache;
pub mod config;
pub mod error;
pub mod report;
pub mod state;
pub mod viewer;

pub use cache::{RepoCache, RepoRegistry, RepositoryEntry, SharedCache, User, WorkingSet};
pub use config::Config;
pub use error::{Result, ViewError};
pub use report::{CommitLoader, CommitRecord, FileDiff, RecordSource, ReportSource};
pub use state::{CommitView, DisplayRequest, LoadingState};
pub use viewer::{CommitViewer, DisplayOutcome};
