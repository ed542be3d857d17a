// Cache module for resident repository data.
// Tracks which repositories keep their heavy payload in memory and evicts the rest.

pub mod manager;
pub mod registry;
pub mod working_set;

pub use manager::{Admission, RepoCache, SharedCache};
pub use registry::{RepoRegistry, RepositoryEntry, User};
pub use working_set::{DEFAULT_CAPACITY, WorkingSet};
