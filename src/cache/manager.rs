// Cache manager for resident repository data.
// Owns the registry and the working set, and is the only place payloads are dropped.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use super::registry::{RepoRegistry, RepositoryEntry};
use super::working_set::WorkingSet;

/// Handle shared between the viewer and the commit loader.
pub type SharedCache = Arc<RwLock<RepoCache>>;

/// Result of admitting a repository into the working set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Admission {
    /// Repository whose payload was dropped to make room.
    pub evicted: Option<String>,
}

/// Registry plus bounded working set.
#[derive(Debug, Default)]
pub struct RepoCache {
    registry: RepoRegistry,
    working_set: WorkingSet,
}

impl RepoCache {
    /// Payloads of repositories outside `working_set` are dropped.
    pub fn new(mut registry: RepoRegistry, working_set: WorkingSet) -> Self {
        for (id, entry) in registry.entries_mut() {
            if !working_set.contains(id) {
                entry.files = None;
            }
        }

        Self {
            registry,
            working_set,
        }
    }

    /// Wrap into a shareable handle.
    pub fn shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    pub fn registry(&self) -> &RepoRegistry {
        &self.registry
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn repo(&self, id: &str) -> Option<&RepositoryEntry> {
        self.registry.get(id)
    }

    /// Record `id` as referenced, evicting the oldest resident repository when full.
    ///
    /// Eviction drops the evicted repository's `files` payload; a later display
    /// of that repository has to repopulate it.
    pub fn admit(&mut self, id: &str) -> Admission {
        let evicted = self.working_set.admit(id);

        match &evicted {
            Some(old) => {
                if let Some(entry) = self.registry.get_mut(old) {
                    entry.files = None;
                }
                info!(evicted = %old, admitted = %id, "evicted repository payload");
            }
            None => debug!(repo = %id, resident = self.working_set.len(), "admitted repository"),
        }

        Admission { evicted }
    }

    /// Populate a repository's heavy payload. Returns false unless the
    /// repository is known and currently in the working set.
    pub fn install_files(&mut self, id: &str, files: Vec<serde_json::Value>) -> bool {
        if !self.working_set.contains(id) {
            return false;
        }

        match self.registry.get_mut(id) {
            Some(entry) => {
                entry.files = Some(files);
                true
            }
            None => false,
        }
    }

    pub fn files_resident(&self, id: &str) -> bool {
        self.registry.get(id).is_some_and(RepositoryEntry::has_files)
    }
}
