// Commit loader.
// Resolves a commit's record location from the shared cache and fetches and parses it.

use tracing::{debug, info, warn};

use crate::cache::{RepoRegistry, SharedCache};
use crate::error::{Result, ViewError};

use super::paths;
use super::source::RecordSource;
use super::types::CommitRecord;

/// Loads commit records for repositories known to the shared cache.
pub struct CommitLoader<S> {
    source: S,
    cache: SharedCache,
    report_root: String,
}

impl<S: RecordSource> CommitLoader<S> {
    pub fn new(source: S, cache: SharedCache, report_root: impl Into<String>) -> Self {
        Self {
            source,
            cache,
            report_root: report_root.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn report_root(&self) -> &str {
        &self.report_root
    }

    /// Location of a commit record. The repository must already be registered.
    pub fn record_location(&self, repo_id: &str, hash: &str) -> Result<String> {
        let cache = self
            .cache
            .read()
            .map_err(|_| ViewError::Other("Cache lock poisoned".to_string()))?;
        let entry = cache
            .repo(repo_id)
            .ok_or_else(|| ViewError::UnknownRepo(repo_id.to_string()))?;

        Ok(paths::record_path(
            &self.report_root,
            &entry.output_folder_name,
            hash,
        ))
    }

    /// Fetch and parse one commit record.
    pub async fn load(&self, repo_id: &str, hash: &str) -> Result<CommitRecord> {
        let location = self.record_location(repo_id, hash)?;
        debug!(repo = %repo_id, %location, "fetching commit record");

        let bytes = self.source.fetch(&location).await.inspect_err(|e| {
            warn!(repo = %repo_id, %location, error = %e, "commit record fetch failed");
        })?;

        let record = CommitRecord::from_slice(&bytes).inspect_err(|e| {
            warn!(repo = %repo_id, %location, error = %e, "commit record is malformed");
        })?;

        info!(
            repo = %repo_id,
            hash = %record.hash,
            files = record.file_count(),
            "loaded commit record"
        );
        Ok(record)
    }
}

/// Fetch the repository registry stored under `report_root`.
pub async fn fetch_registry<S: RecordSource>(source: &S, report_root: &str) -> Result<RepoRegistry> {
    let location = paths::registry_path(report_root);
    debug!(%location, "fetching repository registry");

    let bytes = source.fetch(&location).await?;
    let registry = RepoRegistry::from_slice(&bytes)?;
    if registry.is_empty() {
        warn!(%location, "repository registry is empty");
    }

    info!(repos = registry.len(), "loaded repository registry");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{RepoCache, RepositoryEntry, WorkingSet};
    use crate::report::source::memory::MemorySource;

    const RECORD: &str = r#"{
        "hash": "abc123", "author": "alice", "email": "alice@example.com",
        "date": "2024-03-05T13:02:11Z", "title": "Add loader", "message": "",
        "diffs": [{"fileName": "src/loader.rs", "hunks": [{"type": 1, "line": "+fn load()"}]}]
    }"#;

    fn cache() -> SharedCache {
        let mut registry = RepoRegistry::new();
        registry.insert("a", RepositoryEntry::new("org_a", Vec::new()));
        RepoCache::new(registry, WorkingSet::new()).shared()
    }

    #[tokio::test]
    async fn test_load_builds_path_and_parses() {
        let source = MemorySource::new().with("report/org_a/abc123", RECORD);
        let loader = CommitLoader::new(source, cache(), "report");

        let record = loader.load("a", "abc123").await.unwrap();

        assert_eq!(record.author, "alice <alice@example.com>");
        assert_eq!(record.file_count(), 1);
        assert_eq!(loader.source().requests(), vec!["report/org_a/abc123"]);
    }

    #[tokio::test]
    async fn test_load_unknown_repo_issues_no_request() {
        let loader = CommitLoader::new(MemorySource::new(), cache(), "report");

        let err = loader.load("zzz", "abc123").await.unwrap_err();

        assert!(matches!(err, ViewError::UnknownRepo(id) if id == "zzz"));
        assert!(loader.source().requests().is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_record_propagates_once() {
        let loader = CommitLoader::new(MemorySource::new(), cache(), "report");

        let err = loader.load("a", "nope").await.unwrap_err();

        assert!(matches!(err, ViewError::NotFound(_)));
        assert_eq!(loader.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_load_malformed_record() {
        let source = MemorySource::new().with("report/org_a/bad", "{not json");
        let loader = CommitLoader::new(source, cache(), "report");

        let err = loader.load("a", "bad").await.unwrap_err();
        assert!(matches!(err, ViewError::Json(_)));
    }

    #[tokio::test]
    async fn test_fetch_registry() {
        let source = MemorySource::new().with(
            "report/repos.json",
            r#"{"a": {"outputFolderName": "org_a", "users": []}}"#,
        );

        let registry = fetch_registry(&source, "report/").await.unwrap();
        assert_eq!(registry.get("a").unwrap().output_folder_name, "org_a");
    }
}
