// Repository registry types.
// Describes the repositories a report contains, their author rosters, and heavy file payloads.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A contributor known to a repository's report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable author key, matched against a commit's author.
    pub name: String,
    /// Human-readable name shown in place of `name`.
    pub display_name: String,
    /// Lines contributed per file type.
    #[serde(default)]
    pub file_type_contribution: BTreeMap<String, u64>,
}

/// Resident browsing data for one repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEntry {
    /// Folder under the report root holding this repository's commit records.
    pub output_folder_name: String,
    #[serde(default)]
    pub users: Vec<User>,
    /// Heavy per-file payload. Only present while the repository is resident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<serde_json::Value>>,
}

impl RepositoryEntry {
    pub fn new(output_folder_name: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            output_folder_name: output_folder_name.into(),
            users,
            files: None,
        }
    }

    /// Find a roster entry by exact author name.
    pub fn find_user(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.name == name)
    }

    pub fn has_files(&self) -> bool {
        self.files.is_some()
    }
}

/// All repositories in a report, keyed by repository id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoRegistry {
    repos: HashMap<String, RepositoryEntry>,
}

impl RepoRegistry {
    /// File under the report root listing every repository.
    pub const FILE_NAME: &'static str = "repos.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry document.
    pub fn from_slice(bytes: &[u8]) -> crate::error::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: RepositoryEntry) {
        self.repos.insert(id.into(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&RepositoryEntry> {
        self.repos.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RepositoryEntry> {
        self.repos.get_mut(id)
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut RepositoryEntry)> {
        self.repos
            .iter_mut()
            .map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            name: "alice".to_string(),
            display_name: "Alice A.".to_string(),
            file_type_contribution: BTreeMap::from([("rs".to_string(), 120)]),
        }
    }

    #[test]
    fn test_find_user_exact_match() {
        let entry = RepositoryEntry::new("repo-a", vec![alice()]);

        assert_eq!(entry.find_user("alice").unwrap().display_name, "Alice A.");
        assert!(entry.find_user("Alice").is_none());
        assert!(entry.find_user("bob").is_none());
    }

    #[test]
    fn test_registry_from_json() {
        let json = r#"{
            "a": {
                "outputFolderName": "org_a",
                "users": [
                    {"name": "alice", "displayName": "Alice A.", "fileTypeContribution": {"md": 4, "rs": 10}}
                ],
                "files": [{"path": "src/lib.rs"}]
            },
            "b": {"outputFolderName": "org_b"}
        }"#;

        let registry = RepoRegistry::from_slice(json.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);

        let a = registry.get("a").unwrap();
        assert_eq!(a.output_folder_name, "org_a");
        assert_eq!(a.users[0].file_type_contribution["rs"], 10);
        assert!(a.has_files());

        let b = registry.get("b").unwrap();
        assert!(b.users.is_empty());
        assert!(!b.has_files());
    }
}
