// Report location utilities.
// Builds the locations of commit records and the repository registry under a report root.

use crate::cache::RepoRegistry;

/// Location of a commit record: `{root}/{output_folder}/{hash}`.
pub fn record_path(root: &str, output_folder: &str, hash: &str) -> String {
    format!(
        "{}/{}/{}",
        trim_root(root),
        sanitize_name(output_folder),
        sanitize_name(hash)
    )
}

/// Location of the repository registry document.
pub fn registry_path(root: &str) -> String {
    format!("{}/{}", trim_root(root), RepoRegistry::FILE_NAME)
}

fn trim_root(root: &str) -> &str {
    root.trim_end_matches('/')
}

/// Sanitize a single path component.
/// Replaces separators and other problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
