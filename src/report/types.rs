// Commit record types.
// Defines the commit report shape on disk and the parsed record handed to the view.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Kind of a line inside a file diff, stored numerically in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LineKind {
    /// `@@ ... @@` hunk header
    HunkHeader,
    Addition,
    Deletion,
    Context,
}

impl TryFrom<u8> for LineKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineKind::HunkHeader),
            1 => Ok(LineKind::Addition),
            2 => Ok(LineKind::Deletion),
            3 => Ok(LineKind::Context),
            other => Err(format!("unknown diff line type {}", other)),
        }
    }
}

impl From<LineKind> for u8 {
    fn from(kind: LineKind) -> Self {
        match kind {
            LineKind::HunkHeader => 0,
            LineKind::Addition => 1,
            LineKind::Deletion => 2,
            LineKind::Context => 3,
        }
    }
}

impl LineKind {
    /// Classify a raw diff line by its leading marker.
    pub fn classify(line: &str) -> Self {
        if line.starts_with('@') {
            LineKind::HunkHeader
        } else if line.starts_with('+') {
            LineKind::Addition
        } else if line.starts_with('-') {
            LineKind::Deletion
        } else {
            LineKind::Context
        }
    }
}

/// Single line of a file diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub line: String,
}

impl DiffLine {
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            kind: LineKind::classify(&line),
            line,
        }
    }
}

/// Changes to one file in a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    pub file_name: String,
    #[serde(default)]
    pub hunks: Vec<DiffLine>,
}

impl FileDiff {
    pub fn insertions(&self) -> usize {
        self.count(LineKind::Addition)
    }

    pub fn deletions(&self) -> usize {
        self.count(LineKind::Deletion)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.hunks.iter().filter(|line| line.kind == kind).count()
    }
}

/// Commit record as written by the report generator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub diffs: Vec<FileDiff>,
}

/// Parsed commit ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    /// `Name <email>`
    pub author: String,
    pub date: String,
    pub title: String,
    pub message: String,
    pub diffs: Vec<FileDiff>,
}

impl From<RawCommit> for CommitRecord {
    fn from(raw: RawCommit) -> Self {
        Self {
            hash: raw.hash,
            author: format!("{} <{}>", raw.author, raw.email),
            date: raw.date,
            title: raw.title,
            message: raw.message,
            diffs: raw.diffs,
        }
    }
}

impl CommitRecord {
    /// Parse a commit record from report bytes.
    pub fn from_slice(bytes: &[u8]) -> crate::error::Result<Self> {
        let raw: RawCommit = serde_json::from_slice(bytes)?;
        Ok(raw.into())
    }

    pub fn file_count(&self) -> usize {
        self.diffs.len()
    }

    pub fn insertions(&self) -> usize {
        self.diffs.iter().map(FileDiff::insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.diffs.iter().map(FileDiff::deletions).sum()
    }

    /// Parse the date if it is RFC 3339 or git's ISO-like format.
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date)
            .or_else(|_| DateTime::parse_from_str(&self.date, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    }
}
