// Commit view state.
// Tracks the displayed commit, its load progress, and which file diffs are expanded.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::User;
use crate::error::Result;
use crate::report::CommitRecord;

use super::loading::LoadingState;

/// Which commit the surrounding application wants displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    pub repo: String,
    pub author: Option<String>,
    pub hash: String,
}

impl DisplayRequest {
    pub fn new(repo: impl Into<String>, author: Option<String>, hash: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            author,
            hash: hash.into(),
        }
    }

    /// Author key, treating an empty string as missing.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.is_empty())
    }
}

/// Identifies one load issued by a view. Only the latest ticket may resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// State of one commit detail view.
#[derive(Debug)]
pub struct CommitView {
    request: DisplayRequest,
    /// Roster display name of the requested author, when found.
    display_name: Option<String>,
    /// Lines per file type for the requested author, when found.
    file_type_contribution: Option<BTreeMap<String, u64>>,
    /// Cleared when the request cannot be displayed.
    active: bool,
    commit: LoadingState<CommitRecord>,
    /// One flag per diff in `commit`.
    expanded: Vec<bool>,
    active_files_count: usize,
    latest_ticket: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl CommitView {
    pub fn new(request: DisplayRequest) -> Self {
        Self {
            request,
            display_name: None,
            file_type_contribution: None,
            active: true,
            commit: LoadingState::Idle,
            expanded: Vec::new(),
            active_files_count: 0,
            latest_ticket: 0,
            loaded_at: None,
        }
    }

    pub fn request(&self) -> &DisplayRequest {
        &self.request
    }

    /// Point the view at another commit. The previous record stays until the new
    /// one lands, but any load issued for the old request can no longer apply.
    pub fn retarget(&mut self, request: DisplayRequest) {
        self.latest_ticket += 1;
        self.request = request;
        self.display_name = None;
        self.file_type_contribution = None;
        self.active = true;
    }

    /// Name to show for the author: roster display name, else the raw author key.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.request.author())
            .unwrap_or_default()
    }

    pub fn file_type_contribution(&self) -> Option<&BTreeMap<String, u64>> {
        self.file_type_contribution.as_ref()
    }

    /// Override the author display with roster metadata.
    pub fn apply_author(&mut self, user: &User) {
        self.display_name = Some(user.display_name.clone());
        self.file_type_contribution = Some(user.file_type_contribution.clone());
    }

    /// Mark the request as not displayable. Drops the current record and
    /// invalidates any load still in flight.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.latest_ticket += 1;
        self.commit = LoadingState::Idle;
        self.expanded.clear();
        self.active_files_count = 0;
        self.loaded_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.commit = LoadingState::Loading;
        LoadTicket(self.latest_ticket)
    }

    /// Apply a finished load. Returns false, leaving the view untouched, when a
    /// newer load has been issued since `ticket`.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<CommitRecord>) -> bool {
        if ticket.0 != self.latest_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale commit load"
            );
            return false;
        }

        match result {
            Ok(record) => {
                self.expanded = vec![true; record.diffs.len()];
                self.active_files_count = record.diffs.len();
                self.commit = LoadingState::Loaded(record);
                self.loaded_at = Some(Utc::now());
            }
            Err(e) => {
                self.expanded.clear();
                self.active_files_count = 0;
                self.commit = LoadingState::Error(e.to_string());
                self.loaded_at = None;
            }
        }
        true
    }

    pub fn state(&self) -> &LoadingState<CommitRecord> {
        &self.commit
    }

    pub fn commit(&self) -> Option<&CommitRecord> {
        self.commit.data()
    }

    pub fn is_loaded(&self) -> bool {
        self.commit.is_loaded()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Expand or collapse every file diff.
    pub fn set_all_expanded(&mut self, active: bool) {
        self.expanded.iter_mut().for_each(|flag| *flag = active);
        self.active_files_count = if active { self.expanded.len() } else { 0 };
        debug!(active, count = self.active_files_count, "set all files expanded");
    }

    /// Flip one file's expanded flag and recount. Returns the new flag.
    pub fn toggle_file(&mut self, index: usize) -> Option<bool> {
        let flag = self.expanded.get_mut(index)?;
        *flag = !*flag;
        let now = *flag;
        self.recount();
        Some(now)
    }

    pub fn is_file_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Recompute the active-file count from the per-file flags.
    pub fn recount(&mut self) -> usize {
        self.active_files_count = self.expanded.iter().filter(|flag| **flag).count();
        self.active_files_count
    }

    pub fn active_files_count(&self) -> usize {
        self.active_files_count
    }
}
