// Commit viewer.
// Runs a display request end to end: author lookup, admission, load, and view update.

use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::error::{Result, ViewError};
use crate::report::{CommitLoader, CommitRecord, RecordSource};
use crate::state::{CommitView, LoadTicket};

/// How a display request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// Unknown repository or no author; nothing was fetched.
    Deactivated,
    Loaded,
    /// The record could not be fetched or parsed.
    Failed(String),
    /// A newer request for the same view resolved first.
    Stale,
}

/// A load that has been admitted and ticketed but not yet fetched.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    ticket: LoadTicket,
    repo: String,
    hash: String,
}

impl PendingLoad {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Fetch the record. This is the only point where a display request waits.
    pub async fn run<S: RecordSource>(self, loader: &CommitLoader<S>) -> CompletedLoad {
        let result = loader.load(&self.repo, &self.hash).await;
        CompletedLoad {
            ticket: self.ticket,
            result,
        }
    }
}

/// A fetched (or failed) load waiting to be applied to its view.
#[derive(Debug)]
pub struct CompletedLoad {
    ticket: LoadTicket,
    result: Result<CommitRecord>,
}

impl CompletedLoad {
    /// Apply to the view. Returns false when the view has moved on to a newer request.
    pub fn apply(self, view: &mut CommitView) -> bool {
        view.finish_load(self.ticket, self.result)
    }
}

/// Coordinates the shared repository cache and the commit loader for views.
pub struct CommitViewer<S> {
    cache: SharedCache,
    loader: CommitLoader<S>,
}

impl<S: RecordSource> CommitViewer<S> {
    pub fn new(cache: SharedCache, source: S, report_root: impl Into<String>) -> Self {
        let loader = CommitLoader::new(source, cache.clone(), report_root);
        Self { cache, loader }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn loader(&self) -> &CommitLoader<S> {
        &self.loader
    }

    /// Resolve the author, check preconditions, and admit the repository.
    ///
    /// Returns `None` after deactivating the view when the repository is unknown
    /// or the request has no author.
    pub fn prepare(&self, view: &mut CommitView) -> Result<Option<PendingLoad>> {
        let request = view.request().clone();
        let mut cache = self
            .cache
            .write()
            .map_err(|_| ViewError::Other("Cache lock poisoned".to_string()))?;

        let Some(entry) = cache.repo(&request.repo) else {
            debug!(repo = %request.repo, "unknown repository, deactivating view");
            view.deactivate();
            return Ok(None);
        };

        let user = request
            .author()
            .and_then(|author| entry.find_user(author))
            .cloned();
        if let Some(user) = &user {
            view.apply_author(user);
        }

        if request.author().is_none() {
            debug!(repo = %request.repo, hash = %request.hash, "no author, deactivating view");
            view.deactivate();
            return Ok(None);
        }

        cache.admit(&request.repo);
        drop(cache);

        Ok(Some(PendingLoad {
            ticket: view.begin_load(),
            repo: request.repo,
            hash: request.hash,
        }))
    }

    /// Display the view's current request.
    pub async fn display(&self, view: &mut CommitView) -> Result<DisplayOutcome> {
        let Some(pending) = self.prepare(view)? else {
            return Ok(DisplayOutcome::Deactivated);
        };

        let completed = pending.run(&self.loader).await;
        let failure = completed.result.as_ref().err().map(ToString::to_string);

        if !completed.apply(view) {
            return Ok(DisplayOutcome::Stale);
        }

        let outcome = match failure {
            Some(message) => DisplayOutcome::Failed(message),
            None => DisplayOutcome::Loaded,
        };
        info!(repo = %view.request().repo, hash = %view.request().hash, ?outcome, "displayed commit");
        Ok(outcome)
    }
}
