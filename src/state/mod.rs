// State management module.
// Holds per-view state for the commit detail view.

pub mod commit_view;
pub mod loading;

pub use commit_view::{CommitView, DisplayRequest, LoadTicket};
pub use loading::LoadingState;
