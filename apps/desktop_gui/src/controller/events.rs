//! Events flowing from the backend worker to the UI thread.

use client_core::ProductListState;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    Loading,
    /// Full copy of the controller state after a command finished.
    Synced(ProductListState),
    /// The last add request succeeded; the input fields can be cleared.
    DraftAccepted,
    BackendFailed(String),
}
