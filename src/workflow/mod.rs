//! Form workflows - validation, submission, acknowledgment, refresh.
//!
//! These types hold what a page holds: the loaded records, the form being edited,
//! its per-field errors, a `loading` flag and the notices shown to the user.
//! Every action clears `loading` before returning, whatever the outcome, so the
//! form is always usable again. Nothing is retried.

pub mod product_board;
pub mod profile_editor;

pub use product_board::ProductBoard;
pub use profile_editor::ProfileEditor;

use crate::{client::ClientError, validation::FieldErrors};

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of a user action.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The action went through.
    Done(T),
    /// The form did not validate; nothing was sent.
    Invalid(FieldErrors),
    /// The request failed; the error has been turned into a notice.
    Failed(ClientError),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Text shown to the user for a failed request.
///
/// Server messages are shown as-is; anything else gets a generic text.
#[must_use]
pub fn failure_text(err: &ClientError) -> String {
    match err {
        ClientError::Status { message, .. } => message.clone(),
        ClientError::Request(_) => "Unknown connection error".to_string(),
        ClientError::Decode(_) => "Unexpected response from the server".to_string(),
    }
}
