//! User-facing notices and detail-page load states.

use crate::service::error::{ServiceError, ServiceResult};

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Transport or service failure; previous data stays on screen.
    Failure,
    /// The record or person does not exist.
    NotFound,
}

/// Transient message shown by the UI after a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// `"{context}: {err}"`, classified by error kind.
    pub fn from_error(context: &str, err: &ServiceError) -> Self {
        let kind = if err.is_not_found() {
            NoticeKind::NotFound
        } else {
            NoticeKind::Failure
        };
        Self {
            kind,
            message: format!("{context}: {err}"),
        }
    }
}

/// Load state of a single-record page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    Loaded(T),
    /// Rendered with a link back to the owning list.
    NotFound,
    Failed(Notice),
}

impl<T> DetailState<T> {
    pub fn from_result(context: &str, result: ServiceResult<T>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) if err.is_not_found() => Self::NotFound,
            Err(err) => Self::Failed(Notice::from_error(context, &err)),
        }
    }

    pub fn map<U, F>(self, f: F) -> DetailState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Loading => DetailState::Loading,
            Self::Loaded(value) => DetailState::Loaded(f(value)),
            Self::NotFound => DetailState::NotFound,
            Self::Failed(notice) => DetailState::Failed(notice),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}
