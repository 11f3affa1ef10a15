//! Request fencing: last-initiated request wins.
//!
//! # Invariants
//! - Tokens are issued from a per-owner counter and strictly increase.
//! - Only the most recently issued token is current; any response carrying
//!   an older token is stale and must not touch displayed state.
//! - Settling the current token clears the in-flight flag.

use crate::service::error::ServiceResult;
use std::fmt::{Display, Formatter};

/// Identifies one issued request within its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl Display for RequestToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-owner token counter plus the currently awaited token.
#[derive(Debug, Default)]
pub struct RequestFence {
    issued: u64,
    awaiting: Option<RequestToken>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token; it supersedes every earlier one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.awaiting = Some(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.awaiting == Some(token)
    }

    /// Accepts `token` if it is current and clears the in-flight flag.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.awaiting = None;
        true
    }

    /// Drops the awaited token so any pending response becomes stale.
    pub fn invalidate(&mut self) {
        self.awaiting = None;
    }

    pub fn in_flight(&self) -> bool {
        self.awaiting.is_some()
    }
}

/// A response tagged with the token of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub token: RequestToken,
    pub result: ServiceResult<T>,
}

impl<T> Outcome<T> {
    pub fn new(token: RequestToken, result: ServiceResult<T>) -> Self {
        Self { token, result }
    }
}

/// What a completion did to the owner's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result replaced the displayed data.
    Applied,
    /// A newer request was issued; the response was dropped.
    Superseded,
    /// The current request failed; previous data is kept.
    Failed(crate::notice::Notice),
}

#[cfg(test)]
mod tests {
    use super::RequestFence;

    #[test]
    fn later_token_supersedes_earlier() {
        let mut fence = RequestFence::new();
        let first = fence.issue();
        let second = fence.issue();
        assert!(first < second);
        assert!(!fence.settle(first));
        assert!(fence.in_flight());
        assert!(fence.settle(second));
        assert!(!fence.in_flight());
        assert!(!fence.settle(second));
    }

    #[test]
    fn invalidate_makes_pending_stale() {
        let mut fence = RequestFence::new();
        let token = fence.issue();
        fence.invalidate();
        assert!(!fence.settle(token));
    }
}
