//! # Resource State
//!
//! The tri-state value every network-backed operation publishes.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One logical request                                  │
//! │                                                                         │
//! │   idle = Success { data: None }                                         │
//! │        │                                                                │
//! │        │ begin()                                                        │
//! │        ▼                                                                │
//! │   ┌─────────┐   Ok(data)    ┌──────────────────────────┐               │
//! │   │ Loading │──────────────►│ Success { data: Some }   │               │
//! │   └─────────┘               └──────────────────────────┘               │
//! │        │                                                                │
//! │        │ Err(e)             ┌──────────────────────────┐               │
//! │        └───────────────────►│ Error { message,         │               │
//! │                             │         data: last good }│               │
//! │                             └──────────────────────────┘               │
//! │                                                                         │
//! │  Every request passes through Loading exactly once and ends in exactly │
//! │  one terminal state. Error keeps the last good payload so a consumer   │
//! │  can keep showing stale data under an error banner.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Generations
//! Two fetches of the same resource can finish out of order. Each request
//! takes a [`RequestTicket`] from a [`RequestSequence`]; a completion is only
//! published if its ticket is still the latest one issued.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// ResourceState
// =============================================================================

/// Outcome of an asynchronous operation as seen by its consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceState<T> {
    /// A request is in flight. No payload guarantee.
    Loading,

    /// The last request succeeded. `data: None` is the idle state before any
    /// request was made (or after a form was reset).
    Success { data: Option<T> },

    /// The last request failed. `data` is the most recent successful payload.
    Error { message: String, data: Option<T> },
}

impl<T> ResourceState<T> {
    /// The idle state: success with nothing loaded yet.
    pub const fn idle() -> Self {
        ResourceState::Success { data: None }
    }

    /// Success carrying a payload.
    pub fn success(data: T) -> Self {
        ResourceState::Success { data: Some(data) }
    }

    /// Error carrying a message and the last good payload.
    pub fn error(message: impl Into<String>, data: Option<T>) -> Self {
        ResourceState::Error {
            message: message.into(),
            data,
        }
    }

    /// Payload, if the state carries one.
    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Loading => None,
            ResourceState::Success { data } | ResourceState::Error { data, .. } => data.as_ref(),
        }
    }

    /// Consumes the state and returns its payload.
    pub fn into_data(self) -> Option<T> {
        match self {
            ResourceState::Loading => None,
            ResourceState::Success { data } | ResourceState::Error { data, .. } => data,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResourceState::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResourceState::Error { .. })
    }

    /// True for the `Success { data: None }` idle state.
    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceState::Success { data: None })
    }

    /// Error message, if the state is an error.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResourceState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Maps the payload, keeping the variant.
    pub fn map<U, F>(self, f: F) -> ResourceState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ResourceState::Loading => ResourceState::Loading,
            ResourceState::Success { data } => ResourceState::Success { data: data.map(f) },
            ResourceState::Error { message, data } => ResourceState::Error {
                message,
                data: data.map(f),
            },
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::idle()
    }
}

// =============================================================================
// Request Generations
// =============================================================================

/// Identifies one issued request. Only comparable against the sequence that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Generation number (1 for the first request).
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic generation counter for one resource.
///
/// ```rust
/// use kasir_core::resource::RequestSequence;
///
/// let seq = RequestSequence::new();
/// let first = seq.begin();
/// let second = seq.begin();
///
/// assert!(!seq.is_latest(first));
/// assert!(seq.is_latest(second));
/// ```
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before it.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
