//! # Resource Cell
//!
//! Observable holder of one [`ResourceState`].
//!
//! ## Publishing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ResourceCell publishing                              │
//! │                                                                         │
//! │  begin()  ─► ticket N, publish Loading                                  │
//! │                                                                         │
//! │  finish(ticket, Ok(data))                                               │
//! │     ticket == latest ─► remember data, publish Success { data }        │
//! │     ticket <  latest ─► drop (a newer request is in flight or done)    │
//! │                                                                         │
//! │  finish(ticket, Err(e))                                                 │
//! │     ticket == latest ─► publish Error { e, data: last Success }        │
//! │     ticket <  latest ─► drop                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers hold a `watch::Receiver` and only ever see the latest value.

use kasir_core::{RequestSequence, RequestTicket, ResourceState};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ClientResult;

/// One observable resource with last-write-wins protection.
#[derive(Debug)]
pub struct ResourceCell<T> {
    name: &'static str,
    tx: watch::Sender<ResourceState<T>>,
    sequence: RequestSequence,
    /// Last successful payload. The lock also orders begin/finish.
    last_good: Mutex<Option<T>>,
}

impl<T> ResourceCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle cell. `name` only appears in logs.
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(ResourceState::idle());
        ResourceCell {
            name,
            tx,
            sequence: RequestSequence::new(),
            last_good: Mutex::new(None),
        }
    }

    /// New receiver observing this cell.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.tx.subscribe()
    }

    /// Copy of the current state.
    pub fn current(&self) -> ResourceState<T> {
        self.tx.borrow().clone()
    }

    /// Starts a request and publishes `Loading`.
    pub fn begin(&self) -> RequestTicket {
        let _guard = self.last_good.lock().unwrap_or_else(PoisonError::into_inner);
        let ticket = self.sequence.begin();
        self.tx.send_replace(ResourceState::Loading);
        debug!(resource = self.name, generation = ticket.generation(), "Request started");
        ticket
    }

    /// Publishes the outcome of `ticket`.
    ///
    /// Returns `false` when the completion was stale and dropped.
    pub fn finish(&self, ticket: RequestTicket, result: ClientResult<T>) -> bool {
        self.settle(ticket, result).is_some()
    }

    /// Like [`finish`](Self::finish), but hands back the state that was
    /// published. `None` when the completion was stale and dropped.
    pub fn settle(
        &self,
        ticket: RequestTicket,
        result: ClientResult<T>,
    ) -> Option<ResourceState<T>> {
        let mut last_good = self.last_good.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.sequence.is_latest(ticket) {
            debug!(
                resource = self.name,
                generation = ticket.generation(),
                latest = self.sequence.issued(),
                "Dropping stale completion"
            );
            return None;
        }

        let state = match result {
            Ok(data) => {
                *last_good = Some(data.clone());
                ResourceState::success(data)
            }
            Err(e) => {
                warn!(resource = self.name, error = %e, "Request failed");
                ResourceState::error(e.to_string(), last_good.clone())
            }
        };
        self.tx.send_replace(state.clone());
        Some(state)
    }

    /// Back to idle. Invalidates any request still in flight.
    pub fn reset(&self) {
        let mut last_good = self.last_good.lock().unwrap_or_else(PoisonError::into_inner);
        self.sequence.begin();
        *last_good = None;
        self.tx.send_replace(ResourceState::idle());
    }

    /// Back to idle, unless a request newer than `ticket` has started.
    pub fn reset_if_latest(&self, ticket: RequestTicket) -> bool {
        let mut last_good = self.last_good.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.sequence.is_latest(ticket) {
            return false;
        }
        *last_good = None;
        self.tx.send_replace(ResourceState::idle());
        true
    }
}
