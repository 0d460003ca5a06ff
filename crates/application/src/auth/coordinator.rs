//! Single-flight token refresh coordination.
//!
//! The first request to observe a 401 takes a [`RefreshLease`] and performs the
//! refresh. Every request that observes a 401 while the lease is held is
//! queued and handed the outcome of that same refresh, in arrival order.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Outcome handed to every queued request: the new access token or the
/// refresh error.
type RefreshOutcome = ApiResult<String>;

/// A request parked until the in-flight refresh settles.
#[derive(Debug)]
struct PendingRequest {
    /// `METHOD path` of the parked request.
    label: String,
    waiter: oneshot::Sender<RefreshOutcome>,
}

#[derive(Debug, Default)]
struct RefreshState {
    in_flight: bool,
    queue: VecDeque<PendingRequest>,
}

/// Serializes token refreshes for one token store.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

/// Role assigned to a request that needs a fresh token.
#[derive(Debug)]
pub enum RefreshTicket<'a> {
    /// No refresh was running; the holder must perform it and settle the lease.
    Lead(RefreshLease<'a>),
    /// A refresh is running; await its outcome.
    Wait(PendingRefresh),
}

impl RefreshCoordinator {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the refresh for `label`, or queues behind the running one.
    ///
    /// The check and the claim happen in one critical section, so two
    /// callers can never both lead.
    pub fn begin(&self, label: impl Into<String>) -> RefreshTicket<'_> {
        let label = label.into();
        let mut state = self.state.lock();
        if state.in_flight {
            let (waiter, receiver) = oneshot::channel();
            state.queue.push_back(PendingRequest {
                label: label.clone(),
                waiter,
            });
            debug!(request = %label, queued = state.queue.len(), "queued behind token refresh");
            RefreshTicket::Wait(PendingRefresh { receiver })
        } else {
            state.in_flight = true;
            debug!(request = %label, "starting token refresh");
            RefreshTicket::Lead(RefreshLease {
                coordinator: self,
                settled: false,
            })
        }
    }

    /// Returns true while a refresh is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().in_flight
    }

    /// Number of requests waiting on the current refresh.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Labels of the waiting requests, in queue order.
    #[must_use]
    pub fn pending_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .queue
            .iter()
            .map(|pending| pending.label.clone())
            .collect()
    }

    /// Ends the refresh and takes the queue in one critical section.
    fn finish(&self) -> VecDeque<PendingRequest> {
        let mut state = self.state.lock();
        state.in_flight = false;
        std::mem::take(&mut state.queue)
    }
}

/// Exclusive right to perform the current refresh.
///
/// Settle it with [`resolve`](Self::resolve) or [`reject`](Self::reject).
/// Dropping it unsettled rejects the queue with
/// [`ApiError::RefreshInterrupted`] and frees the coordinator.
#[derive(Debug)]
#[must_use = "an unsettled lease rejects every queued request"]
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Hands `access_token` to every queued request. Returns how many were waiting.
    pub fn resolve(mut self, access_token: &str) -> usize {
        self.settle(&Ok(access_token.to_string()))
    }

    /// Hands `error` to every queued request. Returns how many were waiting.
    pub fn reject(mut self, error: &ApiError) -> usize {
        self.settle(&Err(error.clone()))
    }

    fn settle(&mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        let queue = self.coordinator.finish();
        let waiting = queue.len();
        for pending in queue {
            if pending.waiter.send(outcome.clone()).is_err() {
                debug!(request = %pending.label, "waiter went away before refresh settled");
            }
        }
        debug!(waiting, success = outcome.is_ok(), "token refresh settled");
        waiting
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("token refresh abandoned before it settled");
            self.settle(&Err(ApiError::RefreshInterrupted));
        }
    }
}

/// Handle to the outcome of a refresh led by another request.
#[derive(Debug)]
pub struct PendingRefresh {
    receiver: oneshot::Receiver<RefreshOutcome>,
}

impl PendingRefresh {
    /// Waits for the leading request to settle the refresh.
    ///
    /// # Errors
    ///
    /// Returns the refresh error, or `ApiError::RefreshInterrupted` if the
    /// lease vanished without settling.
    pub async fn wait(self) -> ApiResult<String> {
        self.receiver
            .await
            .unwrap_or(Err(ApiError::RefreshInterrupted))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use flockloop_domain::StatusCode;
    use pretty_assertions::assert_eq;

    fn lead(ticket: RefreshTicket<'_>) -> RefreshLease<'_> {
        match ticket {
            RefreshTicket::Lead(lease) => lease,
            RefreshTicket::Wait(_) => panic!("expected to lead"),
        }
    }

    fn wait(ticket: RefreshTicket<'_>) -> PendingRefresh {
        match ticket {
            RefreshTicket::Wait(pending) => pending,
            RefreshTicket::Lead(_) => panic!("expected to wait"),
        }
    }

    #[tokio::test]
    async fn test_only_first_caller_leads() {
        let coordinator = RefreshCoordinator::new();
        let lease = lead(coordinator.begin("GET /a"));
        let b = wait(coordinator.begin("GET /b"));
        let c = wait(coordinator.begin("GET /c"));

        assert!(coordinator.is_refreshing());
        assert_eq!(coordinator.pending_labels(), vec!["GET /b", "GET /c"]);

        assert_eq!(lease.resolve("T2"), 2);
        assert!(!coordinator.is_refreshing());
        assert_eq!(coordinator.pending(), 0);
        assert_eq!(b.wait().await.unwrap(), "T2");
        assert_eq!(c.wait().await.unwrap(), "T2");
    }

    #[tokio::test]
    async fn test_reject_reaches_every_waiter() {
        let coordinator = RefreshCoordinator::new();
        let lease = lead(coordinator.begin("GET /a"));
        let b = wait(coordinator.begin("GET /b"));

        let error = ApiError::Status {
            status: StatusCode(500),
            detail: None,
        };
        assert_eq!(lease.reject(&error), 1);
        assert_eq!(b.wait().await.unwrap_err(), error);
        assert!(!coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn test_dropped_lease_interrupts_waiters() {
        let coordinator = RefreshCoordinator::new();
        let lease = lead(coordinator.begin("GET /a"));
        let b = wait(coordinator.begin("GET /b"));

        drop(lease);

        assert!(!coordinator.is_refreshing());
        assert_eq!(b.wait().await.unwrap_err(), ApiError::RefreshInterrupted);
    }

    #[test]
    fn test_next_refresh_can_start_after_settle() {
        let coordinator = RefreshCoordinator::new();
        let first = lead(coordinator.begin("GET /a"));
        first.resolve("T2");

        let second = lead(coordinator.begin("GET /a"));
        assert!(coordinator.is_refreshing());
        second.resolve("T3");
        assert!(!coordinator.is_refreshing());
    }
}
