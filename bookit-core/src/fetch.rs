//! Page data loading that can be abandoned.
//!
//! A view owns a [`FetchState`]. Every load takes a [`FetchTicket`]; only the
//! newest ticket may land a result, and [`FetchState::cancel`] invalidates all
//! outstanding ones, so a view that has gone away (or moved on to a newer load)
//! never receives a stale update.
//!
//! [`Request`] is the I/O half: the remote call runs on its own task and is
//! aborted when the handle is dropped or cancelled.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};

use crate::CoreResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Loadable<T> {
    Idle,
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Loadable::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct FetchState<T> {
    generation: u64,
    state: Loadable<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: Loadable::Idle,
        }
    }

    /// Start a load. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = Loadable::Pending;
        FetchTicket(self.generation)
    }

    /// Land the outcome of the load `ticket` was issued for.
    /// Returns `false` (and changes nothing) when the ticket is stale.
    pub fn resolve(&mut self, ticket: FetchTicket, outcome: Result<T, String>) -> bool {
        if ticket.0 != self.generation || !self.state.is_pending() {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Dropping stale fetch result"
            );
            return false;
        }
        self.state = match outcome {
            Ok(value) => Loadable::Ready(value),
            Err(msg) => Loadable::Failed(msg),
        };
        true
    }

    /// Abandon whatever is in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
        if self.state.is_pending() {
            self.state = Loadable::Idle;
        }
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request cancelled")]
    Cancelled,
    #[error("Request task failed: {0}")]
    Panicked(String),
}

impl From<JoinError> for FetchError {
    fn from(err: JoinError) -> Self {
        if err.is_cancelled() {
            FetchError::Cancelled
        } else {
            FetchError::Panicked(err.to_string())
        }
    }
}

/// An in-flight remote call. Aborted on drop.
#[derive(Debug)]
pub struct Request<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Request<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }
}

impl<T> Request<T> {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl<T> Future for Request<T> {
    type Output = Result<T, FetchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.map_err(FetchError::from))
    }
}

impl<T> Drop for Request<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run a repository call as a [`Request`] and flatten the result.
pub async fn run<T, F>(future: F) -> CoreResult<T>
where
    T: Send + 'static,
    F: Future<Output = CoreResult<T>> + Send + 'static,
{
    match Request::spawn(future).await {
        Ok(result) => result,
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_latest_ticket_wins() {
        let mut state: FetchState<&str> = FetchState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(!state.resolve(first, Ok("stale")));
        assert!(state.state().is_pending());

        assert!(state.resolve(second, Ok("fresh")));
        assert_eq!(state.state(), &Loadable::Ready("fresh"));
    }

    #[test]
    fn test_cancel_discards_late_result() {
        let mut state: FetchState<u32> = FetchState::new();
        let ticket = state.begin();
        state.cancel();

        assert_eq!(state.state(), &Loadable::Idle);
        assert!(!state.resolve(ticket, Ok(1)));
        assert_eq!(state.state(), &Loadable::Idle);
    }

    #[test]
    fn test_failure_is_recorded() {
        let mut state: FetchState<u32> = FetchState::new();
        let ticket = state.begin();
        assert!(state.resolve(ticket, Err("Failed to load".to_string())));
        assert_eq!(state.state().error(), Some("Failed to load"));
    }

    #[tokio::test]
    async fn test_request_yields_output() {
        let value = Request::spawn(async { 21 * 2 }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_dropped_request_is_aborted() {
        let landed = Arc::new(AtomicBool::new(false));
        let flag = landed.clone();

        let request = Request::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(request);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!landed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancelled_request_reports_cancellation() {
        let request = Request::spawn(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
        });
        request.cancel();
        assert!(matches!(request.await, Err(FetchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_flattens_repository_errors() {
        let result: CoreResult<u8> = run(async { Err(crate::CoreError::Cancelled) }).await;
        assert!(matches!(result, Err(crate::CoreError::Cancelled)));
    }
}
