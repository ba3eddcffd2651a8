//! View lifetime
//!
//! Async work started by a view must not write to it after it unmounts.
//! Each view owns a `ViewScope`; closing the scope drops whatever is still
//! in flight.

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leptos helper: a scope closed when the current owner is cleaned up
    pub fn for_current_view() -> Self {
        let scope = Self::new();
        let closer = scope.clone();
        leptos::prelude::on_cleanup(move || closer.close());
        scope
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` until it completes or the scope closes.
    ///
    /// Returns `None` if the scope closed first; the future is dropped
    /// without being polled again.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_closed() {
            return None;
        }
        let cancelled = pin!(self.token.cancelled());
        let work = pin!(fut);
        match select(work, cancelled).await {
            Either::Left((output, _)) => Some(output),
            Either::Right(_) => None,
        }
    }

    /// Drive `fut` to completion even if the scope closes meanwhile
    ///
    /// For work that must not be abandoned halfway (a pending media prompt
    /// whose stream still has to be released). The output is withheld if
    /// the scope closed while it ran.
    pub async fn finish<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        (!self.is_closed()).then_some(output)
    }

    /// `run` on the local executor, then hand the output to `apply`
    /// only if the scope is still open.
    pub fn spawn<F, A>(&self, fut: F, apply: A)
    where
        F: Future + 'static,
        A: FnOnce(F::Output) + 'static,
    {
        let scope = self.clone();
        leptos::task::spawn_local(async move {
            if let Some(output) = scope.run(fut).await {
                apply(output);
            }
        });
    }

    /// `finish` on the local executor, then `apply` if still open
    pub fn spawn_to_completion<F, A>(&self, fut: F, apply: A)
    where
        F: Future + 'static,
        A: FnOnce(F::Output) + 'static,
    {
        let scope = self.clone();
        leptos::task::spawn_local(async move {
            if let Some(output) = scope.finish(fut).await {
                apply(output);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::pending;

    #[tokio::test]
    async fn test_open_scope_returns_output() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_closed_scope_skips_work() {
        let scope = ViewScope::new();
        scope.close();
        assert!(scope.is_closed());
        assert_eq!(scope.run(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn test_close_aborts_in_flight_work() {
        let scope = ViewScope::new();
        let closer = scope.clone();

        let handle = tokio::spawn(async move {
            tokio::task::yield_now().await;
            closer.close();
        });

        let out = scope.run(pending::<u32>()).await;
        assert_eq!(out, None);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_finish_completes_work_but_withholds_output() {
        let scope = ViewScope::new();
        let closer = scope.clone();
        let mut completed = false;

        let out = scope
            .finish(async {
                closer.close();
                tokio::task::yield_now().await;
                completed = true;
                7
            })
            .await;

        assert!(completed);
        assert_eq!(out, None);
        assert_eq!(ViewScope::new().finish(async { 7 }).await, Some(7));
    }
}
