//! Single-resolution completion handle for detached work
//!
//! A [`Background`] wraps a spawned tokio task. The caller can await it with
//! [`Background::wait`], poll it with [`Background::is_finished`], or chain a
//! continuation with [`Background::then`] / [`Background::on_complete`].

use crate::error::{Error, Result};
use crate::process::ProcessState;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

/// Result of work running on the tokio runtime
#[derive(Debug)]
pub struct Background<T> {
    task: JoinHandle<Result<T>>,
    /// Set once the work resolves: `true` for `Ok`
    outcome: Arc<OnceLock<bool>>,
}

impl<T: Send + 'static> Background<T> {
    /// Run `fut` on the current runtime
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let outcome = Arc::new(OnceLock::new());
        let recorded = Arc::clone(&outcome);
        let task = tokio::spawn(async move {
            let result = fut.await;
            let _ = recorded.set(result.is_ok());
            result
        });
        Self { task, outcome }
    }

    /// Whether the work has resolved
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// `Pending` until the work resolves, then whether it succeeded
    ///
    /// A task that panicked or was cancelled reports `Failed`.
    pub fn state(&self) -> ProcessState {
        match self.outcome.get() {
            Some(true) => ProcessState::Succeeded,
            Some(false) => ProcessState::Failed,
            None if self.task.is_finished() => ProcessState::Failed,
            None => ProcessState::Pending,
        }
    }

    /// Wait for the result
    pub async fn wait(self) -> Result<T> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(Error::background_task(e.to_string())),
        }
    }

    /// Chain a continuation that receives the result once resolved
    pub fn then<U, F>(self, f: F) -> Background<U>
    where
        U: Send + 'static,
        F: FnOnce(Result<T>) -> Result<U> + Send + 'static,
    {
        Background::spawn(async move { f(self.wait().await) })
    }

    /// Register optional success/error callbacks
    ///
    /// The returned handle resolves after the callback has run and yields
    /// the original result.
    pub fn on_complete<S, E>(self, on_success: Option<S>, on_error: Option<E>) -> Background<T>
    where
        S: FnOnce(&T) + Send + 'static,
        E: FnOnce(&Error) + Send + 'static,
    {
        self.then(move |result| {
            match &result {
                Ok(value) => {
                    if let Some(cb) = on_success {
                        cb(value);
                    }
                }
                Err(err) => {
                    if let Some(cb) = on_error {
                        cb(err);
                    }
                }
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_wait_returns_result() {
        let bg = Background::spawn(async { Ok(42) });
        assert_eq!(bg.wait().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_then_maps_result() {
        let bg = Background::spawn(async { Ok(2) }).then(|r| r.map(|v| v * 10));
        assert_eq!(bg.wait().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn test_on_complete_runs_matching_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let ok_hits = hits.clone();

        let bg = Background::spawn(async { Ok("done") }).on_complete(
            Some(move |_: &&str| {
                ok_hits.fetch_add(1, Ordering::SeqCst);
            }),
            None::<fn(&Error)>,
        );
        assert_eq!(bg.wait().await.unwrap(), "done");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let err_hits = Arc::new(AtomicUsize::new(0));
        let seen = err_hits.clone();
        let bg = Background::<()>::spawn(async { Err(Error::invalid_argument("boom")) })
            .on_complete(
                None::<fn(&())>,
                Some(move |_: &Error| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            );
        assert!(bg.wait().await.is_err());
        assert_eq!(err_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_state_is_pending_until_resolved() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let bg = Background::spawn(async move {
            let _ = rx.await;
            Ok(1)
        });
        assert_eq!(bg.state(), ProcessState::Pending);

        tx.send(()).unwrap();
        while !bg.is_finished() {
            tokio::task::yield_now().await;
        }
        assert_eq!(bg.state(), ProcessState::Succeeded);
        assert_eq!(bg.wait().await.unwrap(), 1);

        let failed = Background::<()>::spawn(async { Err(Error::invalid_argument("boom")) });
        while !failed.is_finished() {
            tokio::task::yield_now().await;
        }
        assert_eq!(failed.state(), ProcessState::Failed);
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_error() {
        let bg: Background<()> = Background::spawn(async {
            if true {
                panic!("task died");
            }
            Ok(())
        });
        let err = bg.wait().await.unwrap_err();
        assert!(matches!(err, Error::BackgroundTask { .. }));
    }
}
