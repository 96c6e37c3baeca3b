//! Cancellation scopes
//!
//! A [`CancellationScope`] is the capability a screen hands to every request
//! it issues. Tearing the screen down cancels the scope; requests racing the
//! teardown resolve as cancelled and their continuations are never invoked.
//!
//! ```ignore
//! let scope = CancellationScope::new();
//! let _guard = scope.guard(); // cancels when the screen is dropped
//!
//! let task = {
//!     let client = client.clone();
//!     let scope = scope.clone();
//!     async move { client.list::<Slider>(&scope).await }
//! };
//! scope.spawn(task, move |outcome| render(outcome));
//! ```

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard, WaitForCancellationFuture};
use tracing::debug;

/// Cooperative cancellation bound to a caller's visible lifetime.
///
/// Clones observe the same cancellation state. Child scopes are cancelled
/// together with their parent but can also be cancelled on their own.
#[derive(Debug, Clone, Default)]
pub struct CancellationScope {
    token: CancellationToken,
}

impl CancellationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a scope that is cancelled when `self` is
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!("Cancelling scope");
        }
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Guard that cancels the scope when dropped
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            _inner: self.token.clone().drop_guard(),
        }
    }

    /// Drive `future` unless the scope is cancelled first.
    ///
    /// Returns `None` when cancellation won the race or had already happened.
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = future => {
                if self.is_cancelled() {
                    None
                } else {
                    Some(output)
                }
            }
        }
    }

    /// Run `future` in the background and hand its output to `continuation`
    /// only while the scope is still live.
    pub fn spawn<F, C>(&self, future: F, continuation: C) -> JoinHandle<()>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
        C: FnOnce(F::Output) + Send + 'static,
    {
        let scope = self.clone();
        tokio::spawn(async move {
            if let Some(output) = scope.run(future).await {
                scope.deliver(output, continuation);
            } else {
                debug!("Dropping result of a cancelled scope");
            }
        })
    }

    /// Invoke `continuation` with `value` if the scope is live.
    ///
    /// Returns whether the continuation ran.
    pub fn deliver<T, C>(&self, value: T, continuation: C) -> bool
    where
        C: FnOnce(T),
    {
        if self.is_cancelled() {
            return false;
        }
        continuation(value);
        true
    }
}

/// Cancels its scope on drop
#[must_use = "dropping the guard cancels the scope immediately"]
pub struct ScopeGuard {
    _inner: DropGuard,
}

impl std::fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScopeGuard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_when_live() {
        let scope = CancellationScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_run_after_cancel_is_none() {
        let scope = CancellationScope::new();
        scope.cancel();
        scope.cancel();
        assert_eq!(scope.run(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let scope = CancellationScope::new();
        let canceller = scope.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = scope.run(std::future::pending::<u8>()).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_guard_cancels_on_drop() {
        let scope = CancellationScope::new();
        {
            let _guard = scope.guard();
            assert!(!scope.is_cancelled());
        }
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = CancellationScope::new();
        let child = parent.child();

        child.cancel();
        assert!(!parent.is_cancelled());

        let second = parent.child();
        parent.cancel();
        assert!(second.is_cancelled());
    }

    #[tokio::test]
    async fn test_spawn_delivers_when_live() {
        let scope = CancellationScope::new();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        scope
            .spawn(async { 1 }, move |_| flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();

        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_spawn_suppresses_continuation_after_teardown() {
        let scope = CancellationScope::new();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = scope.spawn(
            async move {
                let _ = rx.await;
            },
            move |_| flag.store(true, Ordering::SeqCst),
        );

        scope.cancel();
        let _ = tx.send(());
        handle.await.unwrap();

        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_deliver() {
        let scope = CancellationScope::new();
        let mut seen = None;
        assert!(scope.deliver(3, |v| seen = Some(v)));
        assert_eq!(seen, Some(3));

        scope.cancel();
        assert!(!scope.deliver(4, |v| seen = Some(v)));
        assert_eq!(seen, Some(3));
    }
}
