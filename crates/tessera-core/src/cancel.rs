//! Cooperative cancellation for the one suspending step of a run: the
//! search collaborator call.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{Result, TesseraError};

/// Observer side of a cancellation signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

/// Trigger side of a cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Creates a linked handle and signal.
#[must_use]
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, Cancellation { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::never()
    }
}

impl Cancellation {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal fires; pends forever if it never can.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Runs `fut` until it completes, `cancel` fires, or `timeout` elapses.
///
/// # Errors
///
/// Returns [`TesseraError::Cancelled`] on cancellation or timeout, otherwise
/// whatever `fut` returns.
pub async fn guard<F, T>(cancel: &Cancellation, timeout: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let bounded = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| TesseraError::Cancelled)?,
            None => fut.await,
        }
    };
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(TesseraError::Cancelled),
        result = bounded => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let (_handle, cancel) = cancellation();
        let value = guard(&cancel, None, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn pre_cancelled_never_polls_the_future() {
        let (handle, cancel) = cancellation();
        handle.cancel();
        assert!(cancel.is_cancelled());

        let polled = AtomicBool::new(false);
        let result = guard(&cancel, None, async {
            polled.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(TesseraError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_future() {
        let (handle, cancel) = cancellation();
        let task = tokio::spawn(async move {
            guard(&cancel, None, std::future::pending::<Result<()>>()).await
        });
        tokio::task::yield_now().await;
        handle.cancel();
        assert!(matches!(task.await.unwrap(), Err(TesseraError::Cancelled)));
    }

    #[tokio::test]
    async fn timeout_maps_to_cancelled() {
        let cancel = Cancellation::never();
        let result = guard(
            &cancel,
            Some(Duration::from_millis(50)),
            std::future::pending::<Result<()>>(),
        )
        .await;
        assert!(matches!(result, Err(TesseraError::Cancelled)));
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let result: Result<()> = guard(&Cancellation::default(), None, async {
            Err(TesseraError::Unmatched)
        })
        .await;
        assert!(matches!(result, Err(TesseraError::Unmatched)));
    }
}
