//! One-shot completion flag raised when the worker exits.

use tokio::sync::watch;

/// Raising side, owned by the worker.
pub struct Notifier {
    tx: watch::Sender<bool>,
}

/// Waiting side. Cloneable; any number of waiters.
#[derive(Clone)]
pub struct CompletionSignal {
    rx: watch::Receiver<bool>,
}

pub fn completion() -> (Notifier, CompletionSignal) {
    let (tx, rx) = watch::channel(false);
    (Notifier { tx }, CompletionSignal { rx })
}

impl Notifier {
    pub fn signal(self) {
        self.tx.send_replace(true);
    }
}

impl CompletionSignal {
    /// Resolves once signaled, or once the notifier is gone without signaling
    /// (the worker died), so waiters are never stranded.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|done| *done).await;
    }

    pub fn wait_blocking(&self) {
        futures::executor::block_on(self.wait());
    }

    pub fn is_signaled(&self) -> bool {
        let done = *self.rx.borrow();
        done || self.rx.has_changed().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_signal_releases_all_waiters() {
        let (notifier, signal) = completion();
        assert!(!signal.is_signaled());

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let s = signal.clone();
                std::thread::spawn(move || s.wait_blocking())
            })
            .collect();

        std::thread::sleep(Duration::from_millis(20));
        notifier.signal();
        for w in waiters {
            w.join().unwrap();
        }
        assert!(signal.is_signaled());

        // Waiting after the fact returns immediately.
        signal.wait_blocking();
    }

    #[tokio::test]
    async fn test_dropped_notifier_releases_waiters() {
        let (notifier, signal) = completion();
        drop(notifier);
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("wait should resolve after notifier drop");
        assert!(signal.is_signaled());
    }
}
