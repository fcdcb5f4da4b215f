//! # Search Debouncer
//!
//! Holds back typed search text until input goes quiet.
//!
//! ```text
//! push("l") push("la") push("lap")         push("laptop")
//!    │         │          │                    │
//! ───┴─────────┴──────────┴────── 700 ms ──────┴────── 700 ms ──►
//!                                  │                      │
//!                             emit("lap")           emit("laptop")
//! ```
//!
//! Each push restarts the window. Only the last value of a burst is
//! emitted. A value still pending when the debouncer is dropped is
//! discarded.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::{ClientError, ClientResult};

/// Sending half of a running debounce task.
#[derive(Debug)]
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Spawns the debounce task on the current runtime.
    ///
    /// Returns the debouncer and the receiver of committed values.
    pub fn spawn(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, mut rx) = mpsc::unbounded_channel::<String>();
        let (out, committed) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            let mut pending: Option<String> = None;

            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    Some(value) => match tokio::time::timeout(window, rx.recv()).await {
                        Ok(Some(next)) => {
                            trace!(superseded = %value, "Search input superseded");
                            pending = Some(next);
                        }
                        Ok(None) => break,
                        Err(_) => {
                            debug!(search = %value, "Search input settled");
                            if out.send(value).is_err() {
                                break;
                            }
                        }
                    },
                }
            }
        });

        (Self { input, task }, committed)
    }

    /// Feeds the latest raw input text.
    pub fn push(&self, text: impl Into<String>) -> ClientResult<()> {
        self.input
            .send(text.into())
            .map_err(|_| ClientError::ChannelClosed("search debouncer".into()))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, sleep};

    const WINDOW: Duration = Duration::from_millis(700);

    #[tokio::test(start_paused = true)]
    async fn test_emits_last_value_of_burst() {
        let (debouncer, mut committed) = Debouncer::spawn(WINDOW);

        debouncer.push("l").unwrap();
        sleep(Duration::from_millis(100)).await;
        debouncer.push("la").unwrap();
        sleep(Duration::from_millis(100)).await;
        debouncer.push("lap").unwrap();

        let value = committed.recv().await.unwrap();
        assert_eq!(value, "lap");
        assert!(committed.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_full_window() {
        let (debouncer, mut committed) = Debouncer::spawn(WINDOW);

        debouncer.push("phone").unwrap();
        sleep(Duration::from_millis(699)).await;
        assert!(committed.try_recv().is_err());

        advance(Duration::from_millis(2)).await;
        assert_eq!(committed.recv().await.unwrap(), "phone");
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_emit_separately() {
        let (debouncer, mut committed) = Debouncer::spawn(WINDOW);

        debouncer.push("lap").unwrap();
        assert_eq!(committed.recv().await.unwrap(), "lap");

        debouncer.push("laptop").unwrap();
        assert_eq!(committed.recv().await.unwrap(), "laptop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_value() {
        let (debouncer, mut committed) = Debouncer::spawn(WINDOW);
        debouncer.push("never").unwrap();
        drop(debouncer);

        assert!(committed.recv().await.is_none());
    }
}
