//! Transfer notification delivery
//!
//! Two `Notifier` implementations are provided:
//!
//! - `LoggingNotifier` - writes each notification to the log, synchronously
//! - `QueuedNotifier` - hands notifications to a background worker and returns
//!   immediately, so a slow delivery backend never delays the caller
//!
//! # Architecture
//!
//! ```text
//! TransferEngine ──notify──▶ QueuedNotifier ──mpsc──▶ worker (spawn_blocking)
//!                                                        └──▶ inner Notifier
//! ```
//!
//! Failures are contained by [`deliver`]: an `Err` or a panic from a notifier is
//! logged and dropped, nothing flows back to the transfer.

use crate::core::traits::Notifier;
use crate::types::{Account, NotificationError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Deliver one notification, containing any failure
///
/// # Returns
///
/// `true` if the notifier reported success. Errors and panics are logged with
/// `warn!` and reported as `false`.
pub fn deliver<N>(notifier: &N, account: &Arc<Account>, message: &str) -> bool
where
    N: Notifier + ?Sized,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        notifier.notify_about_transfer(account, message)
    }));

    match outcome {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(account = %account.id(), error = %e, "Notification delivery failed");
            false
        }
        Err(_) => {
            warn!(account = %account.id(), "Notifier panicked, notification dropped");
            false
        }
    }
}

/// Notifier that writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify_about_transfer(
        &self,
        account: &Arc<Account>,
        message: &str,
    ) -> Result<(), NotificationError> {
        info!(
            account = %account.id(),
            "Sending notification to owner of {}: {}",
            account.id(),
            message
        );
        Ok(())
    }
}

/// A notification waiting in the dispatch queue
#[derive(Debug)]
struct QueuedNotification {
    account: Arc<Account>,
    message: String,
}

/// Fire-and-forget notifier backed by a queue and a worker task
///
/// `notify_about_transfer` only enqueues. The worker, started by
/// [`QueuedNotifier::spawn`], delivers each notification through the inner
/// notifier on a blocking task, in enqueue order. The worker exits once every
/// `QueuedNotifier` clone has been dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct QueuedNotifier {
    sender: UnboundedSender<QueuedNotification>,
}

impl QueuedNotifier {
    /// Start a dispatch worker on `handle`
    ///
    /// # Returns
    ///
    /// The notifier and the worker's join handle. Drop every clone of the notifier,
    /// then await the join handle to flush pending notifications.
    pub fn spawn<N>(inner: Arc<N>, handle: &Handle) -> (Self, JoinHandle<usize>)
    where
        N: Notifier + ?Sized + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<QueuedNotification>();

        let worker = handle.spawn_blocking(move || {
            let mut delivered = 0usize;
            while let Some(notification) = receiver.blocking_recv() {
                if deliver(inner.as_ref(), &notification.account, &notification.message) {
                    delivered += 1;
                }
            }
            debug!(delivered, "Notification queue drained");
            delivered
        });

        (Self { sender }, worker)
    }
}

impl Notifier for QueuedNotifier {
    fn notify_about_transfer(
        &self,
        account: &Arc<Account>,
        message: &str,
    ) -> Result<(), NotificationError> {
        self.sender
            .send(QueuedNotification {
                account: Arc::clone(account),
                message: message.to_string(),
            })
            .map_err(|_| NotificationError::QueueClosed)
    }
}
