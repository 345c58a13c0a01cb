//! Channel helpers.

use tokio::sync::mpsc;

/// Collect every value sent on `rx` until all senders are dropped.
pub async fn collect_channel<T>(mut rx: mpsc::Receiver<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(value) = rx.recv().await {
        values.push(value);
    }
    values
}

/// [`collect_channel`] for unbounded channels.
pub async fn collect_unbounded<T>(mut rx: mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(value) = rx.recv().await {
        values.push(value);
    }
    values
}
