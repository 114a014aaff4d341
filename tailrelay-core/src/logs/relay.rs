use crate::logs::constants::MAX_DUMP_BUFFER_LINES;
use tokio::sync::mpsc;

/// Producer half of the relay buffer.
///
/// Dropping or calling [`RelaySender::close`] is the one and only "done"
/// signal the consumer receives.
pub struct RelaySender<T> {
    tx: mpsc::Sender<T>,
}

pub struct RelayReceiver<T> {
    rx: mpsc::Receiver<T>,
}

/// The consumer went away; the item was not delivered.
#[derive(Debug)]
pub struct ConsumerGone<T>(pub T);

/// Bounded FIFO between a network reader and a renderer.
pub fn bounded<T>(capacity: usize) -> (RelaySender<T>, RelayReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RelaySender { tx }, RelayReceiver { rx })
}

/// Buffer size for a dump of `requested` lines.
pub fn dump_capacity(requested: usize) -> usize {
    requested.clamp(1, MAX_DUMP_BUFFER_LINES)
}

impl<T> RelaySender<T> {
    /// Waits for room when the buffer is full. Never drops.
    pub async fn push(&self, item: T) -> Result<(), ConsumerGone<T>> {
        self.tx.send(item).await.map_err(|e| ConsumerGone(e.0))
    }

    pub fn close(self) {}
}

impl<T> RelayReceiver<T> {
    /// `None` once the producer closed and everything queued was drained.
    pub async fn pop(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}
