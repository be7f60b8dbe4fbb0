use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

/// Broadcast topic with bounded capacity.
/// `T` must be `Send + Sync` because we hop across threads.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> Topic<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, msg: T) {
        let _ = self.tx.send(Arc::new(msg));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}

/// Drain everything currently queued on `rx` into `handle`, without blocking.
/// A lagged receiver skips ahead rather than stalling the frame.
pub fn drain<T>(rx: &mut broadcast::Receiver<Arc<T>>, mut handle: impl FnMut(&T))
where
    T: Send + Sync + 'static,
{
    loop {
        match rx.try_recv() {
            Ok(msg) => handle(&msg),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                warn!(missed, "event receiver lagged, skipping ahead");
            }
            Err(_) => break,
        }
    }
}
