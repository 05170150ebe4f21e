use futures_util::future::BoxFuture;
use futures_util::{FutureExt, Stream, StreamExt};
use tokio::sync::{mpsc, watch};

/// Owner side of the graceful shutdown. Handles are cloned into every task that needs to stop
/// on CTRL+C; [`Shutdown::shutdown`] resolves once all of them have been dropped.
pub struct Shutdown {
    signal: watch::Sender<bool>,
    done_tx: mpsc::Sender<()>,
    done_rx: mpsc::Receiver<()>,
}

#[derive(Clone)]
pub struct ShutdownHandle {
    signal: watch::Receiver<bool>,
    _done: mpsc::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        let (done_tx, done_rx) = mpsc::channel(1);
        Self {
            signal,
            done_tx,
            done_rx,
        }
    }

    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            signal: self.signal.subscribe(),
            _done: self.done_tx.clone(),
        }
    }

    pub async fn shutdown(self) {
        let Shutdown {
            signal,
            done_tx,
            mut done_rx,
        } = self;
        signal.send_replace(true);
        drop(done_tx);

        // resolves with `None` once every handle is gone
        done_rx.recv().await;
        tracing::debug!("shutdown complete");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn is_shutdown(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once shutdown was requested (or the owner is gone).
    pub fn signal(&self) -> BoxFuture<'static, ()> {
        let mut signal = self.signal.clone();
        async move {
            while !*signal.borrow() {
                if signal.changed().await.is_err() {
                    break;
                }
            }
        }
        .boxed()
    }

    /// Ends `stream` as soon as shutdown is requested.
    pub fn wrap_stream<S: Stream>(&self, stream: S) -> impl Stream<Item = S::Item> {
        stream.take_until(self.signal())
    }
}
