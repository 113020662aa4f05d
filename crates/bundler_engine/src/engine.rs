use std::sync::mpsc;
use std::thread;

use crate::dispatch::{ChannelProgressSink, Dispatcher};
use crate::{EngineError, EngineEvent};

/// Blocking front for callers without an async runtime of their own.
///
/// The run executes on a background thread; its events arrive in order:
/// every `Progress`, then exactly one `Finished`.
pub struct EngineHandle {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(dispatcher: Dispatcher, urls: Vec<String>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let results = runtime.block_on(dispatcher.run_all(urls, &sink));
            let _ = event_tx.send(EngineEvent::Finished(results));
        });

        Ok(Self { event_rx })
    }

    /// Blocks until the next event; `None` once the run thread has gone away.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
