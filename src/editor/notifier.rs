//! ChangeNotifier: hands a full, owned snapshot of the record to the owning form.
use tokio::sync::mpsc::UnboundedSender;
use tracing::{trace, warn};

/// Receiver of editor snapshots.
///
/// Implemented for closures and for tokio unbounded senders, so a form can
/// either react inline or drain changes from its own event loop.
pub trait ChangeSink<T> {
    /// Hand over `snapshot`; false when the receiving end is gone.
    fn deliver(&mut self, snapshot: T) -> bool;
}

impl<T, F> ChangeSink<T> for F
where
    F: FnMut(T),
{
    fn deliver(&mut self, snapshot: T) -> bool {
        self(snapshot);
        true
    }
}

impl<T> ChangeSink<T> for UnboundedSender<T> {
    fn deliver(&mut self, snapshot: T) -> bool {
        let sent = self.send(snapshot).is_ok();
        if !sent {
            warn!("Change receiver dropped; notification discarded");
        }
        sent
    }
}

/// Synchronous, undebounced fan-out of snapshots to at most one sink.
pub struct ChangeNotifier<T> {
    sink: Option<Box<dyn ChangeSink<T>>>,
    delivered: u64,
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self {
            sink: None,
            delivered: 0,
        }
    }
}

impl<T> std::fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("has_sink", &self.sink.is_some())
            .field("delivered", &self.delivered)
            .finish()
    }
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sink; later notifications go to the new one.
    pub fn set_sink(&mut self, sink: impl ChangeSink<T> + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Deliver `snapshot`. Without a sink the snapshot is dropped.
    pub fn notify(&mut self, snapshot: T) {
        if let Some(sink) = self.sink.as_mut() {
            if sink.deliver(snapshot) {
                self.delivered += 1;
                trace!(delivered = self.delivered, "Delivered change snapshot");
            }
        }
    }

    /// Number of snapshots a sink accepted so far
    pub fn notifications(&self) -> u64 {
        self.delivered
    }
}
