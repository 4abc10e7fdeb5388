//! Synchronous lifecycle notifications.
//!
//! Sinks receive shared references only, so they may read a buffer while it
//! is being opened, closed or renamed but cannot re-enter the directory.

use std::cell::RefCell;
use std::rc::Rc;

use crate::buffer::{Buffer, BufferId};

/// Event pushed to every registered [`NotificationSink`].
#[derive(Debug, Clone, Copy)]
pub enum Signal<'a> {
    BufferOpen(&'a Buffer),
    /// Sent before any teardown; the buffer is still complete.
    BufferClosing(&'a Buffer),
    /// Sent after the buffer left the registry, right before it is freed.
    BufferClosed(&'a Buffer),
    BufferRenamed(&'a Buffer),
    BufferMoved {
        buffer: &'a Buffer,
        old_number: u32,
        new_number: u32,
    },
    BufferTitleChanged,
}

impl<'a> Signal<'a> {
    /// Signal name as exposed to plugins.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::BufferOpen(_) => "buffer_open",
            Signal::BufferClosing(_) => "buffer_closing",
            Signal::BufferClosed(_) => "buffer_closed",
            Signal::BufferRenamed(_) => "buffer_renamed",
            Signal::BufferMoved { .. } => "buffer_moved",
            Signal::BufferTitleChanged => "buffer_title_changed",
        }
    }

    pub fn buffer(&self) -> Option<&'a Buffer> {
        match *self {
            Signal::BufferOpen(buffer)
            | Signal::BufferClosing(buffer)
            | Signal::BufferClosed(buffer)
            | Signal::BufferRenamed(buffer)
            | Signal::BufferMoved { buffer, .. } => Some(buffer),
            Signal::BufferTitleChanged => None,
        }
    }
}

/// Receiver of lifecycle signals and redraw requests.
pub trait NotificationSink {
    fn on_signal(&mut self, signal: &Signal<'_>);

    /// A buffer needs to be redrawn in every window showing it.
    ///
    /// Default implementation does nothing.
    fn redraw_buffer(&mut self, _buffer: BufferId) {}
}

impl<T: NotificationSink> NotificationSink for Rc<RefCell<T>> {
    fn on_signal(&mut self, signal: &Signal<'_>) {
        self.borrow_mut().on_signal(signal);
    }

    fn redraw_buffer(&mut self, buffer: BufferId) {
        self.borrow_mut().redraw_buffer(buffer);
    }
}

/// Fan-out to registered sinks, in registration order.
#[derive(Default)]
pub struct SignalBus {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn emit(&mut self, signal: &Signal<'_>) {
        tracing::trace!(
            signal = signal.name(),
            buffer = ?signal.buffer().map(Buffer::id),
            sinks = self.sinks.len(),
            "Sending signal"
        );
        for sink in &mut self.sinks {
            sink.on_signal(signal);
        }
    }

    pub fn redraw(&mut self, buffer: BufferId) {
        for sink in &mut self.sinks {
            sink.redraw_buffer(buffer);
        }
    }
}

impl std::fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Sink that records signal names and buffer ids. Handy for tests and the
/// CLI trace output.
#[derive(Debug, Default)]
pub struct SignalLog {
    pub events: Vec<(String, Option<BufferId>)>,
    pub redraws: Vec<BufferId>,
}

impl SignalLog {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.events.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl NotificationSink for SignalLog {
    fn on_signal(&mut self, signal: &Signal<'_>) {
        self.events
            .push((signal.name().to_string(), signal.buffer().map(Buffer::id)));
    }

    fn redraw_buffer(&mut self, buffer: BufferId) {
        self.redraws.push(buffer);
    }
}
