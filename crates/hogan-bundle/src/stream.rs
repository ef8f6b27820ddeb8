//! The push-style pipeline contract between a host and a transform.

use crate::error::BundleError;
use crate::file::File;

/// Something a transform emits towards the host.
#[derive(Debug)]
pub enum StreamEvent {
    /// An output file.
    Data(File),
    /// A per-item error. The stream keeps going.
    Error(BundleError),
    /// No more output will follow.
    End,
}

impl StreamEvent {
    pub fn is_end(&self) -> bool {
        matches!(self, StreamEvent::End)
    }
}

/// Receives events from a transform.
pub trait EventSink {
    fn emit(&mut self, event: StreamEvent);
}

impl EventSink for Vec<StreamEvent> {
    fn emit(&mut self, event: StreamEvent) {
        self.push(event);
    }
}

/// A pipeline stage. The host calls [`on_item`](Transform::on_item) once
/// per file in arrival order, then [`on_complete`](Transform::on_complete)
/// once.
pub trait Transform {
    fn on_item(&mut self, file: File, sink: &mut dyn EventSink);

    fn on_complete(&mut self, sink: &mut dyn EventSink);
}

/// Push every file through `transform`, complete it, and return what it
/// emitted.
pub fn drive<T>(transform: &mut T, files: impl IntoIterator<Item = File>) -> Vec<StreamEvent>
where
    T: Transform + ?Sized,
{
    let mut events = Vec::new();
    for file in files {
        transform.on_item(file, &mut events);
    }
    transform.on_complete(&mut events);
    events
}
