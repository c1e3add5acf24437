use super::Event;

/// Receiver of [`Event`]s published by the [`crate::Editor`].
///
/// Implemented for closures and, with the `events` feature, for crossbeam senders.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F: Fn(Event)> EventSink for F {
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // a dropped receiver only means nobody listens anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}
