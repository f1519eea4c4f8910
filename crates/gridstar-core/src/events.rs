//! The push-based visualization event stream.
//!
//! The search engine reports its progress as a sequence of [`SearchEvent`]s
//! pushed into an [`EventSink`]; a renderer maps them to pixels, colors, or
//! whatever presentation it likes. The engine never learns anything about
//! the consumer.

use std::sync::mpsc::Sender;

use crate::geom::Point;

/// One step's worth of search progress, as seen by a renderer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A cell entered the frontier for the first time.
    Discovered(Point),
    /// A cell left the frontier with its minimal cost fixed; it will not be
    /// reconsidered.
    Finalized(Point),
    /// The goal was reached. Carries the path ordered from the goal back to
    /// the start.
    Completed(Vec<Point>),
    /// The frontier emptied without reaching the goal; no path exists.
    Exhausted,
}

/// Receiving end of the event stream. A renderer implements this (or hands
/// the engine one of the provided sinks) and is fed events as they happen.
pub trait EventSink {
    /// Accept one event.
    fn emit(&mut self, event: SearchEvent);
}

/// Buffering sink, handy for tests and hosts that apply events per frame.
impl EventSink for Vec<SearchEvent> {
    fn emit(&mut self, event: SearchEvent) {
        self.push(event)
    }
}

/// Channel hand-off for hosts that render on another thread. Events sent
/// after the receiver is gone are dropped.
impl EventSink for Sender<SearchEvent> {
    fn emit(&mut self, event: SearchEvent) {
        self.send(event).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn custom_sink_receives_events() {
        struct Counter {
            finalized: usize,
        }
        impl EventSink for Counter {
            fn emit(&mut self, event: SearchEvent) {
                if matches!(event, SearchEvent::Finalized(_)) {
                    self.finalized += 1;
                }
            }
        }
        let mut sink = Counter { finalized: 0 };
        sink.emit(SearchEvent::Finalized(Point::ZERO));
        sink.emit(SearchEvent::Exhausted);
        sink.emit(SearchEvent::Finalized(Point::new(1, 0)));
        assert_eq!(sink.finalized, 2);
    }

    #[test]
    fn vec_sink_buffers_in_order() {
        let mut sink: Vec<SearchEvent> = Vec::new();
        sink.emit(SearchEvent::Discovered(Point::new(1, 2)));
        sink.emit(SearchEvent::Completed(vec![Point::new(1, 2)]));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], SearchEvent::Discovered(Point::new(1, 2)));
    }

    #[test]
    fn channel_sink_crosses_threads() {
        let (tx, rx) = mpsc::channel();
        let mut sink = tx;
        sink.emit(SearchEvent::Finalized(Point::new(3, 4)));
        drop(sink);
        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received, vec![SearchEvent::Finalized(Point::new(3, 4))]);
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = tx;
        // Must not panic.
        sink.emit(SearchEvent::Exhausted);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let events = vec![
            SearchEvent::Discovered(Point::new(1, 1)),
            SearchEvent::Completed(vec![Point::new(1, 1), Point::ZERO]),
            SearchEvent::Exhausted,
        ];
        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<SearchEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, back);
    }
}
