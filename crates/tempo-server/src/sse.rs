//! Single-shot server-sent-event streaming
//!
//! A stream is opened with a deadline, handed a producer half
//! ([`EventSink`]) and a consumer half ([`EventStream`]). The sink
//! enforces exactly one terminal transition: `complete`,
//! `complete_with_error`, or an implicit failure when a send hits a
//! disconnected client. The stream ends when the sink closes or when
//! the deadline elapses, whichever comes first.

use axum::response::sse::Event;
use futures::Stream;
use pin_project::pin_project;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tempo_core::{Error, Result};
use tokio::sync::mpsc;
use tokio::time::Sleep;
use tracing::{debug, warn};

/// Lifecycle of an [`EventSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Events may still be sent
    Open,
    /// Closed successfully
    Completed,
    /// Closed after an error (client disconnect, producer failure)
    Failed,
}

/// Open a stream with the given producer deadline.
pub fn open_stream(timeout: Duration) -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::channel(8);
    (
        EventSink {
            tx: Some(tx),
            state: SinkState::Open,
        },
        EventStream {
            rx,
            deadline: tokio::time::sleep(timeout),
        },
    )
}

/// Producer half of an open stream.
pub struct EventSink {
    tx: Option<mpsc::Sender<Event>>,
    state: SinkState,
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("state", &self.state)
            .finish()
    }
}

impl EventSink {
    /// Current lifecycle state
    pub fn state(&self) -> SinkState {
        self.state
    }

    /// Queue one data event for delivery.
    ///
    /// A failed send means the client went away; the sink performs the
    /// error-terminal transition and the event is not retried. There
    /// is no buffered data to replay once a send has failed mid-stream.
    pub async fn send(&mut self, data: impl AsRef<str>) -> Result<()> {
        let Some(tx) = &self.tx else {
            warn!(state = ?self.state, "send after terminal transition, ignoring");
            return Err(Error::StreamTerminated);
        };

        let event = Event::default().data(data.as_ref());
        if tx.send(event).await.is_err() {
            self.close(SinkState::Failed);
            warn!("client disconnected before the event was delivered");
            return Err(Error::StreamClosed);
        }
        Ok(())
    }

    /// Successful terminal transition; closes the stream.
    pub fn complete(&mut self) {
        if self.close(SinkState::Completed) {
            debug!("stream completed");
        }
    }

    /// Error terminal transition; closes the stream without further
    /// writes.
    pub fn complete_with_error(&mut self, error: &Error) {
        if self.close(SinkState::Failed) {
            warn!(error = %error, "stream terminated with error");
        }
    }

    /// Returns false when the sink is already in a terminal state;
    /// the second transition is discarded.
    fn close(&mut self, next: SinkState) -> bool {
        if self.state != SinkState::Open {
            warn!(state = ?self.state, "duplicate terminal transition ignored");
            return false;
        }
        self.state = next;
        // Dropping the sender closes the channel and ends the stream
        self.tx = None;
        true
    }
}

impl Drop for EventSink {
    fn drop(&mut self) {
        if self.state == SinkState::Open {
            warn!("event sink dropped without a terminal transition");
            self.state = SinkState::Failed;
            self.tx = None;
        }
    }
}

/// Consumer half: yields queued events until the sink closes or the
/// deadline elapses.
#[pin_project]
pub struct EventStream {
    rx: mpsc::Receiver<Event>,
    #[pin]
    deadline: Sleep,
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream").finish_non_exhaustive()
    }
}

impl Stream for EventStream {
    type Item = std::result::Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        // A stalled producer never holds the connection open past the
        // deadline; ending the stream closes the transport.
        if this.deadline.poll(cx).is_ready() {
            return Poll::Ready(None);
        }

        this.rx.poll_recv(cx).map(|event| event.map(Ok))
    }
}
