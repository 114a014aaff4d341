//! Live tail with automatic reconnection.
//!
//! ```text
//! Connecting -> Streaming -> (Disconnected -> Connecting)* -> Closed
//! ```
//!
//! A failed first connection is fatal. Once a connection has succeeded,
//! remote end-of-stream closures and failed reconnects route to
//! `Disconnected`, which waits `reconnect_delay` and connects again. Local
//! cancellation always closes the session without reconnecting.
//!
//! Nothing ties the lines of one connection to the next: after a reconnect
//! the server may replay or skip lines around the boundary.

use crate::logs::constants::{DEFAULT_TAIL_BUFFER_EVENTS, RECONNECT_DELAY};
use crate::logs::envelope::{self, TailEvent};
use crate::logs::error::StreamError;
use crate::logs::relay::{self, RelayReceiver, RelaySender};
use crate::transport::{MessageStream, TailConnector, TransportError};
use futures_util::StreamExt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct TailOptions {
    pub reconnect_delay: Duration,
    /// `None` retries forever.
    pub max_reconnect_attempts: Option<u32>,
    pub buffer_events: usize,
}

impl Default for TailOptions {
    fn default() -> Self {
        Self {
            reconnect_delay: RECONNECT_DELAY,
            max_reconnect_attempts: None,
            buffer_events: DEFAULT_TAIL_BUFFER_EVENTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailOutcome {
    /// Closed by the operator.
    Cancelled,
    /// The handler reached its own stopping condition.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finish,
}

/// Consumes decoded tail events on the rendering side of the relay.
pub trait EventHandler: Send + 'static {
    fn on_event(&mut self, event: TailEvent) -> Result<Flow, StreamError>;

    fn on_close(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

pub struct TailController<C> {
    connector: C,
    options: TailOptions,
    cancel: CancellationToken,
}

enum ConsumerEnd {
    Drained,
    Finished,
}

impl<C> TailController<C>
where
    C: TailConnector,
{
    pub fn new(connector: C, options: TailOptions, cancel: CancellationToken) -> Self {
        Self {
            connector,
            options,
            cancel,
        }
    }

    pub async fn run<H: EventHandler>(self, handler: H) -> Result<TailOutcome, StreamError> {
        let (tx, rx) = relay::bounded(self.options.buffer_events);

        // Cancelled by the operator, or by the consumer when it stops.
        let done = self.cancel.child_token();
        let consumer = tokio::spawn(handle_events(rx, handler, done.clone()));

        let read_result = self.read_loop(&tx, &done).await;
        tx.close();

        match consumer.await?? {
            ConsumerEnd::Finished => Ok(TailOutcome::Finished),
            ConsumerEnd::Drained => read_result.map(|()| TailOutcome::Cancelled),
        }
    }

    async fn read_loop(
        &self,
        tx: &RelaySender<TailEvent>,
        done: &CancellationToken,
    ) -> Result<(), StreamError> {
        let mut connected_once = false;
        let mut attempts: u32 = 0;
        let mut noted_disconnect = false;

        loop {
            let connected = tokio::select! {
                biased;
                _ = done.cancelled() => return Ok(()),
                res = self.connector.connect() => res,
            };

            let last_error = match connected {
                Ok(stream) => {
                    connected_once = true;
                    match self.stream_events(stream, tx, done).await? {
                        StreamEnd::Closed => return Ok(()),
                        StreamEnd::Disconnected { delivered, error } => {
                            if delivered {
                                attempts = 0;
                            }
                            error
                        }
                    }
                }
                Err(e) if !connected_once => return Err(StreamError::Connect(e)),
                Err(e) => e,
            };

            attempts += 1;
            if let Some(max) = self.options.max_reconnect_attempts {
                if attempts > max {
                    return Err(StreamError::ReconnectLimit {
                        attempts: max,
                        last: last_error,
                    });
                }
            }

            if noted_disconnect {
                tracing::debug!(
                    attempt = attempts,
                    error = %last_error,
                    "reconnecting tail stream"
                );
            } else {
                tracing::warn!(error = %last_error, "log stream disconnected, reconnecting");
                noted_disconnect = true;
            }

            tokio::select! {
                biased;
                _ = done.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.options.reconnect_delay) => {}
            }
        }
    }

    async fn stream_events(
        &self,
        mut stream: MessageStream,
        tx: &RelaySender<TailEvent>,
        done: &CancellationToken,
    ) -> Result<StreamEnd, StreamError> {
        let mut delivered = false;

        loop {
            let next = tokio::select! {
                biased;
                _ = done.cancelled() => return Ok(StreamEnd::Closed),
                next = stream.next() => next,
            };

            let error = match next {
                Some(Ok(text)) => {
                    delivered = true;
                    match envelope::decode(&text) {
                        Ok(TailEvent::Ping) => {}
                        Ok(TailEvent::Unknown(kind)) => {
                            tracing::debug!(kind = %kind, "ignoring unknown tail event");
                        }
                        Ok(event) => {
                            if tx.push(event).await.is_err() {
                                return Ok(StreamEnd::Closed);
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "skipping malformed tail event"),
                    }
                    continue;
                }
                None => TransportError::Disconnected,
                Some(Err(e)) => e,
            };

            // A read failing because the session was closed locally is not a
            // remote disconnect.
            if done.is_cancelled() {
                return Ok(StreamEnd::Closed);
            }
            if !error.is_disconnect() {
                return Err(StreamError::Stream(error));
            }
            return Ok(StreamEnd::Disconnected { delivered, error });
        }
    }
}

enum StreamEnd {
    Closed,
    Disconnected {
        delivered: bool,
        error: TransportError,
    },
}

async fn handle_events<H: EventHandler>(
    mut rx: RelayReceiver<TailEvent>,
    mut handler: H,
    done: CancellationToken,
) -> Result<ConsumerEnd, StreamError> {
    let _stop_reader = done.drop_guard();

    while let Some(event) = rx.pop().await {
        if handler.on_event(event)? == Flow::Finish {
            handler.on_close()?;
            return Ok(ConsumerEnd::Finished);
        }
    }

    handler.on_close()?;
    Ok(ConsumerEnd::Drained)
}
