//! Channel-backed WebSocket handle.
//!
//! [`ManagedSocket`] is the cheap, synchronous side: it queues outbound
//! frames on an unbounded mpsc channel and reports the shared ready state,
//! which lives in a `watch` channel so callers can await `Closed`.
//! [`SocketWriter`] is the side that owns the connection: it drains the
//! channel into a tungstenite sink, forwards inbound frames, and advances
//! the ready state as the close handshake progresses.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, WebSocketStream};

use crate::error::WsError;
use crate::lifecycle::ClosableSocket;
use crate::ready_state::ReadyState;

/// Shared, forward-only ready state that can be awaited.
#[derive(Debug, Clone)]
struct SharedState(Arc<watch::Sender<ReadyState>>);

impl SharedState {
    fn new(initial: ReadyState) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self(Arc::new(sender))
    }

    fn get(&self) -> ReadyState {
        *self.0.borrow()
    }

    /// Move forward to `state`; never moves backwards.
    fn advance(&self, state: ReadyState) {
        self.0.send_if_modified(|current| {
            if state > *current {
                *current = state;
                true
            } else {
                false
            }
        });
    }

    async fn wait_for(&self, target: ReadyState) {
        let mut receiver = self.0.subscribe();
        // Only fails once the sender is dropped, and `self` holds it.
        let _ = receiver.wait_for(|state| *state >= target).await;
    }
}

/// Sending half of a WebSocket connection.
#[derive(Debug)]
pub struct ManagedSocket {
    sender: mpsc::UnboundedSender<Message>,
    state: SharedState,
}

/// Connection-owning half paired with a [`ManagedSocket`].
#[derive(Debug)]
pub struct SocketWriter {
    receiver: mpsc::UnboundedReceiver<Message>,
    state: SharedState,
}

impl ManagedSocket {
    /// Create a socket in `Connecting` state plus its writer half, without
    /// touching the network.
    pub fn detached() -> (Self, SocketWriter) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = SharedState::new(ReadyState::Connecting);
        (
            Self {
                sender,
                state: state.clone(),
            },
            SocketWriter { receiver, state },
        )
    }

    /// Connect to `url` and spawn the writer task.
    ///
    /// Returns the socket handle and a receiver for inbound frames.
    pub async fn connect(
        url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Message>), WsError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| WsError::Connection(format!("Failed to connect to {url}: {e}")))?;

        tracing::info!(url = %url, "WebSocket connected");

        let (socket, writer) = Self::detached();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        writer.set_ready_state(ReadyState::Open);
        tokio::spawn(writer.run(ws_stream, inbound_tx));

        Ok((socket, inbound_rx))
    }

    /// Resolve once the writer has finished and the state is `Closed`.
    ///
    /// Await this after [`ClosableSocket::close`] so the Close frame is
    /// flushed before the runtime shuts down.
    pub async fn closed(&self) {
        self.state.wait_for(ReadyState::Closed).await;
    }

    /// Queue a frame for delivery. Only allowed while open.
    pub fn send(&self, message: Message) -> Result<(), WsError> {
        let state = self.state.get();
        if state != ReadyState::Open {
            return Err(WsError::NotOpen(state));
        }
        self.sender.send(message).map_err(|_| WsError::ChannelClosed)
    }
}

impl ClosableSocket for ManagedSocket {
    fn ready_state(&self) -> ReadyState {
        self.state.get()
    }

    /// Queue a Close frame and mark the socket as closing.
    fn close(&mut self) -> Result<(), WsError> {
        self.sender
            .send(Message::Close(None))
            .map_err(|_| WsError::ChannelClosed)?;
        self.state.advance(ReadyState::Closing);
        Ok(())
    }
}

impl SocketWriter {
    pub fn ready_state(&self) -> ReadyState {
        self.state.get()
    }

    /// Advance the shared state. Backward moves are ignored.
    pub fn set_ready_state(&self, state: ReadyState) {
        self.state.advance(state);
    }

    /// Next queued outbound frame; `None` once every handle is dropped.
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    /// Drive a WebSocket stream until either side finishes.
    ///
    /// Queued frames go to the sink, inbound frames go to `inbound`. The
    /// state becomes `Closing` when a Close frame passes in either direction
    /// and `Closed` when this function returns.
    pub async fn run<S>(mut self, ws_stream: WebSocketStream<S>, inbound: mpsc::UnboundedSender<Message>)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (mut sink, mut stream) = ws_stream.split();

        loop {
            tokio::select! {
                outbound = self.receiver.recv() => {
                    let Some(message) = outbound else {
                        tracing::debug!("All socket handles dropped");
                        let _ = sink.close().await;
                        break;
                    };
                    if matches!(message, Message::Close(_)) {
                        self.set_ready_state(ReadyState::Closing);
                    }
                    if let Err(e) = sink.send(message).await {
                        tracing::warn!(error = %e, "WebSocket send failed");
                        break;
                    }
                }
                msg = stream.next() => {
                    match msg {
                        Some(Ok(message)) => {
                            if let Message::Close(frame) = &message {
                                tracing::debug!(?frame, "Peer sent close frame");
                                self.set_ready_state(ReadyState::Closing);
                            }
                            // Receiver may be gone; inbound frames are then dropped.
                            let _ = inbound.send(message);
                        }
                        Some(Err(e)) => {
                            tracing::debug!(error = %e, "WebSocket receive ended");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        self.set_ready_state(ReadyState::Closed);
        tracing::debug!("WebSocket writer finished");
    }
}
