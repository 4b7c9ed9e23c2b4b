use crate::ready_state::ReadyState;

/// Errors raised by socket handles.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    /// Failed to establish the WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A frame was queued on a socket that is not open.
    #[error("Socket is not open (state: {0})")]
    NotOpen(ReadyState),

    /// The task owning the connection has gone away.
    #[error("Socket channel closed")]
    ChannelClosed,

    #[error("Unknown ready state: {0}")]
    UnknownReadyState(u16),
}
