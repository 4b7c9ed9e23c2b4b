//! WebSocket lifecycle helpers.
//!
//! Provides the standard ready-state enumeration, readiness gating and a
//! best-effort close over any [`ClosableSocket`], plus [`ManagedSocket`], a
//! channel-backed socket driving a tokio-tungstenite connection.

mod error;
pub mod lifecycle;
pub mod managed;
mod ready_state;

pub use error::WsError;
pub use lifecycle::{close_web_socket, is_ws_closable, is_ws_open_or_connecting, ClosableSocket};
pub use managed::{ManagedSocket, SocketWriter};
pub use ready_state::ReadyState;
pub use tokio_tungstenite::tungstenite::Message;
