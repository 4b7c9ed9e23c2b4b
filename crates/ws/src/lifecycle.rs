//! Readiness gating and best-effort close for any WebSocket-like handle.

use toolbelt_core::types::or_default;

use crate::error::WsError;
use crate::ready_state::ReadyState;

/// States in which a socket may still be closed.
const CLOSABLE_STATES: [ReadyState; 2] = [ReadyState::Connecting, ReadyState::Open];

/// A WebSocket-like object: exposes its ready state and can be asked to
/// close.
pub trait ClosableSocket {
    fn ready_state(&self) -> ReadyState;

    fn close(&mut self) -> Result<(), WsError>;
}

/// True iff the socket exists and is connecting or open.
pub fn is_ws_closable<S: ClosableSocket + ?Sized>(ws: Option<&S>) -> bool {
    or_default(ws, |ws| CLOSABLE_STATES.contains(&ws.ready_state()))
}

/// Same check as [`is_ws_closable`], named for call sites that care about
/// liveness rather than closing.
pub fn is_ws_open_or_connecting<S: ClosableSocket + ?Sized>(ws: Option<&S>) -> bool {
    or_default(ws, |ws| CLOSABLE_STATES.contains(&ws.ready_state()))
}

/// Close a connecting or open socket, ignoring any failure.
///
/// Missing sockets and sockets already closing or closed are left alone.
/// `close` is called at most once and its error is logged, never returned.
pub fn close_web_socket<S: ClosableSocket + ?Sized>(ws: Option<&mut S>) {
    let Some(ws) = ws else {
        return;
    };
    if !is_ws_closable(Some(&*ws)) {
        return;
    }
    if let Err(e) = ws.close() {
        tracing::debug!(error = %e, "Ignoring WebSocket close failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSocket {
        state: ReadyState,
        close_calls: usize,
        fail_close: bool,
    }

    impl MockSocket {
        fn new(state: ReadyState) -> Self {
            Self {
                state,
                close_calls: 0,
                fail_close: false,
            }
        }
    }

    impl ClosableSocket for MockSocket {
        fn ready_state(&self) -> ReadyState {
            self.state
        }

        fn close(&mut self) -> Result<(), WsError> {
            self.close_calls += 1;
            if self.fail_close {
                return Err(WsError::ChannelClosed);
            }
            Ok(())
        }
    }

    const ALL_STATES: [(ReadyState, bool); 4] = [
        (ReadyState::Connecting, true),
        (ReadyState::Open, true),
        (ReadyState::Closing, false),
        (ReadyState::Closed, false),
    ];

    // -- is_ws_closable / is_ws_open_or_connecting ----------------------------

    #[test]
    fn missing_socket_is_not_closable() {
        assert!(!is_ws_closable::<MockSocket>(None));
        assert!(!is_ws_open_or_connecting::<MockSocket>(None));
    }

    #[test]
    fn closable_only_when_connecting_or_open() {
        for (state, expected) in ALL_STATES {
            let ws = MockSocket::new(state);
            assert_eq!(is_ws_closable(Some(&ws)), expected, "{state}");
            assert_eq!(is_ws_open_or_connecting(Some(&ws)), expected, "{state}");
        }
    }

    #[test]
    fn works_through_trait_objects() {
        let ws: Box<dyn ClosableSocket> = Box::new(MockSocket::new(ReadyState::Open));
        assert!(is_ws_closable(Some(ws.as_ref())));
    }

    // -- close_web_socket -----------------------------------------------------

    #[test]
    fn close_missing_socket_is_noop() {
        close_web_socket::<MockSocket>(None);
    }

    #[test]
    fn closes_exactly_once_when_connecting_or_open() {
        for (state, closable) in ALL_STATES {
            let mut ws = MockSocket::new(state);
            close_web_socket(Some(&mut ws));
            assert_eq!(ws.close_calls, usize::from(closable), "{state}");
        }
    }

    #[test]
    fn close_failure_is_swallowed() {
        let mut ws = MockSocket::new(ReadyState::Open);
        ws.fail_close = true;

        close_web_socket(Some(&mut ws));

        assert_eq!(ws.close_calls, 1);
    }
}
