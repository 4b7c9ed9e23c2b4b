//! End-to-end tests for `ManagedSocket`.
//!
//! Most tests wire the writer half to an in-memory duplex pipe with a
//! tungstenite server on the other end, so frames and the close handshake
//! travel through a real WebSocket codec without any network I/O. The
//! `connect` tests run a loopback TCP echo server.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::DuplexStream;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Role;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use toolbelt_ws::{
    close_web_socket, is_ws_closable, ClosableSocket, ManagedSocket, ReadyState, WsError,
};

const TIMEOUT: Duration = Duration::from_secs(5);

struct Harness {
    socket: ManagedSocket,
    inbound: mpsc::UnboundedReceiver<Message>,
    server: WebSocketStream<DuplexStream>,
    writer_task: JoinHandle<()>,
}

async fn open_pair() -> Harness {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let client = WebSocketStream::from_raw_socket(client_io, Role::Client, None).await;
    let server = WebSocketStream::from_raw_socket(server_io, Role::Server, None).await;

    let (socket, writer) = ManagedSocket::detached();
    let (inbound_tx, inbound) = mpsc::unbounded_channel();
    writer.set_ready_state(ReadyState::Open);
    let writer_task = tokio::spawn(writer.run(client, inbound_tx));

    Harness {
        socket,
        inbound,
        server,
        writer_task,
    }
}

/// Loopback echo server. The receiver reports whether a Close frame arrived
/// before the connection ended.
async fn spawn_echo_server() -> (String, oneshot::Receiver<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (saw_close_tx, saw_close_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
        let mut saw_close = false;
        while let Some(Ok(message)) = ws.next().await {
            match message {
                Message::Text(text) => {
                    let _ = ws.send(Message::Text(text)).await;
                }
                Message::Close(_) => saw_close = true,
                _ => {}
            }
        }
        let _ = saw_close_tx.send(saw_close);
    });

    (format!("ws://{addr}"), saw_close_rx)
}

async fn next_server_frame(server: &mut WebSocketStream<DuplexStream>) -> Message {
    tokio::time::timeout(TIMEOUT, server.next())
        .await
        .expect("server frame timed out")
        .expect("server stream ended")
        .expect("server read failed")
}

// ---------------------------------------------------------------------------
// Test: queued frames reach the peer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_delivers_text_to_peer() {
    let mut h = open_pair().await;

    h.socket.send(Message::Text("ping".into())).unwrap();

    assert_eq!(next_server_frame(&mut h.server).await, Message::Text("ping".into()));
}

// ---------------------------------------------------------------------------
// Test: frames from the peer are forwarded to the inbound channel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn peer_frames_are_forwarded() {
    let mut h = open_pair().await;

    h.server.send(Message::Text("pong".into())).await.unwrap();

    let received = tokio::time::timeout(TIMEOUT, h.inbound.recv())
        .await
        .expect("inbound frame timed out");
    assert_eq!(received, Some(Message::Text("pong".into())));
}

// ---------------------------------------------------------------------------
// Test: close_web_socket sends a Close frame and the socket ends Closed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn best_effort_close_runs_handshake_to_closed() {
    let mut h = open_pair().await;
    assert!(is_ws_closable(Some(&h.socket)));

    close_web_socket(Some(&mut h.socket));
    assert_eq!(h.socket.ready_state(), ReadyState::Closing);
    assert!(!is_ws_closable(Some(&h.socket)));

    assert!(matches!(next_server_frame(&mut h.server).await, Message::Close(_)));
    drop(h.server);

    tokio::time::timeout(TIMEOUT, h.writer_task)
        .await
        .expect("writer did not finish")
        .unwrap();
    assert_eq!(h.socket.ready_state(), ReadyState::Closed);
}

// ---------------------------------------------------------------------------
// Test: a second close on a closing socket is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeated_close_sends_single_close_frame() {
    let mut h = open_pair().await;

    close_web_socket(Some(&mut h.socket));
    close_web_socket(Some(&mut h.socket));

    assert!(matches!(next_server_frame(&mut h.server).await, Message::Close(_)));
    // Server answered the close; nothing else may follow it.
    let after = tokio::time::timeout(TIMEOUT, h.server.next())
        .await
        .expect("server did not finish");
    assert!(!matches!(after, Some(Ok(Message::Close(_)))));
}

// ---------------------------------------------------------------------------
// Test: send is rejected once closing has started
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_after_close_is_rejected() {
    let mut h = open_pair().await;

    h.socket.close().unwrap();

    assert!(matches!(
        h.socket.send(Message::Text("late".into())),
        Err(WsError::NotOpen(ReadyState::Closing))
    ));
}

// ---------------------------------------------------------------------------
// Test: peer-initiated close moves the socket to Closed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn peer_close_finishes_writer() {
    let mut h = open_pair().await;

    h.server.close(None).await.unwrap();

    let received = tokio::time::timeout(TIMEOUT, h.inbound.recv())
        .await
        .expect("close frame timed out");
    assert!(matches!(received, Some(Message::Close(_))));

    drop(h.server);
    tokio::time::timeout(TIMEOUT, h.writer_task)
        .await
        .expect("writer did not finish")
        .unwrap();
    assert_eq!(h.socket.ready_state(), ReadyState::Closed);
}

// ---------------------------------------------------------------------------
// Test: dropping the handle closes the connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dropping_handle_closes_connection() {
    let mut h = open_pair().await;

    drop(h.socket);

    assert!(matches!(next_server_frame(&mut h.server).await, Message::Close(_)));
    tokio::time::timeout(TIMEOUT, h.writer_task)
        .await
        .expect("writer did not finish")
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: closed() resolves once a connected socket finishes its handshake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connect_round_trip_then_closed() {
    let (url, saw_close) = spawn_echo_server().await;

    let (mut socket, mut inbound) = ManagedSocket::connect(&url).await.unwrap();
    assert_eq!(socket.ready_state(), ReadyState::Open);

    socket.send(Message::Text("echo me".into())).unwrap();
    let echoed = tokio::time::timeout(TIMEOUT, inbound.recv())
        .await
        .expect("echo timed out");
    assert_eq!(echoed, Some(Message::Text("echo me".into())));

    close_web_socket(Some(&mut socket));
    tokio::time::timeout(TIMEOUT, socket.closed())
        .await
        .expect("close handshake timed out");

    assert_eq!(socket.ready_state(), ReadyState::Closed);
    assert!(tokio::time::timeout(TIMEOUT, saw_close).await.unwrap().unwrap());
}

// ---------------------------------------------------------------------------
// Test: awaiting closed() delivers the Close frame even when the client
// runtime shuts down right afterwards
// ---------------------------------------------------------------------------

#[test]
fn close_frame_reaches_peer_before_runtime_shutdown() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();

    for _ in 0..10 {
        let (url, saw_close) = server_rt.block_on(spawn_echo_server());

        let client_rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        client_rt.block_on(async {
            let (mut socket, _inbound) = ManagedSocket::connect(&url).await.unwrap();
            socket.send(Message::Text("ping".into())).unwrap();
            close_web_socket(Some(&mut socket));
            tokio::time::timeout(TIMEOUT, socket.closed())
                .await
                .expect("close handshake timed out");
        });
        drop(client_rt);

        let saw = server_rt
            .block_on(async { tokio::time::timeout(TIMEOUT, saw_close).await })
            .expect("server did not finish")
            .unwrap();
        assert!(saw, "server never received the Close frame");
    }
}
