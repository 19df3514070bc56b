//! # Test Utilities
//!
//! Loopback peers with scripted handshake behaviour and a recording
//! reporter. Enabled for unit tests and, through the `test-utils` feature,
//! for the workspace integration suite.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::domain::NodeId;
use crate::ports::{Diagnostic, ValidationReporter};
use crate::transport::secret_connection::codec::{self, BytesValue};
use crate::transport::SecretConnection;

// =============================================================================
// MOCK PEER
// =============================================================================

/// How a [`MockPeer`] treats incoming connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerBehavior {
    /// Completes the handshake, then waits for the dialer to hang up.
    Honest,
    /// Accepts and never writes.
    Silent,
    /// Sends an all-zero (small order) ephemeral key.
    SmallOrderKey,
    /// Sends bytes that never form a valid length prefix.
    Garbage,
}

/// A loopback TCP peer with its own Ed25519 key.
///
/// The accept loop is aborted on drop.
pub struct MockPeer {
    local_addr: SocketAddr,
    public_key: Ed25519PublicKey,
    handshakes: Arc<AtomicUsize>,
    accept_task: JoinHandle<()>,
}

impl MockPeer {
    /// Bind to an ephemeral loopback port and start serving.
    pub async fn spawn(behavior: PeerBehavior) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let local_addr = listener.local_addr()?;
        let keypair = Arc::new(Ed25519KeyPair::generate());
        let public_key = keypair.public_key();
        let handshakes = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&handshakes);
        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let keypair = Arc::clone(&keypair);
                let counter = Arc::clone(&counter);
                tokio::spawn(serve(stream, behavior, keypair, counter));
            }
        });

        Ok(Self {
            local_addr,
            public_key,
            handshakes,
            accept_task,
        })
    }

    /// Honest peer.
    pub async fn honest() -> io::Result<Self> {
        Self::spawn(PeerBehavior::Honest).await
    }

    /// Peer that never answers the handshake.
    pub async fn silent() -> io::Result<Self> {
        Self::spawn(PeerBehavior::Silent).await
    }

    /// Node ID this peer proves.
    pub fn node_id(&self) -> NodeId {
        NodeId::from_public_key(&self.public_key)
    }

    /// `127.0.0.1:<port>`.
    pub fn host_port(&self) -> String {
        self.local_addr.to_string()
    }

    /// `<node id>@127.0.0.1:<port>`.
    pub fn address(&self) -> String {
        format!("{}@{}", self.node_id(), self.local_addr)
    }

    /// `<other id>@127.0.0.1:<port>`, an address claiming the wrong identity.
    pub fn address_claiming(&self, claimed: NodeId) -> String {
        format!("{}@{}", claimed, self.local_addr)
    }

    /// Handshakes this peer has completed from its own side.
    pub fn completed_handshakes(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }

    /// Poll until at least `count` handshakes completed or `within` elapses.
    pub async fn wait_for_handshakes(&self, count: usize, within: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + within;
        while self.completed_handshakes() < count {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        true
    }
}

impl Drop for MockPeer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    behavior: PeerBehavior,
    keypair: Arc<Ed25519KeyPair>,
    handshakes: Arc<AtomicUsize>,
) {
    match behavior {
        PeerBehavior::Honest => {
            if let Ok(mut connection) = SecretConnection::handshake(stream, &keypair).await {
                handshakes.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 64];
                while connection.read(&mut buf).await.is_ok() {}
            }
            return;
        }
        PeerBehavior::Silent => {}
        PeerBehavior::SmallOrderKey => {
            let zero_key = BytesValue {
                value: vec![0u8; 32],
            };
            let _ = stream.write_all(&codec::encode_delimited(&zero_key)).await;
        }
        PeerBehavior::Garbage => {
            let _ = stream.write_all(&[0xFF; 16]).await;
        }
    }
    drain(&mut stream).await;
}

/// Hold the connection open until the dialer closes it.
async fn drain(stream: &mut TcpStream) {
    let mut buf = [0u8; 256];
    while matches!(stream.read(&mut buf).await, Ok(n) if n > 0) {}
}

/// A loopback address nothing listens on.
pub fn unreachable_address() -> io::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr.to_string())
}

// =============================================================================
// RECORDING REPORTER
// =============================================================================

/// Reporter that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl RecordingReporter {
    /// Empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics so far, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Rendered lines, as the console reporter would print them.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of diagnostics matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.diagnostics.lock().iter().filter(|d| predicate(d)).count()
    }

    /// Number of diagnostics so far.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl ValidationReporter for RecordingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().push(diagnostic.clone());
    }
}
