//! Shutdown Controller
//!
//! Process-wide stop flag for the accept loop.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// How long `trigger` waits on its wake-up connection
const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Cloneable shutdown handle
///
/// `trigger` sets the flag and then connects once to the listener so a
/// blocked `accept` returns and sees it. Only the acceptor observes it;
/// connection workers run until their client leaves.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    triggered: AtomicBool,

    /// Listener address to poke; set once the server is bound
    wake_addr: Mutex<Option<SocketAddr>>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Request shutdown; later calls are no-ops
    pub fn trigger(&self) {
        if self.inner.triggered.swap(true, Ordering::SeqCst) {
            return;
        }

        let wake_addr = *self.inner.wake_addr.lock();
        if let Some(addr) = wake_addr {
            // The connection itself is dropped straight away; it only
            // unblocks accept()
            if let Err(e) = TcpStream::connect_timeout(&connectable(addr), WAKE_TIMEOUT) {
                tracing::debug!("Shutdown wake-up connect to {} failed: {}", addr, e);
            }
        }
    }

    /// Register the listener address `trigger` should wake
    pub(crate) fn attach(&self, addr: SocketAddr) {
        *self.inner.wake_addr.lock() = Some(addr);
    }
}

/// Wildcard bind addresses are not connectable; use loopback instead
fn connectable(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}
