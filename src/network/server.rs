//! TCP Server
//!
//! Accepts connections and hands each one to its own worker thread.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, RosterError};

use super::{Connection, Shutdown};

/// TCP server for RosterDB
///
/// One thread per accepted connection, unbounded and never pooled. The
/// accept loop stops once [`Shutdown::trigger`] is called; workers already
/// running never see the flag and serve their client until it leaves.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    shutdown: Shutdown,
    max_line_len: usize,
}

impl Server {
    /// Bind the listening socket
    ///
    /// Binding failures are fatal startup errors.
    pub fn bind(config: &Config, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            RosterError::Network(format!("Failed to bind {}: {}", config.listen_addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        let shutdown = Shutdown::new();
        shutdown.attach(local_addr);

        Ok(Self {
            listener,
            local_addr,
            dispatcher,
            shutdown,
            max_line_len: config.max_line_len,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle that stops the accept loop from any thread
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Signal the server to stop accepting
    pub fn shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Run the accept loop (blocking)
    ///
    /// Returns once shutdown has been triggered. Does not wait for
    /// in-flight workers.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr);

        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if self.shutdown.is_triggered() {
                        // Usually the wake-up connection from trigger()
                        drop(stream);
                        break;
                    }
                    self.spawn_worker(stream, peer);
                }
                Err(e) => {
                    if self.shutdown.is_triggered() {
                        break;
                    }
                    if e.kind() == std::io::ErrorKind::Interrupted {
                        continue;
                    }
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Accept loop stopped");
        Ok(())
    }

    fn spawn_worker(&self, stream: TcpStream, peer: SocketAddr) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let max_line_len = self.max_line_len;

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                let mut connection =
                    match Connection::new(stream, peer, dispatcher, max_line_len) {
                        Ok(connection) => connection,
                        Err(e) => {
                            tracing::warn!("Failed to set up connection {}: {}", peer, e);
                            return;
                        }
                    };

                if let Err(e) = connection.handle() {
                    tracing::warn!("Connection {} ended with error: {}", peer, e);
                }
                tracing::debug!("Worker for {} finished", peer);
            });

        // Detached: the JoinHandle is dropped on purpose
        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn worker for {}: {}", peer, e);
        }
    }
}
