//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::protocol::{receive_line, trim_line_ending, write_response, Command, Frame};

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared command router
    dispatcher: Arc<Dispatcher>,

    /// Client address, used for the audit log and operator logs
    peer: SocketAddr,

    /// Request line cap in bytes
    max_line_len: usize,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        dispatcher: Arc<Dispatcher>,
        max_line_len: usize,
    ) -> Result<Self> {
        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            dispatcher,
            peer,
            max_line_len,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads request lines in a loop and sends one framed response per line.
    /// Returns when the client disconnects, sends `exit`, or an I/O error
    /// occurs. Disconnects are not errors.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Client connected: {}", self.peer);

        loop {
            let line = match receive_line(&mut self.reader, self.max_line_len) {
                Ok(Frame::Line(line)) => line,
                Ok(Frame::Closed) => {
                    tracing::debug!("Client {} disconnected", self.peer);
                    break;
                }
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Connection to {} lost: {}", self.peer, e);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer, e);
                    return Err(e);
                }
            };

            let raw = trim_line_ending(&line);

            // Logged before dispatch, whatever the outcome
            self.dispatcher.audit_log().record(self.peer, raw);

            let command = Command::parse(raw);
            tracing::trace!("Received command from {}: {:?}", self.peer, command);

            let response = self.dispatcher.execute(command);

            if let Err(e) = write_response(&mut self.writer, &response) {
                if e.is_disconnect() {
                    tracing::debug!(
                        "Client {} disconnected before response could be sent: {}",
                        self.peer,
                        e
                    );
                    break;
                }
                tracing::warn!("Error writing to {}: {}", self.peer, e);
                return Err(e);
            }

            if response.close {
                tracing::debug!("Client {} sent exit", self.peer);
                break;
            }
        }

        Ok(())
    }
}
