//! Blocking client
//!
//! Sends request lines and reads sentinel-terminated responses. Used by the
//! CLI and by end-to-end tests.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{Result, RosterError};
use crate::protocol::{read_response, write_request};

/// Connection to a RosterDB server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to the server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send one command and wait for its full response body
    pub fn send(&mut self, command: &str) -> Result<String> {
        write_request(&mut self.writer, command)?;
        read_response(&mut self.reader)?.ok_or_else(|| {
            RosterError::Network("server closed the connection".to_string())
        })
    }
}
