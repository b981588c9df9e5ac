//! Protocol codec
//!
//! Line framing for requests and sentinel framing for responses.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! post trainer Ash 1 4 7\n
//! ```
//!
//! ### Response
//! ```text
//! Trainer #1: Ash\n
//! Species count: 3\n
//! ...\n
//! [END]\n
//! ```
//! A newline is inserted before `[END]` when the body does not end with one.

use std::io::{BufRead, ErrorKind, Write};

use crate::error::{Result, RosterError};

use super::{Response, END_SENTINEL};

/// Outcome of reading one request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Bytes up to and including a newline, or up to the size cap
    Line(String),

    /// Peer ended the stream before sending anything
    Closed,
}

// =============================================================================
// Request side
// =============================================================================

/// Read until a newline or until `max_len - 1` bytes are buffered.
///
/// When the cap is hit first the partial line is returned as-is and the
/// rest of the physical line is left for the next call. Interrupted reads
/// are retried; any other I/O error is returned.
pub fn receive_line<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Frame> {
    let cap = max_len.saturating_sub(1).max(1);
    let mut line: Vec<u8> = Vec::new();

    while line.len() < cap {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        // EOF
        if available.is_empty() {
            break;
        }

        let room = cap - line.len();
        let window = &available[..available.len().min(room)];
        let (taken, complete) = match window.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (window.len(), false),
        };

        line.extend_from_slice(&window[..taken]);
        reader.consume(taken);

        if complete {
            break;
        }
    }

    if line.is_empty() {
        return Ok(Frame::Closed);
    }

    Ok(Frame::Line(String::from_utf8_lossy(&line).into_owned()))
}

/// Cut a line at its first CR or LF
pub fn trim_line_ending(line: &str) -> &str {
    match line.find(['\r', '\n']) {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Write a request line (newline appended)
pub fn write_request<W: Write>(writer: &mut W, command: &str) -> Result<()> {
    let mut line = String::with_capacity(command.len() + 1);
    line.push_str(command);
    line.push('\n');
    send_all(writer, &line)
}

// =============================================================================
// Response side
// =============================================================================

/// Write every byte of `text` and flush
///
/// Partial writes and interrupts are retried; peer resets and broken pipes
/// come back as errors.
pub fn send_all<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Body followed by the `[END]` sentinel line
pub fn encode_response(response: &Response) -> String {
    let mut out = String::with_capacity(response.body.len() + END_SENTINEL.len() + 2);
    out.push_str(&response.body);
    if !response.body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(END_SENTINEL);
    out.push('\n');
    out
}

/// Send one framed response
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    send_all(writer, &encode_response(response))
}

/// Read lines up to the `[END]` sentinel and return the body
///
/// The newline right before the sentinel is not part of the body.
/// Returns `None` if the stream ends before any byte of a response.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut body = String::new();
    let mut line = String::new();
    let mut started = false;

    loop {
        line.clear();
        let n = match reader.read_line(&mut line) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if !started {
                return Ok(None);
            }
            return Err(RosterError::Protocol(
                "connection closed before end of response".to_string(),
            ));
        }
        started = true;

        if trim_line_ending(&line) == END_SENTINEL {
            break;
        }
        body.push_str(&line);
    }

    if body.ends_with('\n') {
        body.pop();
    }
    Ok(Some(body))
}
