//! Protocol Module
//!
//! Defines the line-based text protocol between clients and the server.
//!
//! ## Protocol Format
//!
//! ### Request
//! One newline-terminated line of whitespace-separated tokens.
//!
//! ### Commands
//! - `exit`
//! - `get log <n>`
//! - `get trainer [<id>]`
//! - `post trainer <name> <species id>...`  (1 to 6 ids)
//! - `put trainer <id> <species id>...`     (1 to 6 ids)
//! - `delete trainer <id>`
//!
//! ### Response
//! Free-form text (possibly several lines) followed by the sentinel line
//! `[END]`. Clients read until the sentinel.

mod codec;
mod command;
mod response;

pub use codec::{
    encode_response, read_response, receive_line, send_all, trim_line_ending, write_request,
    write_response, Frame,
};
pub use command::{tokenize, Command, DEFAULT_LOG_LINES, MAX_TOKENS};
pub use response::{Response, END_SENTINEL, FAREWELL_MESSAGE};
