//! Network Module
//!
//! TCP server, per-connection workers and a blocking client.
//!
//! ## Architecture
//! - Single acceptor thread (the caller of `Server::run`)
//! - One detached worker thread per connection, no pool, no cap
//! - Commands routed through the Dispatcher
//! - Shutdown stops the acceptor only; workers serve until their client leaves

mod client;
mod connection;
mod server;
mod shutdown;

pub use client::Client;
pub use connection::Connection;
pub use server::Server;
pub use shutdown::Shutdown;
