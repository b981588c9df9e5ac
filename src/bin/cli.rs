//! RosterDB CLI Client
//!
//! Interactive prompt: reads a command per line, prints the server's reply.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use rosterdb::network::Client;
use rosterdb::protocol::trim_line_ending;

/// RosterDB CLI
#[derive(Parser, Debug)]
#[command(name = "rosterdb-cli")]
#[command(about = "Interactive client for the RosterDB server")]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long)]
    port: u16,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut client = match Client::connect((args.host.as_str(), args.port)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[Client] Could not connect to {}:{}: {}", args.host, args.port, e);
            return ExitCode::FAILURE;
        }
    };

    println!("[Client] Connected to {}:{}", args.host, args.port);
    println!("[Client] Type 'exit' to quit.");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\n[Client] End of input.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("[Client] Failed to read input: {}", e);
                break;
            }
        }

        let command = trim_line_ending(&input).trim();

        // Blank lines and comments (batch scripts) are skipped
        if command.is_empty() || command.starts_with('#') {
            continue;
        }

        match client.send(command) {
            Ok(body) => println!("{}", body),
            Err(e) => {
                println!("[Client] Connection closed or error: {}", e);
                break;
            }
        }

        if command.split_whitespace().next() == Some("exit") {
            println!("[Client] Exiting.");
            break;
        }
    }

    println!("[Client] Connection closed.");
    ExitCode::SUCCESS
}
