//! Tests for request/response framing
//!
//! These tests verify:
//! - Request lines written by the client are read back intact
//! - Responses always end with the `[END]` sentinel line
//! - Framing over a real TCP stream, including bytes split across writes
//! - Oversized request lines are split at the cap

use std::io::{BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use rosterdb::protocol::{
    encode_response, read_response, receive_line, trim_line_ending, write_request,
    write_response, Frame, Response, END_SENTINEL, FAREWELL_MESSAGE,
};

// =============================================================================
// Helper Functions
// =============================================================================

/// Connected (client, server) socket pair on loopback
fn socket_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
    let (server, _) = listener.accept().unwrap();
    (client, server)
}

// =============================================================================
// Request Framing
// =============================================================================

#[test]
fn test_write_request_appends_newline() {
    let mut out = Vec::new();
    write_request(&mut out, "get trainer 1").unwrap();
    assert_eq!(out, b"get trainer 1\n");
}

#[test]
fn test_request_round_trip_through_reader() {
    let mut out = Vec::new();
    write_request(&mut out, "post trainer Ash 1 4 7").unwrap();
    write_request(&mut out, "exit").unwrap();

    let mut reader = Cursor::new(out);
    let first = match receive_line(&mut reader, 256).unwrap() {
        Frame::Line(line) => line,
        Frame::Closed => panic!("expected a line"),
    };
    assert_eq!(trim_line_ending(&first), "post trainer Ash 1 4 7");

    let second = receive_line(&mut reader, 256).unwrap();
    assert_eq!(second, Frame::Line("exit\n".to_string()));
    assert_eq!(receive_line(&mut reader, 256).unwrap(), Frame::Closed);
}

#[test]
fn test_crlf_request_is_trimmed() {
    let mut reader = Cursor::new(b"get log 5\r\n".to_vec());
    let line = match receive_line(&mut reader, 64).unwrap() {
        Frame::Line(line) => line,
        Frame::Closed => panic!("expected a line"),
    };
    assert_eq!(trim_line_ending(&line), "get log 5");
}

#[test]
fn test_oversized_line_split_into_chunks() {
    let long = format!("{}\n", "a".repeat(25));
    let mut reader = Cursor::new(long.into_bytes());

    let mut chunks = vec![];
    while let Frame::Line(chunk) = receive_line(&mut reader, 11).unwrap() {
        chunks.push(chunk);
    }

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 10);
    assert_eq!(chunks[1].len(), 10);
    assert_eq!(chunks[2], "aaaaa\n");
}

#[test]
fn test_non_utf8_request_is_lossy() {
    let mut reader = Cursor::new(b"get \xFF trainer\n".to_vec());
    match receive_line(&mut reader, 64).unwrap() {
        Frame::Line(line) => assert!(line.starts_with("get ")),
        Frame::Closed => panic!("expected a line"),
    }
}

// =============================================================================
// Response Framing
// =============================================================================

#[test]
fn test_every_response_ends_with_sentinel() {
    let responses = [
        Response::message("Trainer added successfully. ID=1"),
        Response::message("All Trainers:\n"),
        Response::message(""),
        Response::invalid(),
        Response::farewell(),
    ];

    for response in &responses {
        let encoded = encode_response(response);
        assert!(encoded.ends_with(&format!("\n{}\n", END_SENTINEL)));
    }
}

#[test]
fn test_empty_body_is_blank_line() {
    assert_eq!(encode_response(&Response::message("")), "\n[END]\n");
}

#[test]
fn test_farewell_closes() {
    let response = Response::farewell();
    assert!(response.close);
    assert_eq!(response.body, FAREWELL_MESSAGE);
    assert!(!Response::invalid().close);
}

#[test]
fn test_rejected_wording() {
    assert_eq!(
        Response::rejected("usage: delete trainer <id>").body,
        "Invalid command: usage: delete trainer <id>."
    );
    assert_eq!(Response::invalid().body, "Invalid command.");
}

#[test]
fn test_consecutive_responses_are_separated() {
    let mut out = Vec::new();
    write_response(&mut out, &Response::message("one")).unwrap();
    write_response(&mut out, &Response::message("two\nlines\n")).unwrap();

    let mut reader = Cursor::new(out);
    assert_eq!(read_response(&mut reader).unwrap().unwrap(), "one");
    assert_eq!(read_response(&mut reader).unwrap().unwrap(), "two\nlines");
    assert_eq!(read_response(&mut reader).unwrap(), None);
}

#[test]
fn test_sentinel_text_inside_a_line_is_not_a_terminator() {
    let mut reader = Cursor::new(b"see [END] here\n[END]\n".to_vec());
    assert_eq!(
        read_response(&mut reader).unwrap().unwrap(),
        "see [END] here"
    );
}

// =============================================================================
// Over TCP
// =============================================================================

#[test]
fn test_response_split_across_writes() {
    let (client, mut server) = socket_pair();

    let writer = thread::spawn(move || {
        for piece in ["All Trai", "ners:\n  #1 Ash", " (3 species)\n[E", "ND]\n"] {
            server.write_all(piece.as_bytes()).unwrap();
            server.flush().unwrap();
            thread::sleep(Duration::from_millis(5));
        }
    });

    let mut reader = BufReader::new(client);
    let body = read_response(&mut reader).unwrap().unwrap();
    assert_eq!(body, "All Trainers:\n  #1 Ash (3 species)");

    writer.join().unwrap();
}

#[test]
fn test_request_split_across_writes() {
    let (mut client, server) = socket_pair();

    let writer = thread::spawn(move || {
        for piece in ["put tr", "ainer 1 ", "4 7\n"] {
            client.write_all(piece.as_bytes()).unwrap();
            thread::sleep(Duration::from_millis(5));
        }
        client
    });

    let mut reader = BufReader::new(server);
    let frame = receive_line(&mut reader, 8192).unwrap();
    assert_eq!(frame, Frame::Line("put trainer 1 4 7\n".to_string()));

    // Peer closing is reported as Closed, not as an error
    drop(writer.join().unwrap());
    assert_eq!(receive_line(&mut reader, 8192).unwrap(), Frame::Closed);
}
