//! Minimal single-threaded HTTP stub for CLI integration tests.
//!
//! Serves canned JSON bodies keyed by exact request path; everything else
//! answers 404. Connections close after each response and the listener
//! thread dies with the test process.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Start a stub API server and return its base URL.
pub fn serve(routes: &[(&str, u16, &str)]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let base = format!("http://{}", listener.local_addr().expect("stub addr"));
    let table: HashMap<String, (u16, String)> = routes
        .iter()
        .map(|(path, status, body)| ((*path).to_owned(), (*status, (*body).to_owned())))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            respond(stream, &table);
        }
    });

    base
}

fn respond(mut stream: TcpStream, table: &HashMap<String, (u16, String)>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = table
        .get(path)
        .cloned()
        .unwrap_or((404, r#"{"message":"Not Found"}"#.to_owned()));
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    let _ = stream.write_all(response.as_bytes());
}
