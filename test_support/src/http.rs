//! Lightweight HTTP fixtures for tests.
//!
//! Spawns a single-use server that answers the first request with a fixed
//! status and body and hands the raw request back to the test. The listener
//! is polled in non-blocking mode and guarded by deadlines so hung clients
//! cannot stall the test suite.

use std::{
    io::{self, Read, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    thread,
    time::{Duration, Instant},
};

/// Request as received by the fixture server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRequest {
    /// Request method, e.g. `POST`.
    pub method: String,
    /// Request target, including any query string.
    pub target: String,
    /// Header lines in arrival order.
    pub headers: Vec<(String, String)>,
    /// Request body decoded as UTF-8.
    pub body: String,
}

impl CapturedRequest {
    /// First value of the header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Join handle for a spawned HTTP fixture.
///
/// The handle joins the underlying thread when dropped to avoid leaking
/// background work if a test aborts early. Call [`HttpServer::join`] to
/// collect the captured request and surface any panic from the server thread.
#[derive(Debug)]
#[must_use]
pub struct HttpServer {
    handle: Option<thread::JoinHandle<Option<CapturedRequest>>>,
    addr: SocketAddr,
}

impl HttpServer {
    /// Join the server thread and return the request it answered, if any.
    pub fn join(mut self) -> thread::Result<Option<CapturedRequest>> {
        self.shutdown_listener();
        self.handle.take().expect("server already joined").join()
    }

    fn shutdown_listener(&self) {
        // Connect to unblock the accept loop; the outcome is irrelevant.
        let _ = TcpStream::connect(self.addr);
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        self.shutdown_listener();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawn a single-use HTTP server answering the first request with `status`
/// and `body`.
///
/// The server listens on `127.0.0.1`; the returned string is its base URL.
pub fn spawn_http_server(status: u16, body: impl Into<String>) -> (String, HttpServer) {
    let body = body.into();
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind HTTP listener");
    listener
        .set_nonblocking(true)
        .expect("set listener non-blocking");
    let addr = listener.local_addr().expect("local addr");
    let url = format!("http://{addr}");
    let handle = thread::spawn(move || run_http_server(&listener, status, &body));
    (
        url,
        HttpServer {
            handle: Some(handle),
            addr,
        },
    )
}

fn run_http_server(listener: &TcpListener, status: u16, body: &str) -> Option<CapturedRequest> {
    let accept_deadline = Instant::now() + Duration::from_secs(5);
    let mut stream = accept_connection(listener, accept_deadline);
    stream
        .set_nonblocking(true)
        .expect("set stream non-blocking");
    let read_deadline = Instant::now() + Duration::from_secs(2);
    let raw = read_request(&mut stream, read_deadline);
    let request = parse_request(&raw)?;
    write_response(&mut stream, status, body);
    Some(request)
}

fn accept_connection(listener: &TcpListener, deadline: Instant) -> TcpStream {
    loop {
        match listener.accept() {
            Ok((stream, _)) => return stream,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                assert!(
                    Instant::now() < deadline,
                    "timed out waiting for fixture connection"
                );
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => panic!("failed to accept connection: {err}"),
        }
    }
}

/// Read until the head and a `Content-Length` body have arrived, the peer
/// closes, or the deadline passes.
fn read_request(stream: &mut TcpStream, deadline: Instant) -> Vec<u8> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    while Instant::now() < deadline && !is_complete(&raw) {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(5));
            }
            Err(err) => panic!("failed to read request: {err}"),
        }
    }
    raw
}

fn split_head(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|end| (&raw[..end], &raw[end + 4..]))
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn is_complete(raw: &[u8]) -> bool {
    split_head(raw).is_some_and(|(head, body)| {
        body.len() >= content_length(&String::from_utf8_lossy(head))
    })
}

fn parse_request(raw: &[u8]) -> Option<CapturedRequest> {
    let (head_bytes, body) = split_head(raw)?;
    let head = String::from_utf8_lossy(head_bytes);
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_owned();
    let target = request_line.next()?.to_owned();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
        .collect();
    Some(CapturedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason_phrase(status),
        body.len(),
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
