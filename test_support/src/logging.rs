//! Tracing helpers for tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt;

/// Install a global `fmt` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[derive(Clone)]
struct BufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().expect("lock").write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf.lock().expect("lock").flush()
    }
}

/// Capture logs emitted within the provided closure.
///
/// # Examples
///
/// ```rust
/// use test_support::capture_logs;
/// use tracing::Level;
///
/// let output = capture_logs(Level::INFO, || tracing::info!("hello"));
/// assert!(output.contains("hello"));
/// ```
pub fn capture_logs<F>(level: Level, f: F) -> String
where
    F: FnOnce(),
{
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = BufferWriter {
        buf: Arc::clone(&buf),
    };
    let subscriber = fmt()
        .with_max_level(level)
        .without_time()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let locked = buf.lock().expect("lock");
    String::from_utf8(locked.clone()).expect("utf8")
}
