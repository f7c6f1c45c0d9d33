// src/utils/console.rs
use std::io::Write;
use parking_lot::Mutex;
use tracing::debug;

type Sink = Mutex<Box<dyn Write + Send>>;

/// Shared console for all tasks.
///
/// Each call writes exactly one line (optional `[<tag>] ` prefix, text and a
/// trailing newline) and flushes it while holding the stream's lock, so lines
/// from concurrent tasks interleave but never tear.
pub struct Console {
    out: Sink,
    err: Sink,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Console bound to the process's stdout and stderr
    pub fn stdio() -> Self {
        Self::new(Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }

    pub fn println(&self, text: &str) {
        write_line(&self.out, None, text);
    }

    /// Write `[<tag>] <text>` to the output stream
    pub fn tagged(&self, tag: &str, text: &str) {
        write_line(&self.out, Some(tag), text);
    }

    /// Write `[<tag>] <text>` to the error stream
    pub fn tagged_err(&self, tag: &str, text: &str) {
        write_line(&self.err, Some(tag), text);
    }
}

fn write_line(sink: &Sink, tag: Option<&str>, text: &str) {
    let mut line = String::with_capacity(text.len() + tag.map_or(0, |t| t.len() + 3) + 1);
    if let Some(tag) = tag {
        line.push('[');
        line.push_str(tag);
        line.push_str("] ");
    }
    line.push_str(text);
    if !line.ends_with('\n') {
        line.push('\n');
    }

    let mut writer = sink.lock();
    if let Err(e) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
        debug!("Console write failed: {}", e);
    }
}
