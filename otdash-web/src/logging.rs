//! Routes `tracing` events from the client core to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVES: &str = "info,client=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Error,
    Warn,
    Log,
}

impl Sink {
    fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else {
            Self::Log
        }
    }
}

/// Formatted event text without the trailing newline.
fn console_line(buffer: &[u8]) -> String {
    String::from_utf8_lossy(buffer).trim_end().to_string()
}

/// Buffers one formatted event and hands it to the console when dropped.
struct ConsoleWriter {
    sink: Sink,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = console_line(&self.buffer);
        if line.is_empty() {
            return;
        }
        let value = wasm_bindgen::JsValue::from(line);
        match self.sink {
            Sink::Error => web_sys::console::error_1(&value),
            Sink::Warn => web_sys::console::warn_1(&value),
            Sink::Log => web_sys::console::log_1(&value),
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            sink: Sink::Log,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            sink: Sink::for_level(*meta.level()),
            buffer: Vec::new(),
        }
    }
}

/// Install the console subscriber. The browser has no clock `fmt` can read,
/// so events carry no timestamp.
pub fn init() {
    let layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter);

    if let Err(err) = tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::new(DEFAULT_DIRECTIVES))
        .try_init()
    {
        web_sys::console::warn_1(&format!("tracing already initialised: {err}").into());
    }
}
