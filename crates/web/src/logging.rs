//! Routes `tracing` events to the browser console.
//!
//! Each event is formatted by a `tracing-subscriber` fmt layer into a buffer
//! and handed to the console method matching its level when the buffer is
//! dropped.

#[cfg(any(target_arch = "wasm32", test))]
use tracing::Level;

/// Console method used for an event.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

#[cfg(any(target_arch = "wasm32", test))]
impl From<&Level> for ConsoleMethod {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// The text to log for a formatted event, without its trailing newline.
#[cfg(any(target_arch = "wasm32", test))]
fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let line = text.trim_end();

    (!line.is_empty()).then(|| line.to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) use console::init;

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::Metadata;
    use tracing_subscriber::{
        filter::LevelFilter,
        fmt::{self, MakeWriter},
        layer::SubscriberExt,
        util::{SubscriberInitExt, TryInitError},
    };
    use wasm_bindgen::JsValue;

    use super::{ConsoleMethod, console_line};

    /// Install the console subscriber.
    pub(crate) fn init() -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .without_time()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(ConsoleMakeWriter),
            )
            .with(LevelFilter::INFO)
            .try_init()
    }

    struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(ConsoleMethod::Info)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(ConsoleMethod::from(meta.level()))
        }
    }

    struct ConsoleWriter {
        method: ConsoleMethod,
        buffer: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(method: ConsoleMethod) -> Self {
            Self {
                method,
                buffer: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let Some(line) = console_line(&self.buffer) else {
                return;
            };

            let value = JsValue::from_str(&line);

            match self.method {
                ConsoleMethod::Error => web_sys::console::error_1(&value),
                ConsoleMethod::Warn => web_sys::console::warn_1(&value),
                ConsoleMethod::Info => web_sys::console::info_1(&value),
                ConsoleMethod::Debug => web_sys::console::debug_1(&value),
            }
        }
    }
}
