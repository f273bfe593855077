//! Structured logging setup.
//!
//! Output is either human-readable lines or newline-delimited JSON. Every
//! formatted event passes through [`crate::redact`] on its way to the
//! output, so a careless `tracing` call that formats a command line cannot
//! leak a secret. The filter level can be overridden at runtime via
//! `RUST_LOG`; otherwise the caller-supplied `level` string is used.

use serde::{Deserialize, Serialize};
use std::io;
use std::str::FromStr;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::redact;

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// An `io::Write` that redacts each buffer before forwarding it.
///
/// The fmt layer hands over one fully formatted event per `write` call, so
/// secrets are never split across calls.
pub struct RedactingWriter<W> {
    inner: W,
}

impl<W> RedactingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(redact(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Wraps another [`MakeWriter`] so every writer it makes redacts.
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for RedactingMakeWriter<M> {
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer())
    }
}

/// Install the global tracing subscriber, writing redacted output to stdout.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let writer = RedactingMakeWriter::new(io::stdout);

    let (human, json) = match format {
        LogFormat::Human => (Some(fmt::layer().with_writer(writer).with_target(true)), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(writer).with_target(true)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(human)
        .with(json)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn writer_redacts_each_write() {
        let mut writer = RedactingWriter::new(Vec::new());
        writer.write_all(b"linking --secret=ABCDEF12 done\n").unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "linking --secret=HIDDEN_KEY done\n");
    }

    #[test]
    fn subscriber_output_is_redacted() {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(RedactingMakeWriter::new(move || sink.clone()))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(command = "voting link --secret=9F9D35D4", "running");
        });

        let out = buf.contents();
        assert!(out.contains("--secret=HIDDEN_KEY"), "got: {out}");
        assert!(!out.contains("9F9D35D4"));
    }

    #[test]
    fn second_global_init_fails() {
        // The first call may lose to another test; the second never wins.
        let _ = init_logging(LogFormat::Json, "warn");
        assert!(init_logging(LogFormat::Human, "info").is_err());
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
