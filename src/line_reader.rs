//! Line input from a stream, published one line at a time.
//!
//! [`LineReader`] does the actual reading. [`LineFeed`] runs a reader in the
//! background and hands its lines to a dispatcher through a one-item
//! mailbox, which is how the interactive demos get input that they can race
//! against a timer.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{DemoError, Result};
use crate::mailbox::{mailbox, MailboxReceiver, MailboxSender};

/// Strips every trailing `\r` and `\n`, leaving the rest of the line alone.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(&['\r', '\n'][..])
}

// =============================================================================
// Reading
// =============================================================================

pub struct LineReader<R> {
    input: R,
    buf: String,
}

impl LineReader<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader {
            input,
            buf: String::new(),
        }
    }

    /// Reads one line and strips its line ending.
    ///
    /// A last line without a newline is still returned; the call after it
    /// fails with [`DemoError::EndOfInput`].
    pub async fn read_line(&mut self) -> Result<String> {
        self.buf.clear();
        let read = self.input.read_line(&mut self.buf).await?;
        if read == 0 {
            return Err(DemoError::EndOfInput);
        }
        Ok(trim_line_ending(&self.buf).to_string())
    }

    /// Reads lines and posts each one to `lines` until the input fails.
    ///
    /// Posting waits while the previous line is still in the mailbox. Returns
    /// `Ok(())` when cancelled or when nobody is taking lines any more.
    pub async fn run(mut self, lines: MailboxSender<String>, cancel: CancellationToken) -> Result<()> {
        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                line = self.read_line() => line?,
            };

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                posted = lines.post(line) => {
                    if posted.is_err() {
                        debug!("line consumer dropped, reader stopping");
                        return Ok(());
                    }
                }
            }
        }
    }
}

// =============================================================================
// Background feed
// =============================================================================

/// A [`LineReader`] running as its own task, seen from the consuming side.
pub struct LineFeed {
    lines: MailboxReceiver<String>,
    reader: Option<JoinHandle<Result<()>>>,
}

impl LineFeed {
    pub fn spawn<R>(reader: LineReader<R>, cancel: CancellationToken) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mailbox();
        let handle = tokio::spawn(reader.run(tx, cancel));
        LineFeed {
            lines: rx,
            reader: Some(handle),
        }
    }

    /// Waits for the next line.
    ///
    /// Once the reader has stopped and the mailbox is drained, this returns
    /// the error that stopped it. Cancel safe: a line is only removed from
    /// the mailbox when this future resolves with it.
    pub async fn next_line(&mut self) -> Result<String> {
        if let Some(line) = self.lines.take().await {
            return Ok(line);
        }

        let Some(reader) = self.reader.as_mut() else {
            return Err(DemoError::Closed);
        };
        let outcome = reader.await;
        self.reader = None;

        match outcome? {
            Err(err) => Err(err),
            Ok(()) => Err(DemoError::Closed),
        }
    }
}

impl Drop for LineFeed {
    fn drop(&mut self) {
        if let Some(reader) = &self.reader {
            reader.abort();
        }
    }
}
