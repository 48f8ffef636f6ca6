//! The single-task demo: read a line, write it back out.

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::error::{DemoError, Result};
use crate::line_reader::LineReader;

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

/// Echoes every line to `out`. Any read failure ends the echo with that
/// error, end of input included. Only cancellation returns `Ok`.
pub async fn echo_lines<R, W>(
    reader: &mut LineReader<R>,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = reader.read_line() => line?,
        };
        write_line(out, &line).await?;
    }
}
