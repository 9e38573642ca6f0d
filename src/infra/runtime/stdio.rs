//! Newline-delimited JSON-RPC over a reader/writer pair.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::api::mcp::Dispatcher;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeStats {
    pub lines: u64,
    pub responses: u64,
}

/// Read lines until EOF, answering each before reading the next. Every
/// response is written as one line and flushed immediately.
pub async fn serve<R, W>(dispatcher: &Dispatcher, mut reader: R, mut writer: W) -> anyhow::Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        stats.lines += 1;
        let Some(resp) = dispatcher.handle_raw(&buf).await else {
            continue;
        };
        let mut out = serde_json::to_vec(&resp)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        stats.responses += 1;
    }
    tracing::debug!(lines = stats.lines, responses = stats.responses, "input closed");
    Ok(stats)
}

pub async fn serve_stdio(dispatcher: &Dispatcher) -> anyhow::Result<ServeStats> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(dispatcher, stdin, stdout).await
}
