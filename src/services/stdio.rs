use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::client::WalletBridge;
use crate::domains::envelope::{IncomingEnvelope, OutgoingEnvelope};
use crate::error::{BridgeError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostSummary {
    pub forwarded: usize,
    pub delivered: usize,
    pub skipped: usize,
}

pub async fn run<R, W>(
    mut reader: R,
    mut writer: W,
    mut bridge: WalletBridge,
) -> Result<HostSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Partial reads stay in `buf` when the other branch wins the select.
    let mut buf = Vec::new();
    let mut input_open = true;
    let mut summary = HostSummary::default();

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf), if input_open => {
                let read = read.map_err(|e| BridgeError::Runtime(e.to_string()))?;
                let at_eof = read == 0 || !buf.ends_with(b"\n");
                if !buf.is_empty() {
                    let parsed = parse_line(&buf);
                    buf.clear();
                    match parsed {
                        Some(envelope) => {
                            bridge.send(envelope).await?;
                            summary.forwarded += 1;
                        }
                        None => summary.skipped += 1,
                    }
                }
                if at_eof {
                    debug!("input closed; waiting for in-flight responses");
                    input_open = false;
                    bridge.close();
                }
            }
            incoming = bridge.recv() => match incoming {
                Some(envelope) => {
                    write_envelope(&mut writer, &envelope).await?;
                    summary.delivered += 1;
                }
                None => break,
            },
        }
    }

    bridge.shutdown().await?;
    Ok(summary)
}

fn parse_line(raw: &[u8]) -> Option<OutgoingEnvelope> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line,
        Err(err) => {
            warn!("skipping envelope that is not valid UTF-8: {err}");
            return None;
        }
    };
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(envelope) => Some(envelope),
        Err(err) => {
            warn!("skipping malformed envelope: {err}");
            None
        }
    }
}

async fn write_envelope<W>(writer: &mut W, envelope: &IncomingEnvelope) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(envelope)?;
    line.push(b'\n');
    writer
        .write_all(&line)
        .await
        .map_err(|e| BridgeError::Runtime(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| BridgeError::Runtime(e.to_string()))
}
