//! # Command Driver
//!
//! Reads one JSON command per line and writes one JSON `OrderingResponse` per
//! line, in order. Blank lines are skipped; a line that is not UTF-8 is
//! answered with a 400 like any other malformed command.
//!
//! ```text
//! {"op": "reorder_category", "body": {"restaurant_id": "...", "category_id": "...", "new_index": 0}}
//! ```

use crate::container::RuntimeHandler;
use mc_02_menu_catalog::{CatalogError, OrderingResponse};
use serde::Deserialize;
use serde_json::Value;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// One line of input.
#[derive(Debug, Deserialize)]
pub struct Command {
    pub op: String,
    #[serde(default)]
    pub body: Value,
}

/// Counters reported when the input ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub processed: u64,
    pub failed: u64,
}

/// Answer a single input line.
pub async fn process_line(handler: &RuntimeHandler, line: &str) -> OrderingResponse {
    match serde_json::from_str::<Command>(line) {
        Ok(command) => handler.handle(&command.op, &command.body).await,
        Err(err) => {
            warn!(error = %err, "Malformed command line");
            OrderingResponse::failure(&CatalogError::Validation(format!(
                "Malformed command: {err}"
            )))
        }
    }
}

/// Serve commands from `reader` until it is exhausted.
pub async fn run<R, W>(handler: &RuntimeHandler, mut reader: R, mut writer: W) -> io::Result<DriverStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = DriverStats::default();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => process_line(handler, line).await,
            Err(err) => {
                warn!(error = %err, "Command line is not valid UTF-8");
                OrderingResponse::failure(&CatalogError::Validation(format!(
                    "Malformed command: {err}"
                )))
            }
        };
        stats.processed += 1;
        if !response.success {
            stats.failed += 1;
        }

        let mut encoded = serde_json::to_vec(&response).map_err(io::Error::other)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    debug!(processed = stats.processed, failed = stats.failed, "Input exhausted");
    Ok(stats)
}
