//! Line-delimited JSON transport for a [`KioskChannel`].
//!
//! One request per input line, one response per output line, in order.
//! Blank lines are skipped. A line that is not valid UTF-8 or not a valid
//! method call gets a `BAD_REQUEST` reply (echoing its `id` when one can be
//! recovered) and the loop keeps going; only I/O errors stop it.

use super::handler::KioskChannel;
use super::wire::{MethodCall, Reply, Response};
use crate::error::{KioskError, Result};
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Counters for one serve session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub succeeded: usize,
    pub bad_requests: usize,
}

/// Serve `channel` until `reader` reaches EOF.
pub fn serve<R: BufRead, W: Write>(
    channel: &KioskChannel,
    mut reader: R,
    mut writer: W,
) -> Result<ServeStats> {
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();
    info!(channel = %channel.name(), "serving method channel");

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| KioskError::TransportError(format!("failed to read request: {}", e)))?;
        if read == 0 {
            break;
        }

        // Undecodable bytes are a bad frame, not a broken stream.
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(error = %e, "request is not valid UTF-8");
                stats.requests += 1;
                stats.bad_requests += 1;
                let reply = Reply::bad_request(format!("request is not valid UTF-8: {}", e));
                write_response(&mut writer, &Response::new(None, reply))?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        stats.requests += 1;
        let response = match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => channel.handle(&call),
            Err(e) => {
                warn!(error = %e, "malformed request");
                stats.bad_requests += 1;
                Response::new(
                    request_id(line),
                    Reply::bad_request(format!("invalid method call: {}", e)),
                )
            }
        };

        if response.reply.is_success() {
            stats.succeeded += 1;
        }

        write_response(&mut writer, &response)?;
    }

    debug!(?stats, "request stream closed");
    Ok(stats)
}

/// Best-effort `id` of a line that failed the typed parse.
fn request_id(line: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(mut fields)) => fields.remove("id").filter(|id| !id.is_null()),
        _ => None,
    }
}

fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| KioskError::TransportError(format!("failed to serialize response: {}", e)))?;

    writeln!(writer, "{}", json)
        .and_then(|()| writer.flush())
        .map_err(|e| KioskError::TransportError(format!("failed to write response: {}", e)))
}
