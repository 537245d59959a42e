//! JSON output for the CLI
//!
//! One JSON object per line on the given writer:
//! - `{"page":n,"records":[...]}` for every emitted batch
//! - `{"status":"ok","data":<outcome>}` once the search completes
//! - `{"status":"error","code":..,"message":..}` when it fails

use std::io::Write;

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::CliResult;

/// Write one emitted batch
pub fn write_page<W: Write, R: Serialize>(
    out: &mut W,
    page: usize,
    records: &[R],
) -> CliResult<()> {
    let line = json!({
        "page": page,
        "records": records,
    });
    write_line(out, &line)
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(out, &response)
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(out, &response)
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
