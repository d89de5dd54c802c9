//! JSON output for CLI commands
//!
//! - One pretty-printed JSON document per command
//! - UTF-8 only

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a JSON document to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json_to(&mut out, value)?;
    out.flush()?;

    Ok(())
}

/// Write a JSON document followed by a newline
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &serde_json::json!({"port": 54330})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"port\": 54330"));
    }
}
