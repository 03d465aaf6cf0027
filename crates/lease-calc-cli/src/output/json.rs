use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON serialization error: {}", e);
    }
}

pub fn write_json<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_keeps_field_order() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "opening": "100", "closing": "0" })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.find("opening").unwrap() < text.find("closing").unwrap());
        assert!(text.ends_with("}\n"));
    }
}
