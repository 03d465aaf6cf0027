use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialize JSON piped on stdin. Returns None when stdin is an
/// interactive terminal or the pipe is empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON: {e}"))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lease_calc_core::lease_accounting::LeaseParameters;

    #[test]
    fn test_empty_pipe_is_none() {
        let parsed: Option<LeaseParameters> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_parameters() {
        let parsed: Option<LeaseParameters> = parse_piped(
            r#"{"term": 2, "payment": "500", "rate": "0", "useful_life": 2}"#,
        )
        .unwrap();
        assert_eq!(parsed.unwrap().term, 2);
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_piped::<LeaseParameters>("term=2").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
