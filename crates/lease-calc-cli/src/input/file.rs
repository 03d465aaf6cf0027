use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML input file (chosen by extension) into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lease_calc_core::lease_accounting::{LeaseParameters, PaymentTiming};
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_yaml_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.yml");
        fs::write(
            &path,
            "term: 4\npayment: 25000\nrate: \"0.05\"\npayment_timing: advance\nuseful_life: 5\nprepaid_payments: 750\n",
        )
        .unwrap();

        let params: LeaseParameters = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(params.payment_timing, PaymentTiming::Advance);
        assert_eq!(params.rate, dec!(0.05));
        assert_eq!(params.prepaid_payments, dec!(750));
    }

    #[test]
    fn test_read_json_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_input::<LeaseParameters>(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = read_input::<LeaseParameters>(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));

        let err = read_input::<LeaseParameters>(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }
}
