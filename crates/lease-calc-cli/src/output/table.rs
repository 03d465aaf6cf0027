use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_amount;

/// Format output as tables: scalar fields of the result first, then one
/// table per nested collection (e.g. the amortisation schedule), and
/// journal entries as indented Dr/Cr text.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_section(None, value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &Map<String, Value>) {
    print_section(None, result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    if let Some(t) = title {
        println!("\n{}", t);
    }
    match value {
        Value::Object(map) if is_journal_entry(map) => print!("{}", journal_text(map)),
        Value::Object(map) => {
            let mut builder = Builder::default();
            let mut has_scalars = false;
            builder.push_record(["Field", "Value"]);
            for (key, val) in map.iter().filter(|(_, v)| !is_nested(v)) {
                builder.push_record([key.as_str(), &format_value(val)]);
                has_scalars = true;
            }
            if has_scalars {
                println!("{}", Table::from(builder));
            }
            for (key, val) in map.iter().filter(|(_, v)| is_nested(v)) {
                print_section(Some(&heading(key)), val);
            }
        }
        Value::Array(arr) if arr.iter().all(|v| v.as_object().is_some_and(is_journal_entry)) => {
            for entry in arr.iter().filter_map(Value::as_object) {
                print!("{}", journal_text(entry));
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", format_value(value)),
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn is_nested(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn is_journal_entry(map: &Map<String, Value>) -> bool {
    map.contains_key("label") && matches!(map.get("lines"), Some(Value::Array(_)))
}

/// Render an entry the way it is written in a ledger:
///
/// ```text
/// At commencement:
///   Dr Right-of-Use Asset .............     88,648.76
///       Cr Lease Liability .............     88,648.76
/// ```
fn journal_text(entry: &Map<String, Value>) -> String {
    let label = entry.get("label").and_then(Value::as_str).unwrap_or_default();
    let mut out = format!("{}:\n", label);

    let lines = entry.get("lines").and_then(Value::as_array);
    for line in lines.into_iter().flatten() {
        let account = line.get("account").and_then(Value::as_str).unwrap_or_default();
        let amount = line.get("amount").map(format_value).unwrap_or_default();
        let (indent, side) = match line.get("side").and_then(Value::as_str) {
            Some("credit") => ("      ", "Cr"),
            _ => ("  ", "Dr"),
        };
        let width = 34 - indent.len();
        out.push_str(&format!(
            "{indent}{side} {:.<width$} {:>14}\n",
            format!("{account} "),
            amount
        ));
    }
    out.push('\n');
    out
}

fn heading(key: &str) -> String {
    let words = key.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format_amount(s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_journal_text_layout() {
        let entry = json!({
            "label": "At commencement",
            "lines": [
                { "account": "Right-of-Use Asset", "side": "debit", "amount": "88648.7626" },
                { "account": "Lease Liability", "side": "credit", "amount": "88648.7626" }
            ]
        });
        let text = journal_text(entry.as_object().unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "At commencement:");
        assert!(lines[1].starts_with("  Dr Right-of-Use Asset ..."));
        assert!(lines[1].ends_with("88,648.76"));
        assert!(lines[2].starts_with("      Cr Lease Liability ..."));
        // Amount columns line up
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_is_journal_entry() {
        let entry = json!({ "label": "x", "lines": [] });
        assert!(is_journal_entry(entry.as_object().unwrap()));
        let row = json!({ "period": 1, "opening": "10" });
        assert!(!is_journal_entry(row.as_object().unwrap()));
    }

    #[test]
    fn test_heading_and_value_formatting() {
        assert_eq!(heading("first_period"), "First period");
        assert_eq!(format_value(&json!("20567.561869")), "20,567.56");
        assert_eq!(format_value(&json!("debit")), "debit");
        assert_eq!(format_value(&json!(4)), "4");
    }
}
