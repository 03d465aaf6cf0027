use serde_json::Value;
use std::io::{self, Write};

use lease_calc_core::lease_accounting::ScheduleRow;

/// Write output as CSV to stdout. A result carrying an amortisation
/// schedule is written as one row per period; anything else as
/// field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                if let Some(Value::Array(schedule)) = result.get("schedule") {
                    write_array_csv(&mut wtr, schedule);
                } else {
                    write_field_value_csv(&mut wtr, result);
                }
            }
            _ => write_field_value_csv(&mut wtr, map),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Write the schedule with a header row of `ScheduleRow` field names.
pub fn write_schedule<W: Write>(writer: W, schedule: &[ScheduleRow]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in schedule {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the schedule to a UTF-8 CSV file, replacing any existing file.
pub fn write_schedule_file(
    path: &str,
    schedule: &[ScheduleRow],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
    write_schedule(io::BufWriter::new(file), schedule)?;
    Ok(())
}

fn write_field_value_csv<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    // Headers come from the first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
