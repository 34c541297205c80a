use serde::Serialize;
use std::fs;

/// Write the commissions document as indented JSON, replacing any existing
/// file at `path`.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).map_err(|e| format!("Failed to write '{}': {}", path, e))?;
    Ok(())
}
