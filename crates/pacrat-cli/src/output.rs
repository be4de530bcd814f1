//! Result rendering.

use serde::Serialize;

/// Pretty-print a normalized result as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
