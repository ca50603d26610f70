pub mod config;
pub mod garden;
pub mod session;

/// Print one value as a compact JSON line.
pub(crate) fn print_line<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
