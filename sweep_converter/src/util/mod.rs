//!
//! The converter utilities.
//!

///
/// Formats a size in bytes with binary units, keeping the integer part only.
///
pub fn human_readable_size(size: i64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    let mut value = size as f64;
    for unit in UNITS.into_iter() {
        if value < 1024.0 {
            return format!("{}{unit}", value.trunc() as i64);
        }
        value /= 1024.0;
    }
    format!("{}EB", value.trunc() as i64)
}
