//! Display formatting helpers.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable file size, scaled by 1024 with up to two decimals.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;

    while unit + 1 < UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "display value rounded to two decimals."
    )]
    let scaled = bytes as f64 / divisor as f64;

    let rendered = format!("{scaled:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');

    let label = UNITS.get(unit).copied().unwrap_or("GB");

    format!("{rendered} {label}")
}
