pub mod profile;
pub mod records;
pub mod reset;
pub mod timer;
pub mod usage;

/// Format whole seconds as `HH:MM:SS`.
pub(crate) fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn formats_hms() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }
}
