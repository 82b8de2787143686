//! Display helpers shared by list and detail screens

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable file size; "-" when unknown or zero
pub fn format_file_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return "-".to_string();
    };

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}

/// Playback duration as "M:SS" or "H:MM:SS"; "-" when unknown
pub fn format_duration(seconds: Option<u64>) -> String {
    let Some(total) = seconds else {
        return "-".to_string();
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_scale_through_units() {
        assert_eq!(format_file_size(None), "-");
        assert_eq!(format_file_size(Some(0)), "-");
        assert_eq!(format_file_size(Some(512)), "512.00 B");
        assert_eq!(format_file_size(Some(1024)), "1.00 KB");
        assert_eq!(format_file_size(Some(5 * 1024 * 1024)), "5.00 MB");
        assert_eq!(format_file_size(Some(3 * 1024 * 1024 * 1024)), "3.00 GB");
    }

    #[test]
    fn durations_format_by_length() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(Some(205)), "3:25");
        assert_eq!(format_duration(Some(3725)), "1:02:05");
    }
}
