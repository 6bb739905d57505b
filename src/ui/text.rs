pub const PROMPT: &str = "Drag an audio file into the window to start playing.";

/// `m:ss`, e.g. `3:05`.
pub fn format_time(seconds: f32) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn volume_text(volume: f32) -> String {
    // nudge so 0.29 reads 29% rather than 28%
    format!("{}%", (volume.clamp(0.0, 1.0) * 100.0 + 1e-3).floor() as u32)
}

pub fn loading_text(progress: f32) -> String {
    format!("{}%", (progress.clamp(0.0, 1.0) * 100.0).floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_zero_padded() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn percentages_floor() {
        assert_eq!(volume_text(1.0), "100%");
        assert_eq!(volume_text(0.29), "29%");
        assert_eq!(volume_text(0.004), "0%");
        assert_eq!(loading_text(0.505), "50%");
    }
}
