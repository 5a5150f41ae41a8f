/// `Xm Ys`, e.g. `30m 0s`.
#[must_use]
pub fn format_duration(secs: u32) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(1800), "30m 0s");
        assert_eq!(format_duration(75), "1m 15s");
        assert_eq!(format_duration(0), "0m 0s");
    }
}
