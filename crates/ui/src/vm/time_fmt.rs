use chrono::Duration;

#[must_use]
pub fn format_remaining(remaining_secs: u32) -> String {
    format!("Time: {remaining_secs}s")
}

/// `m:ss`, clamped at zero.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_elapsed_minutes() {
        assert_eq!(format_elapsed(Duration::seconds(0)), "0:00");
        assert_eq!(format_elapsed(Duration::seconds(125)), "2:05");
        assert_eq!(format_elapsed(Duration::seconds(-3)), "0:00");
    }
}
