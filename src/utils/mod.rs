pub mod interval;
pub mod shutdown;

/// Formats a duration in minutes as `3h 20m`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes() {
        assert_eq!(format_minutes(200), "3h 20m");
        assert_eq!(format_minutes(45), "0h 45m");
    }
}
