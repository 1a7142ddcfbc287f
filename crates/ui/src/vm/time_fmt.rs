use chrono::{DateTime, NaiveDate, Utc};

/// `Mar 4, 2024`
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_joined(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "Unknown".to_owned(), |at| format_date(at.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::time::fixed_now;

    #[test]
    fn dates_are_short_and_readable() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(format_date(date), "Mar 4, 2024");
        assert_eq!(format_joined(Some(fixed_now())), "Nov 14, 2023");
        assert_eq!(format_joined(None), "Unknown");
    }
}
