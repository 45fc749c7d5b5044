use chrono::NaiveDateTime;

/// Timestamp layout used in report cells and console output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time, used for `created_at` / `modified_at` stamps
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Second-precision stamp for report and backup file names, e.g. `20261018_143005`
pub fn file_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Formats a stored timestamp without sub-second digits
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats an optional timestamp, empty when unset
pub fn format_optional_timestamp(ts: Option<&NaiveDateTime>) -> String {
    ts.map(format_timestamp).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stamp_format() {
        let stamp = file_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y%m%d_%H%M%S").is_ok());
    }

    #[test]
    fn format_timestamp_drops_fraction() {
        let ts = NaiveDateTime::parse_from_str("2026-01-15T09:30:12.345678", "%Y-%m-%dT%H:%M:%S%.f")
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2026-01-15T09:30:12");
        assert_eq!(format_optional_timestamp(None), "");
    }
}
