use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses an ISO date (`2024-01-05`) or date-time (`2024-01-05T12:00:00`,
/// RFC 3339 with offset). Offsets are normalized to UTC.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Anything the date picker may hand the simulation as "current date".
///
/// `None` means the value is missing or unparseable.
pub trait IntoSimDate {
    fn into_sim_date(self) -> Option<NaiveDateTime>;
}

impl IntoSimDate for &str {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        parse_date(self)
    }
}

impl IntoSimDate for &String {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        parse_date(self)
    }
}

impl IntoSimDate for String {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        parse_date(&self)
    }
}

impl IntoSimDate for NaiveDate {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl IntoSimDate for NaiveDateTime {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        Some(self)
    }
}

impl<T: IntoSimDate> IntoSimDate for Option<T> {
    fn into_sim_date(self) -> Option<NaiveDateTime> {
        self.and_then(IntoSimDate::into_sim_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_date_is_midnight() {
        assert_eq!(parse_date("2024-01-05"), ymd(2024, 1, 5).and_hms_opt(0, 0, 0));
    }

    #[test]
    fn accepts_date_times() {
        assert_eq!(
            parse_date("2024-01-05T06:30:00"),
            ymd(2024, 1, 5).and_hms_opt(6, 30, 0)
        );
        assert_eq!(
            parse_date("2024-01-05T06:30:00+02:00"),
            ymd(2024, 1, 5).and_hms_opt(4, 30, 0)
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(None::<&str>.into_sim_date(), None);
    }
}
