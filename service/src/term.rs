//! Fixed boundaries of the parliamentary term under analysis.

use chrono::NaiveDate;

/// Start/end dates of a parliamentary term plus the organization code the
/// API uses for that term's membership records.
///
/// Instances are immutable and passed explicitly to every step that needs
/// them; there is no global term state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub organization: &'static str,
}

impl TermWindow {
    /// The 9th European Parliament, 2019-07-02 to 2024-06-05.
    pub const NINTH: Self = Self {
        start: date(2019, 7, 2),
        end: date(2024, 6, 5),
        organization: "org/ep-9",
    };

    /// Closed-open containment: `[start, end)`. Used for event dates.
    #[must_use]
    pub fn contains_half_open(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Clip an arbitrary range to `[start, end]`, keeping `from <= to`.
    #[must_use]
    pub fn clip(&self, from: NaiveDate, to: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = from.clamp(self.start, self.end);
        let to = to.clamp(from, self.end);
        (from, to)
    }
}

/// Parse an API date such as `2019-07-02` or `2019-07-02T09:00:00`; only the
/// calendar day is kept.
#[must_use]
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

// Evaluated at compile time, so a bad literal fails the build.
#[allow(clippy::panic)]
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid term boundary"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn ninth_term_boundaries() {
        let term = TermWindow::NINTH;
        assert_eq!(term.start, d("2019-07-02"));
        assert_eq!(term.end, d("2024-06-05"));
        assert_eq!(term.organization, "org/ep-9");
    }

    #[test]
    fn half_open_excludes_end() {
        let term = TermWindow::NINTH;
        assert!(term.contains_half_open(d("2019-07-02")));
        assert!(term.contains_half_open(d("2024-06-04")));
        assert!(!term.contains_half_open(d("2024-06-05")));
        assert!(!term.contains_half_open(d("2019-07-01")));
    }

    #[test]
    fn api_dates_keep_the_calendar_day() {
        assert_eq!(parse_api_date("2019-07-02"), Some(d("2019-07-02")));
        assert_eq!(parse_api_date("2021-03-08T17:00:00+01:00"), Some(d("2021-03-08")));
        assert_eq!(parse_api_date("08/03/2021"), None);
        assert_eq!(parse_api_date("2021"), None);
    }

    #[test]
    fn clip_keeps_order_and_bounds() {
        let term = TermWindow::NINTH;
        let cases = [
            (("2014-07-01", "2030-01-01"), ("2019-07-02", "2024-06-05")),
            (("2020-01-01", "2021-01-01"), ("2020-01-01", "2021-01-01")),
            (("2022-01-01", "2019-01-01"), ("2022-01-01", "2022-01-01")),
            (("2025-01-01", "2026-01-01"), ("2024-06-05", "2024-06-05")),
        ];

        for ((from, to), (want_from, want_to)) in cases {
            let got = term.clip(d(from), d(to));
            assert_eq!(got, (d(want_from), d(want_to)), "case {from}..{to}");
        }
    }
}
