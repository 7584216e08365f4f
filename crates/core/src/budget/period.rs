//! Reporting periods and their transaction date windows.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::error::BudgetError;
use super::types::BudgetPeriod;

/// Earliest supported calendar year.
pub const MIN_YEAR: i32 = 1;
/// Latest supported calendar year (the window end must still be representable).
pub const MAX_YEAR: i32 = 9998;

pub(crate) fn validate_year(year: i32) -> Result<i32, BudgetError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(BudgetError::InvalidYear(year))
    }
}

pub(crate) fn validate_month(month: u32) -> Result<u32, BudgetError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(BudgetError::InvalidMonth(month))
    }
}

fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>, BudgetError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(BudgetError::InvalidMonth(month))
}

/// Half-open UTC range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Window covering one calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or month is out of range.
    pub fn month(year: i32, month: u32) -> Result<Self, BudgetError> {
        let year = validate_year(year)?;
        let month = validate_month(month)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        Ok(Self {
            start: first_instant(year, month)?,
            end: first_instant(next_year, next_month)?,
        })
    }

    /// Window covering one calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range.
    pub fn year(year: i32) -> Result<Self, BudgetError> {
        let year = validate_year(year)?;
        Ok(Self {
            start: first_instant(year, 1)?,
            end: first_instant(year + 1, 1)?,
        })
    }

    /// Returns true if `at` falls inside the window.
    #[cfg(test)]
    pub(crate) fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// A resolved period selector: which budgets to read and which transactions
/// count against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    period: BudgetPeriod,
    year: i32,
    month: Option<u32>,
    window: DateWindow,
}

impl ReportingPeriod {
    /// A monthly reporting period.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or month is out of range.
    pub fn monthly(year: i32, month: u32) -> Result<Self, BudgetError> {
        Ok(Self {
            period: BudgetPeriod::Monthly,
            year,
            month: Some(month),
            window: DateWindow::month(year, month)?,
        })
    }

    /// A yearly reporting period.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range.
    pub fn yearly(year: i32) -> Result<Self, BudgetError> {
        Ok(Self {
            period: BudgetPeriod::Yearly,
            year,
            month: None,
            window: DateWindow::year(year)?,
        })
    }

    /// Resolves raw query parameters.
    ///
    /// An absent or unrecognized period falls back to monthly. Missing year and
    /// month default to `today`'s; the month is ignored for yearly periods.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit year or month is out of range.
    pub fn resolve(
        period: Option<&str>,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, BudgetError> {
        let year = year.unwrap_or_else(|| today.year());
        match period.and_then(BudgetPeriod::parse) {
            Some(BudgetPeriod::Yearly) => Self::yearly(year),
            Some(BudgetPeriod::Monthly) | None => {
                Self::monthly(year, month.unwrap_or_else(|| today.month()))
            }
        }
    }

    /// Monthly or yearly.
    #[must_use]
    pub const fn period(&self) -> BudgetPeriod {
        self.period
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, for monthly periods.
    #[must_use]
    pub const fn month(&self) -> Option<u32> {
        self.month
    }

    /// Transaction window for this period.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_month_window_is_half_open() {
        let window = DateWindow::month(2024, 6).unwrap();

        assert_eq!(window.start, utc(2024, 6, 1));
        assert_eq!(window.end, utc(2024, 7, 1));
        assert!(window.contains(utc(2024, 6, 1)));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap()));
        assert!(!window.contains(utc(2024, 7, 1)));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_december_window_rolls_into_next_year() {
        let window = DateWindow::month(2024, 12).unwrap();

        assert_eq!(window.start, utc(2024, 12, 1));
        assert_eq!(window.end, utc(2025, 1, 1));
    }

    #[test]
    fn test_year_window() {
        let window = DateWindow::year(2024).unwrap();

        assert_eq!(window.start, utc(2024, 1, 1));
        assert_eq!(window.end, utc(2025, 1, 1));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap()));
        assert!(!window.contains(utc(2025, 1, 1)));
    }

    #[rstest]
    #[case(None, None, None, BudgetPeriod::Monthly, 2024, Some(6))]
    #[case(Some("monthly"), Some(2023), Some(2), BudgetPeriod::Monthly, 2023, Some(2))]
    #[case(Some("yearly"), Some(2022), Some(2), BudgetPeriod::Yearly, 2022, None)]
    #[case(Some("yearly"), None, None, BudgetPeriod::Yearly, 2024, None)]
    #[case(Some("quarterly"), None, None, BudgetPeriod::Monthly, 2024, Some(6))]
    #[case(Some("bogus"), Some(2020), Some(3), BudgetPeriod::Monthly, 2020, Some(3))]
    fn test_resolve(
        #[case] period: Option<&str>,
        #[case] year: Option<i32>,
        #[case] month: Option<u32>,
        #[case] expected_period: BudgetPeriod,
        #[case] expected_year: i32,
        #[case] expected_month: Option<u32>,
    ) {
        let resolved = ReportingPeriod::resolve(period, year, month, today()).unwrap();

        assert_eq!(resolved.period(), expected_period);
        assert_eq!(resolved.year(), expected_year);
        assert_eq!(resolved.month(), expected_month);
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        assert!(matches!(
            ReportingPeriod::resolve(Some("monthly"), Some(2024), Some(0), today()),
            Err(BudgetError::InvalidMonth(0))
        ));
        assert!(matches!(
            ReportingPeriod::resolve(Some("yearly"), Some(10_000), None, today()),
            Err(BudgetError::InvalidYear(10_000))
        ));
    }
}
