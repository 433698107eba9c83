//! National-ID birth date check.
//!
//! An ID is 11 digits; the first six encode the holder's birth date as `YYMMDD`.
//! Two-digit years above 50 belong to the 1900s, the rest to the 2000s. The day
//! must exist in that month of that year, so `29` in February only passes on
//! leap years.

use chrono::NaiveDate;
use thiserror::Error;

/// Number of digits in a national ID.
pub const NATIONAL_ID_LEN: usize = 11;

/// Why a national ID failed the date check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NationalIdError {
    /// Not exactly 11 ASCII digits.
    #[error("Invalid format")]
    Format,

    /// Month outside `1..=12`.
    #[error("Invalid month ({month:02})")]
    Month { month: u32 },

    /// Day outside the real day count of the month.
    #[error("Invalid day ({day}) for {month:02}/{year}")]
    Day { day: u32, month: u32, year: i32 },
}

/// Maps a two-digit year onto a full year.
#[must_use]
pub const fn expand_year(yy: u32) -> i32 {
    if yy > 50 {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    }
}

/// Number of days in `month` of `year`, or `None` if the month is out of range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Decodes the birth date embedded in a national ID.
///
/// # Errors
/// Returns [`NationalIdError::Format`] unless `id` is exactly 11 digits, then
/// [`NationalIdError::Month`] or [`NationalIdError::Day`] when the `YYMMDD`
/// prefix is not a real calendar date.
pub fn check(id: &str) -> Result<NaiveDate, NationalIdError> {
    if id.len() != NATIONAL_ID_LEN || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NationalIdError::Format);
    }

    let pair = |at: usize| -> Result<u32, NationalIdError> {
        id.get(at..at + 2)
            .and_then(|s| s.parse().ok())
            .ok_or(NationalIdError::Format)
    };
    let yy = pair(0)?;
    let month = pair(2)?;
    let day = pair(4)?;
    let year = expand_year(yy);

    let Some(max_day) = days_in_month(year, month) else {
        return Err(NationalIdError::Month { month });
    };
    if day < 1 || day > max_day {
        return Err(NationalIdError::Day { day, month, year });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(NationalIdError::Day { day, month, year })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_leap_day_depends_on_year() {
        // 2001 is not a leap year
        assert_eq!(
            check("01022912345"),
            Err(NationalIdError::Day {
                day: 29,
                month: 2,
                year: 2001
            })
        );
        // 2004 is
        assert_eq!(
            check("04022912345").unwrap(),
            NaiveDate::from_ymd_opt(2004, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_century_pivot() {
        assert_eq!(expand_year(50), 2050);
        assert_eq!(expand_year(51), 1951);
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(check("99123112345").unwrap().year(), 1999);
        assert_eq!(check("50010112345").unwrap().year(), 2050);
    }

    #[test]
    fn test_month_out_of_range() {
        assert_eq!(check("90000112345"), Err(NationalIdError::Month { month: 0 }));
        assert_eq!(check("90130112345"), Err(NationalIdError::Month { month: 13 }));
        assert_eq!(
            NationalIdError::Month { month: 0 }.to_string(),
            "Invalid month (00)"
        );
    }

    #[test]
    fn test_day_out_of_range() {
        assert!(check("90043112345").is_err()); // April has 30 days
        assert!(check("90043012345").is_ok());
        assert!(check("90010012345").is_err());
        assert_eq!(
            check("90043112345").unwrap_err().to_string(),
            "Invalid day (31) for 04/1990"
        );
    }

    #[test]
    fn test_1900_leap_rules() {
        // 1900 is outside the pivot window, 1996 is a leap year, 1997 is not
        assert!(check("96022912345").is_ok());
        assert!(check("97022912345").is_err());
        // 2000 is a leap year even though it is divisible by 100
        assert!(check("00022912345").is_ok());
    }

    #[test]
    fn test_format_rejected_regardless_of_date() {
        for id in ["", "0402291234", "040229123456", "04022912a45", "０４０２２９１２３４５", "04 0229 1234"] {
            assert_eq!(check(id), Err(NationalIdError::Format), "{id:?}");
        }
    }

    #[test]
    fn test_every_month_length() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, days) in expected.iter().enumerate() {
            let month = u32::try_from(i + 1).unwrap();
            assert_eq!(days_in_month(2023, month), Some(*days));
        }
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }
}
