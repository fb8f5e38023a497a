// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Age calculation and registration age gating.
//!
//! Registration is restricted to adults. Ages are computed with
//! calendar-correct anniversary logic: a year counts only once the
//! birthday has occurred in the reference year.

use crate::error::DomainError;
use time::Date;

/// Minimum age required to register.
pub const ADULT_AGE: u16 = 18;

/// Parses a birth date from an ISO 8601 string (e.g. `2008-06-15`).
///
/// # Arguments
///
/// * `date_string` - The date string to parse
///
/// # Errors
///
/// Returns an error if the string is empty or fails to parse.
pub fn parse_birth_date(date_string: &str) -> Result<Date, DomainError> {
    if date_string.is_empty() {
        return Err(DomainError::DateParseError {
            date_string: String::new(),
            error: "Birth date is empty".to_string(),
        });
    }

    Date::parse(
        date_string,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Calculates the age in whole years as of a reference date.
///
/// A birthday on February 29 counts from March 1 in common years.
/// Birth dates in the future yield 0.
///
/// # Arguments
///
/// * `date_of_birth` - The birth date
/// * `today` - The reference date
#[must_use]
pub fn calculate_age(date_of_birth: Date, today: Date) -> u16 {
    if today < date_of_birth {
        return 0;
    }

    let years_diff: i32 = today.year() - date_of_birth.year();

    let birthday_reached: bool = (today.month() > date_of_birth.month())
        || (today.month() == date_of_birth.month() && today.day() >= date_of_birth.day());

    if birthday_reached {
        u16::try_from(years_diff).unwrap_or(0)
    } else {
        u16::try_from((years_diff - 1).max(0)).unwrap_or(0)
    }
}

/// Validates that a birth date satisfies the adult age gate.
///
/// Returns `None` when the person is at least 18 years old as of `today`.
/// Otherwise returns a user-facing message: the "almost eligible"
/// phrasing when exactly one year remains, and the remaining-years
/// phrasing otherwise.
///
/// # Arguments
///
/// * `date_of_birth` - The birth date
/// * `today` - The reference date
#[must_use]
pub fn validate_age(date_of_birth: Date, today: Date) -> Option<String> {
    let age: u16 = calculate_age(date_of_birth, today);

    if age >= ADULT_AGE {
        return None;
    }

    let remaining: u16 = ADULT_AGE - age;
    if remaining == 1 {
        Some("もうすぐ18歳ですね。18歳になったらご登録いただけます。".to_string())
    } else {
        Some(format!(
            "18歳になるまであと{remaining}年です。18歳以上の方のみご登録いただけます。"
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_birth_date_valid() {
        let parsed: Date = parse_birth_date("2008-06-15").unwrap();
        assert_eq!(parsed, date!(2008 - 06 - 15));
    }

    #[test]
    fn test_parse_birth_date_empty() {
        let result: Result<Date, DomainError> = parse_birth_date("");
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_parse_birth_date_garbage() {
        let result: Result<Date, DomainError> = parse_birth_date("not-a-date");
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_calculate_age_birthday_passed() {
        assert_eq!(
            calculate_age(date!(1990 - 01 - 01), date!(2024 - 06 - 15)),
            34
        );
    }

    #[test]
    fn test_calculate_age_birthday_not_yet() {
        assert_eq!(
            calculate_age(date!(1990 - 12 - 31), date!(2024 - 06 - 15)),
            33
        );
    }

    #[test]
    fn test_calculate_age_birthday_today() {
        assert_eq!(
            calculate_age(date!(1990 - 06 - 15), date!(2024 - 06 - 15)),
            34
        );
    }

    #[test]
    fn test_calculate_age_same_month_day_not_reached() {
        assert_eq!(
            calculate_age(date!(1990 - 06 - 20), date!(2024 - 06 - 15)),
            33
        );
    }

    #[test]
    fn test_calculate_age_leap_year_birthday() {
        assert_eq!(
            calculate_age(date!(1992 - 02 - 29), date!(2024 - 06 - 15)),
            32
        );
    }

    #[test]
    fn test_calculate_age_future_birth_date() {
        assert_eq!(calculate_age(date!(2030 - 01 - 01), date!(2024 - 06 - 15)), 0);
    }

    #[test]
    fn test_validate_age_exactly_eighteen() {
        assert_eq!(
            validate_age(date!(2008 - 06 - 15), date!(2026 - 06 - 15)),
            None
        );
    }

    #[test]
    fn test_validate_age_one_day_short_uses_almost_phrasing() {
        let message: String =
            validate_age(date!(2008 - 06 - 16), date!(2026 - 06 - 15)).unwrap();
        assert!(message.contains("もうすぐ"), "unexpected message: {message}");
    }

    #[test]
    fn test_validate_age_newborn_reports_remaining_years() {
        let message: String =
            validate_age(date!(2026 - 01 - 01), date!(2026 - 06 - 15)).unwrap();
        assert!(message.contains("18年"), "unexpected message: {message}");
    }

    #[test]
    fn test_validate_age_adult_far_past() {
        assert_eq!(
            validate_age(date!(1980 - 03 - 02), date!(2026 - 06 - 15)),
            None
        );
    }
}
