use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A Gregorian calendar date between year 1 and year 9999.
///
/// Field order makes the derived ordering calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Creates a date, failing if it does not exist in the calendar
    pub fn new(year: u32, month: u32, day: u32) -> Result<Self> {
        if !(1..=9999).contains(&year)
            || !(1..=12).contains(&month)
            || day < 1
            || day > days_in_month(year, month)
        {
            return Err(Error::InvalidDate(format!(
                "{:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        })
    }

    pub fn year(&self) -> u32 {
        self.year as u32
    }

    pub fn month(&self) -> u32 {
        self.month as u32
    }

    pub fn day(&self) -> u32 {
        self.day as u32
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 if leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Parses dates in the form `YYYY-MM-DD`
impl FromStr for Date {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidDate(input.to_string());
        let chars: Vec<char> = input.chars().collect();
        if chars.len() != 10 || chars[4] != '-' || chars[7] != '-' {
            return Err(invalid());
        }
        let number = |from: usize, to: usize| -> Result<u32> {
            chars[from..to].iter().try_fold(0, |acc, c| {
                c.to_digit(10).map(|d| acc * 10 + d).ok_or_else(invalid)
            })
        };
        Date::new(number(0, 4)?, number(5, 7)?, number(8, 10)?).map_err(|_| invalid())
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::{Date, days_in_month, leap_year};
    use crate::error::Result;

    #[test]
    fn test_new_valid() -> Result<()> {
        for (y, m, d) in [(1999, 1, 31), (2000, 2, 29), (1, 1, 1), (9999, 12, 31)] {
            let date = Date::new(y, m, d)?;
            assert_eq!((date.year(), date.month(), date.day()), (y, m, d));
        }
        Ok(())
    }

    #[test]
    fn test_new_invalid() {
        for (y, m, d) in [
            (0, 12, 31),
            (10000, 1, 1),
            (1999, 12, 0),
            (1999, 12, 32),
            (1999, 2, 29),
            (1900, 2, 29),
            (1999, 13, 1),
            (1999, 4, 31),
        ] {
            assert!(Date::new(y, m, d).is_err(), "{}-{}-{} should be invalid", y, m, d);
        }
    }

    #[test]
    fn test_parse() -> Result<()> {
        assert_eq!("1999-12-31".parse::<Date>()?, Date::new(1999, 12, 31)?);
        assert_eq!("0001-01-01".parse::<Date>()?, Date::new(1, 1, 1)?);
        for input in ["1999-12-1", "1999-12-31 ", " 1999-12-31", "1999-12-32", "1999/12/31", "19a9-12-31"] {
            assert!(input.parse::<Date>().is_err(), "{:?} should not parse", input);
        }
        Ok(())
    }

    #[test]
    fn test_calendar_rules() {
        assert_eq!(days_in_month(1999, 1), 31);
        assert_eq!(days_in_month(1999, 2), 28);
        assert_eq!(days_in_month(1999, 4), 30);
        assert_eq!(days_in_month(2000, 2), 29);
        assert!(!leap_year(1999));
        assert!(leap_year(1996));
        assert!(!leap_year(1900));
        assert!(leap_year(2000));
    }

    #[test]
    fn test_order_and_display() -> Result<()> {
        let a = Date::new(1999, 12, 31)?;
        let b = Date::new(2000, 1, 1)?;
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a, Date::new(1999, 12, 31)?);
        assert_eq!(a.to_string(), "1999-12-31");
        assert_eq!(Date::new(33, 2, 3)?.to_string(), "0033-02-03");
        Ok(())
    }
}
