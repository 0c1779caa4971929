// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Civil Calendar ⇄ Julian Day Conversion
//!
//! Bidirectional mapping between a proleptic Gregorian calendar date-time
//! and the continuous Julian Day axis, via the standard Gregorian
//! Julian-Day algorithm (*Jean Meeus — Astronomical Algorithms (2nd ed.
//! 1998)*, ch. 7).
//!
//! ## Contract
//!
//! * [`CivilDateTime::new`] validates every field **before** any
//!   computation and never clamps; the supported year range is
//!   [`MIN_YEAR`]`..=`[`MAX_YEAR`].
//! * [`Time::<JD>::from_civil`] and [`Time::<JD>::to_civil`] are mutual
//!   inverses to well under one second of time for every valid input.
//!
//! ## Calendar model
//!
//! The century correction term is applied unconditionally: dates before
//! the historical 1582 reform are interpreted on the **proleptic
//! Gregorian** calendar, with no Julian/Gregorian cutover.  Callers that
//! need historical-calendar semantics must convert externally; bolting a
//! cutover onto this axis would silently change every downstream
//! day-count.

use qtty::Days;
use thiserror::Error;

use super::instant::Time;
use super::scales::JD;

/// Earliest supported civil year.
pub const MIN_YEAR: i32 = -4712;

/// Latest supported civil year.
pub const MAX_YEAR: i32 = 9999;

/// Rejected calendar-field input.
///
/// Raised synchronously by [`CivilDateTime::new`] before any conversion
/// runs; fields are never silently clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalendarError {
    #[error("year {0} outside supported range -4712..=9999")]
    YearOutOfRange(i32),
    #[error("month {0} outside 1..=12")]
    MonthOutOfRange(u32),
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
    #[error("hour {0} outside 0..=23")]
    HourOutOfRange(u32),
    #[error("minute {0} outside 0..=59")]
    MinuteOutOfRange(u32),
    #[error("second {0} not finite or outside 0.0..60.0")]
    SecondOutOfRange(f64),
}

/// A validated proleptic-Gregorian calendar date with sub-second precision.
///
/// Construction goes through [`CivilDateTime::new`], so a value of this
/// type always holds an in-range date; the conversion to [`Time<JD>`] is
/// therefore infallible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
}

impl CivilDateTime {
    /// Validate and build a calendar date-time.
    ///
    /// # Examples
    ///
    /// ```
    /// use solunar::CivilDateTime;
    ///
    /// let d = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap();
    /// assert_eq!(d.year(), 2000);
    /// assert!(CivilDateTime::new(2023, 2, 29, 0, 0, 0.0).is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange(month));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(CalendarError::DayOutOfRange { year, month, day });
        }
        if hour > 23 {
            return Err(CalendarError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(CalendarError::MinuteOutOfRange(minute));
        }
        if !second.is_finite() || !(0.0..60.0).contains(&second) {
            return Err(CalendarError::SecondOutOfRange(second));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight at the start of a civil day.
    pub fn at_midnight(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub const fn hour(&self) -> u32 {
        self.hour
    }

    pub const fn minute(&self) -> u32 {
        self.minute
    }

    pub const fn second(&self) -> f64 {
        self.second
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

/// Proleptic-Gregorian leap-year rule: divisible by 4, except centuries
/// unless divisible by 400.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month of the proleptic Gregorian calendar.
///
/// `month` must be in `1..=12`.
#[inline]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month validated to 1..=12"),
    }
}

/// Gregorian calendar → Julian Day (Meeus eq. 7.1, Gregorian branch only).
///
/// January and February are shifted into the previous year with 12 added
/// to the month; the century correction `2 − ⌊y/100⌋ + ⌊y/100⌋/4` is
/// applied unconditionally (proleptic Gregorian).
pub(crate) fn civil_to_jd(civil: &CivilDateTime) -> f64 {
    let mut y = civil.year as f64;
    let mut m = civil.month as f64;
    if civil.month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day_frac = civil.day as f64
        + (civil.hour as f64 * 3_600.0 + civil.minute as f64 * 60.0 + civil.second) / 86_400.0;
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Julian Day → Gregorian calendar (Meeus ch. 7 inverse, Gregorian branch
/// only), undoing the forward transform via floor-division steps.
pub(crate) fn jd_to_civil(jd: f64) -> CivilDateTime {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let total_seconds = f * 86_400.0;
    let hour = (total_seconds / 3_600.0).floor() as u32;
    let minute = ((total_seconds % 3_600.0) / 60.0).floor() as u32;
    let second = total_seconds % 60.0;

    CivilDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

// ── Time<JD> convenience methods ──────────────────────────────────────────

impl Time<JD> {
    /// Julian Day of a validated civil date-time.
    ///
    /// # Examples
    ///
    /// ```
    /// use solunar::{CivilDateTime, JulianDate};
    ///
    /// let d = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap();
    /// let jd = JulianDate::from_civil(&d);
    /// assert_eq!(jd.value(), 2_451_545.0);
    /// ```
    #[inline]
    pub fn from_civil(civil: &CivilDateTime) -> Self {
        Self::from_days(Days::new(civil_to_jd(civil)))
    }

    /// Civil date-time of this Julian Day.
    ///
    /// Total inverse of [`Time::<JD>::from_civil`] for any value it
    /// produced; the round-trip error stays below one second of time.
    #[inline]
    pub fn to_civil(&self) -> CivilDateTime {
        jd_to_civil(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn j2000_reference_epoch() {
        let d = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_eq!(Time::<JD>::from_civil(&d).value(), 2_451_545.0);
    }

    #[test]
    fn known_epochs() {
        // 1987-01-27 00:00 and 1999-01-01 00:00 (Meeus ch. 7 samples).
        let d = CivilDateTime::at_midnight(1987, 1, 27).unwrap();
        assert_eq!(Time::<JD>::from_civil(&d).value(), 2_446_822.5);

        let d = CivilDateTime::at_midnight(1999, 1, 1).unwrap();
        assert_eq!(Time::<JD>::from_civil(&d).value(), 2_451_179.5);
    }

    #[test]
    fn inverse_of_j2000() {
        let civil = Time::<JD>::new(2_451_545.0).to_civil();
        assert_eq!(civil.year(), 2000);
        assert_eq!(civil.month(), 1);
        assert_eq!(civil.day(), 1);
        assert_eq!(civil.hour(), 12);
        assert_eq!(civil.minute(), 0);
        assert!(civil.second() < 1e-6);
    }

    #[test]
    fn roundtrip_stays_below_one_second() {
        // 1.16e-5 day ≈ 1 s of time.
        let samples = [
            (-4712, 1, 1, 0, 0, 0.0),
            (-1000, 7, 15, 6, 30, 12.25),
            (1, 12, 31, 23, 59, 59.5),
            (1582, 10, 15, 0, 0, 0.0),
            (1900, 2, 28, 18, 45, 30.0),
            (2000, 2, 29, 12, 0, 0.0),
            (2024, 6, 1, 3, 4, 5.678),
            (9999, 12, 31, 23, 0, 0.0),
        ];
        for (y, mo, d, h, mi, s) in samples {
            let civil = CivilDateTime::new(y, mo, d, h, mi, s).unwrap();
            let jd = Time::<JD>::from_civil(&civil);
            let back = Time::<JD>::from_civil(&jd.to_civil());
            assert!(
                (back - jd).abs() < Days::new(1.16e-5),
                "roundtrip drift for {civil}: {} days",
                (back - jd).abs()
            );
        }
    }

    #[test]
    fn monotonic_in_calendar_order() {
        let mut prev = f64::NEG_INFINITY;
        for month in 1..=12u32 {
            for day in 1..=days_in_month(2025, month) {
                let civil = CivilDateTime::at_midnight(2025, month, day).unwrap();
                let jd = Time::<JD>::from_civil(&civil).value();
                assert!(jd > prev, "{civil} does not advance the day count");
                prev = jd;
            }
        }
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            CivilDateTime::new(10_000, 1, 1, 0, 0, 0.0),
            Err(CalendarError::YearOutOfRange(10_000))
        );
        assert_eq!(
            CivilDateTime::new(2024, 13, 1, 0, 0, 0.0),
            Err(CalendarError::MonthOutOfRange(13))
        );
        assert_eq!(
            CivilDateTime::new(2023, 2, 29, 0, 0, 0.0),
            Err(CalendarError::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert_eq!(
            CivilDateTime::new(2024, 1, 1, 24, 0, 0.0),
            Err(CalendarError::HourOutOfRange(24))
        );
        assert_eq!(
            CivilDateTime::new(2024, 1, 1, 0, 60, 0.0),
            Err(CalendarError::MinuteOutOfRange(60))
        );
        assert!(CivilDateTime::new(2024, 1, 1, 0, 0, 60.0).is_err());
        assert!(CivilDateTime::new(2024, 1, 1, 0, 0, f64::NAN).is_err());
    }

    #[test]
    fn agrees_with_chrono_proleptic_gregorian() {
        // chrono's calendar is proleptic Gregorian as well, so the two
        // paths onto the JD axis must coincide.
        let cases = [
            (1000, 3, 1, 0, 0, 0),
            (1582, 10, 4, 12, 0, 0),
            (1970, 1, 1, 0, 0, 0),
            (2025, 8, 7, 9, 30, 15),
        ];
        for (y, mo, d, h, mi, s) in cases {
            let datetime = chrono::Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
            let via_chrono = Time::<JD>::from_utc(datetime);
            let civil = CivilDateTime::new(y, mo, d, h, mi, s as f64).unwrap();
            let via_civil = Time::<JD>::from_civil(&civil);
            assert!(
                (via_chrono - via_civil).abs() < Days::new(1e-9),
                "{civil}: chrono {} vs civil {}",
                via_chrono,
                via_civil
            );
        }
    }

    #[test]
    fn display_formats() {
        let d = CivilDateTime::new(2024, 1, 15, 0, 0, 0.0).unwrap();
        assert_eq!(d.to_string(), "2024-01-15T00:00:00");
        let d = CivilDateTime::new(2024, 1, 15, 12, 30, 45.123).unwrap();
        assert!(d.to_string().contains("12:30:"), "got: {d}");
    }
}
