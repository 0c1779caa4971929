// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunar Conjunction (New Moon) Estimator
//!
//! Closed-form approximation of new-moon instants from the truncated
//! periodic series of *Jean Meeus — Astronomical Algorithms (2nd ed.
//! 1998)*, ch. 49: a degree-4 polynomial mean phase plus the largest
//! periodic corrections in the Sun's and Moon's mean anomalies, the
//! Moon's argument of latitude, and the node longitude.
//!
//! This is the lunar-cycle analogue of [`crate::sun`]: a truncated
//! series, not an iterative solver.  Keeping only the dominant terms
//! leaves an error of a few minutes for recent centuries, degrading for
//! epochs far from the lunation epoch — fine for month-boundary dating,
//! nothing more.
//!
//! ## Quick Example
//! ```rust
//! use solunar::lunation::new_moons_in_year;
//!
//! let moons = new_moons_in_year(2024).unwrap();
//! assert_eq!(moons.len(), 12);
//! ```

use super::calendar::{CalendarError, CivilDateTime, MAX_YEAR, MIN_YEAR};
use super::instant::Time;
use super::scales::JD;

/// Mean length of the synodic month, days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// Mean number of lunations per Julian year.
pub const LUNATIONS_PER_YEAR: f64 = 12.3685;

/// Candidates generated per requested year before the civil-year filter.
const CANDIDATES_PER_YEAR: usize = 13;

/// An approximated new-moon instant.
///
/// `lunation` counts synodic months from the lunation epoch (the first
/// new moon of 2000 is lunation 0).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LunarConjunction {
    /// Lunation number k relative to the 2000-01-06 epoch.
    pub lunation: i64,
    /// Approximate conjunction instant.
    pub time: Time<JD>,
    /// The instant as a civil date-time.
    pub civil: CivilDateTime,
}

/// Lunation number of the mean new moon at (or just before) the start of
/// a civil year.
#[inline]
pub fn mean_lunation_number(year: i32) -> i64 {
    ((year as f64 - 2000.0) * LUNATIONS_PER_YEAR).floor() as i64
}

/// Approximate instant of new moon number `k` (Meeus eq. 49.1 with the
/// dominant periodic corrections).
pub fn conjunction_time(k: i64) -> Time<JD> {
    let kf = k as f64;
    // Centuries from the lunation epoch.
    let t = kf / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Mean phase of the new moon.
    let mean = 2_451_550.097_66 + SYNODIC_MONTH_DAYS * kf + 0.000_154_37 * t2
        - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    // Eccentricity damping applied to the solar terms.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    // Sun's mean anomaly (radians).
    let m = (2.5534 + 29.105_356_70 * kf - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    // Moon's mean anomaly.
    let mp = (201.5643 + 385.816_935_28 * kf + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    // Moon's argument of latitude.
    let f = (160.7108 + 390.670_502_84 * kf - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    // Longitude of the ascending node.
    let omega = (124.7746 - 1.563_755_88 * kf + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin()
        + 0.172_41 * e * m.sin()
        + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        - 0.000_17 * omega.sin();

    Time::<JD>::new(mean + correction)
}

/// Ordered new-moon instants whose civil date falls in `year`.
///
/// Thirteen candidates are generated from the mean lunation number of the
/// year start, then filtered by resolved civil year; a civil year holds
/// 12 or 13 lunations, never more or fewer.  Pure function of `year` —
/// recomputation is idempotent.
pub fn new_moons_in_year(year: i32) -> Result<Vec<LunarConjunction>, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::YearOutOfRange(year));
    }

    let k0 = mean_lunation_number(year);
    let mut events = Vec::with_capacity(CANDIDATES_PER_YEAR);
    for k in k0..k0 + CANDIDATES_PER_YEAR as i64 {
        let time = conjunction_time(k);
        let civil = time.to_civil();
        if civil.year() == year {
            events.push(LunarConjunction { lunation: k, time, civil });
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Days;

    #[test]
    fn lunation_epoch_is_first_new_moon_of_2000() {
        assert_eq!(mean_lunation_number(2000), 0);
        // 2000-01-06 18:14 UTC ≈ JD 2451550.260.
        let t = conjunction_time(0);
        assert!(
            (t - Time::<JD>::new(2_451_550.26)).abs() < Days::new(0.01),
            "lunation 0 at {t}"
        );
        let civil = t.to_civil();
        assert_eq!((civil.year(), civil.month(), civil.day()), (2000, 1, 6));
    }

    #[test]
    fn meeus_example_49a() {
        // New moon of 1977 February: k = -283, JDE = 2443192.65118
        // (full series).  The truncation here stays within minutes.
        let t = conjunction_time(-283);
        assert!(
            (t - Time::<JD>::new(2_443_192.651_18)).abs() < Days::new(0.005),
            "k = -283 at {t}"
        );
        let civil = t.to_civil();
        assert_eq!((civil.year(), civil.month(), civil.day()), (1977, 2, 18));
    }

    #[test]
    fn year_2024_filters_to_twelve() {
        let moons = new_moons_in_year(2024).unwrap();
        assert_eq!(moons.len(), 12);
        for event in &moons {
            assert_eq!(event.civil.year(), 2024);
        }
        assert_eq!(
            (moons[0].civil.month(), moons[0].civil.day()),
            (1, 11),
            "first 2024 new moon should be January 11"
        );
        for pair in moons.windows(2) {
            let gap = pair[1].time - pair[0].time;
            assert!(
                (Days::new(29.0)..Days::new(30.0)).contains(&gap),
                "lunation gap {gap}"
            );
        }
    }

    #[test]
    fn year_2000_holds_thirteen() {
        let moons = new_moons_in_year(2000).unwrap();
        assert_eq!(moons.len(), 13);
        assert_eq!(moons.first().unwrap().lunation, 0);
        let last = moons.last().unwrap();
        assert_eq!((last.civil.month(), last.civil.day()), (12, 25));
    }

    #[test]
    fn count_is_always_twelve_or_thirteen() {
        for year in (1900..=2100).step_by(7) {
            let n = new_moons_in_year(year).unwrap().len();
            assert!(
                n == 12 || n == 13,
                "year {year} produced {n} filtered lunations"
            );
        }
    }

    #[test]
    fn events_are_ordered() {
        let moons = new_moons_in_year(2025).unwrap();
        for pair in moons.windows(2) {
            assert!(pair[0].time < pair[1].time);
            assert_eq!(pair[1].lunation, pair[0].lunation + 1);
        }
    }

    #[test]
    fn rejects_out_of_range_year() {
        assert!(new_moons_in_year(10_000).is_err());
        assert!(new_moons_in_year(-5000).is_err());
    }
}
