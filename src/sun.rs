// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar Ecliptic Longitude
//!
//! Truncated analytical series for the Sun's apparent ecliptic longitude
//! and its angular speed, after *Jean Meeus — Astronomical Algorithms
//! (2nd ed. 1998)*, ch. 25 (lower-accuracy method).
//!
//! The mean longitude and mean anomaly are low-order polynomials in Julian
//! centuries from J2000; the equation of center adds three sine terms of
//! the mean anomaly with century-dependent coefficients, and a small fixed
//! correction moves the geometric longitude to the apparent place.
//!
//! ## Accuracy window
//!
//! Within a few centuries of J2000 the longitude is good to roughly an
//! arcminute — sufficient for day-level solar-term dating, and explicitly
//! **not** ephemeris-grade.  No VSOP87-class precision is claimed, here or
//! in the tests.
//!
//! ## Quick Example
//! ```rust
//! use solunar::{sun, JulianDate};
//!
//! let lon = sun::apparent_longitude(JulianDate::J2000);
//! assert!((0.0..360.0).contains(&lon));
//! ```

use super::instant::Time;
use super::scales::JD;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Raw series output is not range-bound; every consumer normalizes before
/// comparison or storage.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Signed arc from `from_deg` to `to_deg`, wrapped into `(-180, 180]`.
///
/// Keeps crossing searches free of wraparound sign errors at the 0°/360°
/// seam.
#[inline]
pub fn signed_arc(from_deg: f64, to_deg: f64) -> f64 {
    let d = (to_deg - from_deg).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Apparent ecliptic longitude of the Sun, in degrees `[0, 360)`.
pub fn apparent_longitude(jd: Time<JD>) -> f64 {
    let t = jd.julian_centuries().value();

    // Geometric mean longitude of the Sun (degrees).
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    // Mean anomaly of the Sun (radians).
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();

    // Equation of center.
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    // Nutation in longitude and aberration, to the apparent place.
    let omega = (125.04 - 1934.136 * t).to_radians();
    normalize_degrees(l0 + c - 0.00569 - 0.00478 * omega.sin())
}

/// Apparent angular speed of the Sun along the ecliptic, degrees per day.
///
/// Analytic derivative of the mean longitude and equation of center from
/// [`apparent_longitude`]; the tiny aberration-term derivative is dropped.
/// Strictly positive for any epoch in the supported window (the Sun never
/// stations on the ecliptic), which makes it safe as a Newton step
/// denominator in [`crate::solar_term`].
pub fn angular_speed(jd: Time<JD>) -> f64 {
    let t = jd.julian_centuries().value();

    // Mean anomaly and the per-century rates (degrees, degrees/century).
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let dm = 35999.05029 - 2.0 * 0.0001537 * t;
    let dl0 = 36000.76983 + 2.0 * 0.0003032 * t;

    let dc = (-0.004817 - 2.0 * 0.000014 * t) * m.sin()
        + (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.cos() * dm.to_radians()
        - 0.000101 * (2.0 * m).sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).cos() * 2.0 * dm.to_radians()
        + 0.000289 * (3.0 * m).cos() * 3.0 * dm.to_radians();

    (dl0 + dc) / 36_525.0
}
