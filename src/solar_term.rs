// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar-Term Crossing Search
//!
//! Finds the instant the Sun's apparent ecliptic longitude crosses a
//! target value, and builds the table of the 24 solar terms (one per 15°
//! of longitude) for a calendar year.
//!
//! ## Algorithm
//!
//! Safeguarded Newton iteration on the wrapped angle: starting from
//! January 1 of the requested year, the signed arc from the current
//! longitude to the target — wrapped into `(-180, 180]` so the 0°/360°
//! seam cannot flip the sign — is divided by the Sun's angular speed to
//! get a time step.  Five iterations typically land within the 1e-4°
//! tolerance; a fixed cap of 10 bounds the worst case.
//!
//! ## Convergence reporting
//!
//! Hitting the iteration cap is not an error: the best-available instant
//! is still returned, and [`LongitudeCrossing::residual_deg`] /
//! [`LongitudeCrossing::iterations`] always carry the final state, so a
//! caller that needs guaranteed precision checks [`LongitudeCrossing::converged`]
//! instead of trusting the estimate blindly.
//!
//! ## Seed and year boundaries
//!
//! The iteration converges to the crossing *nearest the seed* in
//! signed-angle terms.  Targets more than half a turn from the Sun's
//! early-January position therefore resolve into the adjacent civil year
//! (the 270° winter-solstice target for `year` lands in December of
//! `year - 1`); each event's [`SolarTermEvent::civil`] field states the
//! resolved date.

use qtty::Days;

use super::calendar::{CalendarError, CivilDateTime};
use super::instant::Time;
use super::scales::JD;
use super::sun;

/// Number of solar terms in a full cycle of ecliptic longitude.
pub const TERM_COUNT: usize = 24;

/// Longitude spacing between consecutive terms, degrees.
pub const TERM_STEP_DEG: f64 = 15.0;

/// Target longitude of term index 0 (the winter solstice anchors the
/// cycle in the source convention).
pub const FIRST_TERM_LONGITUDE_DEG: f64 = 270.0;

/// Angular convergence tolerance, degrees (≈ 9 seconds of time).
pub const ANGULAR_TOLERANCE_DEG: f64 = 1e-4;

/// Iteration cap for the Newton loop.
pub const MAX_ITERATIONS: u32 = 10;

/// Target ecliptic longitude of a solar-term index, degrees `[0, 360)`.
///
/// `index` runs 0..24; index 0 is 270°, each step adds 15°.
#[inline]
pub fn target_longitude(index: usize) -> f64 {
    sun::normalize_degrees(FIRST_TERM_LONGITUDE_DEG + TERM_STEP_DEG * index as f64)
}

/// Resolved longitude crossing with explicit convergence state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LongitudeCrossing {
    /// Best-available crossing instant.
    pub time: Time<JD>,
    /// Signed arc from the resolved longitude to the target, degrees.
    pub residual_deg: f64,
    /// Newton iterations consumed.
    pub iterations: u32,
}

impl LongitudeCrossing {
    /// Whether the residual fell below [`ANGULAR_TOLERANCE_DEG`].
    #[inline]
    pub fn converged(&self) -> bool {
        self.residual_deg.abs() < ANGULAR_TOLERANCE_DEG
    }
}

/// One entry of a year's solar-term table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolarTermEvent {
    /// Term index, 0..24.
    pub index: usize,
    /// Target longitude for this index, degrees `[0, 360)`.
    pub target_longitude_deg: f64,
    /// Resolved crossing instant.
    pub time: Time<JD>,
    /// Resolved instant as a civil date-time.
    pub civil: CivilDateTime,
    /// Signed arc from the resolved longitude to the target, degrees.
    pub residual_deg: f64,
    /// Newton iterations consumed.
    pub iterations: u32,
}

impl SolarTermEvent {
    /// Whether the residual fell below [`ANGULAR_TOLERANCE_DEG`].
    #[inline]
    pub fn converged(&self) -> bool {
        self.residual_deg.abs() < ANGULAR_TOLERANCE_DEG
    }
}

/// Find the instant the Sun's apparent longitude crosses
/// `target_longitude_deg`, seeded at January 1 of `year`.
///
/// The target is normalized into `[0, 360)` first.  Errors only on an
/// out-of-range `year`; non-convergence is reported through the returned
/// [`LongitudeCrossing`], never raised.
///
/// # Examples
///
/// ```
/// use solunar::solar_term::find_crossing;
///
/// // Vernal equinox: longitude 0°.
/// let crossing = find_crossing(2025, 0.0).unwrap();
/// assert!(crossing.converged());
/// let civil = crossing.time.to_civil();
/// assert_eq!((civil.year(), civil.month()), (2025, 3));
/// ```
pub fn find_crossing(
    year: i32,
    target_longitude_deg: f64,
) -> Result<LongitudeCrossing, CalendarError> {
    let seed = CivilDateTime::at_midnight(year, 1, 1)?;
    let target = sun::normalize_degrees(target_longitude_deg);

    let mut time = Time::<JD>::from_civil(&seed);
    let mut residual = sun::signed_arc(sun::apparent_longitude(time), target);
    let mut iterations = 0;

    while residual.abs() >= ANGULAR_TOLERANCE_DEG && iterations < MAX_ITERATIONS {
        time += Days::new(residual / sun::angular_speed(time));
        residual = sun::signed_arc(sun::apparent_longitude(time), target);
        iterations += 1;
    }

    Ok(LongitudeCrossing {
        time,
        residual_deg: residual,
        iterations,
    })
}

/// Build the 24-entry solar-term table for a calendar year.
///
/// Each entry is an independent [`find_crossing`] call at
/// `(270 + 15·index) mod 360`; there is no cross-call state, so callers
/// may recompute or parallelize freely.
pub fn solar_terms(year: i32) -> Result<Vec<SolarTermEvent>, CalendarError> {
    (0..TERM_COUNT)
        .map(|index| {
            let target = target_longitude(index);
            let crossing = find_crossing(year, target)?;
            Ok(SolarTermEvent {
                index,
                target_longitude_deg: target,
                time: crossing.time,
                civil: crossing.time.to_civil(),
                residual_deg: crossing.residual_deg,
                iterations: crossing.iterations,
            })
        })
        .collect()
}
