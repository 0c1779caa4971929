// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::{JD, MJD};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0 (the argument of every truncated
    /// series in [`crate::sun`]).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Convenience: MJD value corresponding to this JD.
    ///
    /// Kept as a convenience wrapper for `self.to::<MJD>()`.
    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to::<MJD>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_centuries_at_j2000_is_zero() {
        assert!(Time::<JD>::J2000.julian_centuries().abs() < Centuries::new(1e-15));
    }

    #[test]
    fn julian_centuries_one_century_out() {
        let jd = Time::<JD>::J2000 + Days::new(36_525.0);
        assert!((jd.julian_centuries() - Centuries::new(1.0)).abs() < Centuries::new(1e-12));
    }

    #[test]
    fn julian_centuries_negative_before_epoch() {
        let jd = Time::<JD>::new(2_448_908.5);
        let t = jd.julian_centuries().value();
        assert!((t - (-0.072_183_436)).abs() < 1e-9);
    }

    #[test]
    fn to_mjd_matches_offset() {
        let jd = Time::<JD>::new(2_451_545.0);
        assert!((jd.to_mjd().quantity() - Days::new(51_544.5)).abs() < Days::new(1e-10));
    }
}
