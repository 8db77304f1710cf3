//! One time-bounded Chebyshev polynomial piece for one coefficient series.
//!
//! A [`ChebyshevSegment`] stores the coefficients needed to compute the
//! position (and velocity and acceleration) of a body over a single
//! sub-interval of a data record. Evaluation is generic over
//! [`EphemerisScalar`], so a plain `f64` date and a [`Dual`] date carrying a
//! derivative run through the same code path.
//!
//! The evaluation date is first normalized to `t ∈ [-1, 1]` over the validity
//! span, the Chebyshev basis is evaluated there, and the derivative results
//! are rescaled back to per-day units with the chain-rule factors
//! `2/duration` and `(2/duration)²`.
//!
//! [`Dual`]: crate::chebyshev::scalar::Dual

use nalgebra::Vector3;

use crate::chebyshev::scalar::EphemerisScalar;
use crate::chebyshev::state::StateVector;
use crate::constants::JulianDate;
use crate::errors::EphemeridesError;
use crate::ids::EphemerisSeries;

/// An immutable polynomial piece covering one fixed time span for one series.
///
/// Fields
/// -----------------
/// * `series` — the coefficient series this segment belongs to.
/// * `start` — validity start epoch (JD TDB).
/// * `duration` — validity duration in days, strictly positive.
/// * `x`, `y`, `z` — Chebyshev coefficients per axis, low-to-high degree,
///   identical non-zero length.
///
/// The validity span is **half-open**: a date exactly on `start + duration`
/// belongs to the next segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevSegment {
    series: EphemerisSeries,
    start: JulianDate,
    duration: f64,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl ChebyshevSegment {
    /// Build a segment, validating its invariants.
    ///
    /// Arguments
    /// -----------------
    /// * `series`: owning coefficient series.
    /// * `start`: validity start epoch (JD TDB).
    /// * `duration`: validity duration in days.
    /// * `x`, `y`, `z`: per-axis coefficient vectors, low-to-high degree.
    ///
    /// Return
    /// ----------
    /// * The segment, or [`EphemeridesError::InvalidSegment`] when the
    ///   duration is not positive or the coefficient vectors are empty or of
    ///   unequal length.
    pub fn new(
        series: EphemerisSeries,
        start: JulianDate,
        duration: f64,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> Result<Self, EphemeridesError> {
        if !(duration > 0.0) {
            return Err(EphemeridesError::InvalidSegment(format!(
                "non-positive duration {duration} for {series}"
            )));
        }
        if x.is_empty() {
            return Err(EphemeridesError::InvalidSegment(format!(
                "empty coefficient array for {series}"
            )));
        }
        if x.len() != y.len() || x.len() != z.len() {
            return Err(EphemeridesError::InvalidSegment(format!(
                "unequal coefficient counts ({}, {}, {}) for {series}",
                x.len(),
                y.len(),
                z.len()
            )));
        }
        Ok(ChebyshevSegment {
            series,
            start,
            duration,
            x,
            y,
            z,
        })
    }

    pub fn series(&self) -> EphemerisSeries {
        self.series
    }

    /// Validity start epoch (JD TDB).
    pub fn start(&self) -> JulianDate {
        self.start
    }

    /// Validity duration in days.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Exclusive validity end epoch (JD TDB).
    pub fn end(&self) -> JulianDate {
        self.start + self.duration
    }

    /// Polynomial degree plus one.
    pub fn coefficient_count(&self) -> usize {
        self.x.len()
    }

    /// True iff `start <= jd < start + duration`.
    pub fn contains(&self, jd: JulianDate) -> bool {
        jd >= self.start && jd < self.end()
    }

    /// Normalize an evaluation date to `t ∈ [-1, 1]` over the validity span.
    fn normalize<T: EphemerisScalar>(&self, jd: T) -> T {
        (jd - T::from_constant(self.start)).scale(2.0 / self.duration) - T::from_constant(1.0)
    }

    /// Evaluate the position at `jd`, which must lie inside the validity span.
    ///
    /// Each axis is evaluated with the Clenshaw recurrence over the stored
    /// coefficients.
    ///
    /// Arguments
    /// -----------------
    /// * `jd`: evaluation date (JD TDB), plain or differentiable.
    ///
    /// Return
    /// ----------
    /// * Cartesian position in km.
    pub fn position<T: EphemerisScalar + nalgebra::Scalar>(&self, jd: T) -> Vector3<T> {
        debug_assert!(self.contains(jd.real()));
        let t = self.normalize(jd);
        Vector3::new(
            clenshaw(&self.x, t),
            clenshaw(&self.y, t),
            clenshaw(&self.z, t),
        )
    }

    /// Evaluate position, velocity and acceleration at `jd` in one pass.
    ///
    /// The Chebyshev basis and its first two derivative bases are advanced by
    /// their standard recurrences, so the returned velocity and acceleration
    /// are the exact analytic derivatives of the position polynomial, not
    /// finite differences. The derivative sums taken with respect to the
    /// normalized variable are rescaled to per-day units via the chain rule.
    ///
    /// Arguments
    /// -----------------
    /// * `jd`: evaluation date (JD TDB), plain or differentiable.
    ///
    /// Return
    /// ----------
    /// * [`StateVector`] in km, km/day and km/day².
    pub fn position_velocity_acceleration<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        jd: T,
    ) -> StateVector<T> {
        debug_assert!(self.contains(jd.real()));
        let t = self.normalize(jd);
        let n = self.x.len();
        let zero = T::from_constant(0.0);

        let axes = [&self.x, &self.y, &self.z];
        let mut pos = [zero; 3];
        let mut dpos = [zero; 3];
        let mut ddpos = [zero; 3];

        // Basis values T_k, T'_k, T''_k advanced together; contributions are
        // accumulated as each k is reached.
        let mut t_prev = T::from_constant(1.0); // T_0
        for (axis, p) in pos.iter_mut().enumerate() {
            *p = t_prev.scale(axes[axis][0]);
        }
        if n == 1 {
            return self.assemble(pos, dpos, ddpos);
        }

        let mut t_cur = t; // T_1
        let mut d_prev = zero; // T'_0
        let mut d_cur = T::from_constant(1.0); // T'_1
        let mut s_prev = zero; // T''_0
        let mut s_cur = zero; // T''_1
        for axis in 0..3 {
            pos[axis] = pos[axis] + t_cur.scale(axes[axis][1]);
            dpos[axis] = dpos[axis] + d_cur.scale(axes[axis][1]);
        }

        let two_t = t.scale(2.0);
        for k in 2..n {
            let t_next = two_t * t_cur - t_prev;
            let d_next = two_t * d_cur + t_cur.scale(2.0) - d_prev;
            let s_next = two_t * s_cur + d_cur.scale(4.0) - s_prev;
            t_prev = t_cur;
            t_cur = t_next;
            d_prev = d_cur;
            d_cur = d_next;
            s_prev = s_cur;
            s_cur = s_next;

            for axis in 0..3 {
                let c = axes[axis][k];
                pos[axis] = pos[axis] + t_cur.scale(c);
                dpos[axis] = dpos[axis] + d_cur.scale(c);
                ddpos[axis] = ddpos[axis] + s_cur.scale(c);
            }
        }

        self.assemble(pos, dpos, ddpos)
    }

    /// Rescale the normalized-variable derivative sums to per-day units.
    fn assemble<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        pos: [T; 3],
        dpos: [T; 3],
        ddpos: [T; 3],
    ) -> StateVector<T> {
        let vfac = 2.0 / self.duration;
        let afac = vfac * vfac;
        StateVector {
            position: Vector3::new(pos[0], pos[1], pos[2]),
            velocity: Vector3::new(
                dpos[0].scale(vfac),
                dpos[1].scale(vfac),
                dpos[2].scale(vfac),
            ),
            acceleration: Vector3::new(
                ddpos[0].scale(afac),
                ddpos[1].scale(afac),
                ddpos[2].scale(afac),
            ),
        }
    }
}

/// Clenshaw accumulation of `Σ c_k T_k(t)`.
fn clenshaw<T: EphemerisScalar>(coeffs: &[f64], t: T) -> T {
    let n = coeffs.len();
    if n == 1 {
        return T::from_constant(coeffs[0]);
    }
    let two_t = t.scale(2.0);
    let mut b1 = T::from_constant(0.0);
    let mut b2 = T::from_constant(0.0);
    for k in (1..n).rev() {
        let b = two_t * b1 - b2 + T::from_constant(coeffs[k]);
        b2 = b1;
        b1 = b;
    }
    T::from_constant(coeffs[0]) + t * b1 - b2
}
