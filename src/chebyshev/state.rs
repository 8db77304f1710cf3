//! State vector container returned by segment and archive queries.
//!
//! Units
//! -----------------
//! * `position`: kilometers (km)
//! * `velocity`: kilometers per day (km/day)
//! * `acceleration`: kilometers per day² (km/day²)
//!
//! Use [`StateVector::to_au`] with the archive's own AU value to convert to
//! AU-based units, or [`StateVector::velocity_km_s`] for km/s.

use nalgebra::Vector3;
use std::ops::{Add, Sub};

use crate::chebyshev::scalar::EphemerisScalar;
use crate::constants::SECONDS_PER_DAY;

/// Position, velocity and acceleration of a body at one evaluation date.
///
/// Generic over the evaluation scalar so that dual-number queries carry their
/// derivative slots through every component.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector<T = f64> {
    /// Cartesian position (km).
    pub position: Vector3<T>,
    /// Cartesian velocity (km/day).
    pub velocity: Vector3<T>,
    /// Cartesian acceleration (km/day²).
    pub acceleration: Vector3<T>,
}

impl<T: EphemerisScalar + nalgebra::Scalar> StateVector<T> {
    /// Scale every component by a plain constant.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        StateVector {
            position: self.position.map(|c| c.scale(factor)),
            velocity: self.velocity.map(|c| c.scale(factor)),
            acceleration: self.acceleration.map(|c| c.scale(factor)),
        }
    }

    /// Convert to AU, AU/day and AU/day² using the supplied AU length in km.
    #[must_use = "`.to_au()` returns a new StateVector; assign or use it"]
    pub fn to_au(&self, au_km: f64) -> Self {
        self.scaled(1.0 / au_km)
    }
}

impl StateVector<f64> {
    /// Velocity in km/s.
    pub fn velocity_km_s(&self) -> Vector3<f64> {
        self.velocity / SECONDS_PER_DAY
    }
}

impl<T: EphemerisScalar + nalgebra::Scalar> Add for StateVector<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        StateVector {
            position: self.position.zip_map(&other.position, |a, b| a + b),
            velocity: self.velocity.zip_map(&other.velocity, |a, b| a + b),
            acceleration: self
                .acceleration
                .zip_map(&other.acceleration, |a, b| a + b),
        }
    }
}

impl<T: EphemerisScalar + nalgebra::Scalar> Sub for StateVector<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        StateVector {
            position: self.position.zip_map(&other.position, |a, b| a - b),
            velocity: self.velocity.zip_map(&other.velocity, |a, b| a - b),
            acceleration: self
                .acceleration
                .zip_map(&other.acceleration, |a, b| a - b),
        }
    }
}

#[cfg(test)]
mod test_state {
    use super::*;

    #[test]
    fn test_to_au_scales_all_components() {
        let state = StateVector {
            position: Vector3::new(2.0, 4.0, 6.0),
            velocity: Vector3::new(1.0, 0.0, -1.0),
            acceleration: Vector3::new(0.5, 0.5, 0.5),
        };
        let scaled = state.to_au(2.0);
        assert_eq!(scaled.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(scaled.velocity, Vector3::new(0.5, 0.0, -0.5));
        assert_eq!(scaled.acceleration, Vector3::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_componentwise_sub() {
        let a = StateVector {
            position: Vector3::new(3.0, 3.0, 3.0),
            velocity: Vector3::new(2.0, 2.0, 2.0),
            acceleration: Vector3::new(1.0, 1.0, 1.0),
        };
        let b = StateVector {
            position: Vector3::new(1.0, 2.0, 3.0),
            velocity: Vector3::new(2.0, 2.0, 2.0),
            acceleration: Vector3::new(0.0, 0.5, 1.0),
        };
        let d = a - b;
        assert_eq!(d.position, Vector3::new(2.0, 1.0, 0.0));
        assert_eq!(d.velocity, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(d.acceleration, Vector3::new(1.0, 0.5, 0.0));
    }
}
