//! Numeric abstraction for Chebyshev evaluation.
//!
//! The segment evaluator is written once against [`EphemerisScalar`] (the
//! four arithmetic operations plus constant injection), so the same code
//! serves plain `f64` dates and [`Dual`] dates carrying a derivative with
//! respect to some unknown parameter. Derivatives of the query date propagate
//! through the returned state purely via the scalar's own arithmetic; the
//! evaluator never special-cases the numeric type.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Numeric capability required by the Chebyshev evaluator.
///
/// Implementors behave like a field element with an embedded copy of `f64`:
/// constants from the archive (coefficients, epochs, durations) enter the
/// computation through [`EphemerisScalar::from_constant`], and span checks
/// read the plain value back through [`EphemerisScalar::real`].
pub trait EphemerisScalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Inject a plain constant (zero derivative for differentiable types).
    fn from_constant(value: f64) -> Self;

    /// The underlying plain value, used for span containment checks.
    fn real(self) -> f64;

    /// Multiply by a plain constant.
    fn scale(self, factor: f64) -> Self;
}

impl EphemerisScalar for f64 {
    fn from_constant(value: f64) -> Self {
        value
    }

    fn real(self) -> f64 {
        self
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }
}

/// Forward-mode dual number: a value and one derivative slot.
///
/// `Dual { re, du }` represents `re + du·ε` with `ε² = 0`. Arithmetic follows
/// the usual product/quotient rules, so evaluating a polynomial at
/// [`Dual::variable(x)`] yields the polynomial value in `re` and its exact
/// derivative in `du`.
///
/// Examples
/// --------
/// ```rust
/// use ephemerist::chebyshev::scalar::Dual;
///
/// // d/dx (x² + 3x) at x = 2 is 7
/// let x = Dual::variable(2.0);
/// let y = x * x + x.scale(3.0);
/// assert_eq!(y.re, 10.0);
/// assert_eq!(y.du, 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual {
    /// Plain value.
    pub re: f64,
    /// Derivative with respect to the differentiation variable.
    pub du: f64,
}

impl Dual {
    /// A constant: zero derivative.
    pub fn constant(value: f64) -> Self {
        Dual { re: value, du: 0.0 }
    }

    /// The differentiation variable itself: unit derivative.
    pub fn variable(value: f64) -> Self {
        Dual { re: value, du: 1.0 }
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Dual {
            re: self.re + rhs.re,
            du: self.du + rhs.du,
        }
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Dual {
            re: self.re - rhs.re,
            du: self.du - rhs.du,
        }
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Dual {
            re: self.re * rhs.re,
            du: self.re * rhs.du + self.du * rhs.re,
        }
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Dual {
            re: self.re / rhs.re,
            du: (self.du * rhs.re - self.re * rhs.du) / (rhs.re * rhs.re),
        }
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Dual {
            re: -self.re,
            du: -self.du,
        }
    }
}

impl EphemerisScalar for Dual {
    fn from_constant(value: f64) -> Self {
        Dual::constant(value)
    }

    fn real(self) -> f64 {
        self.re
    }

    fn scale(self, factor: f64) -> Self {
        Dual {
            re: self.re * factor,
            du: self.du * factor,
        }
    }
}
