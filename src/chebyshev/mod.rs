//! Piecewise Chebyshev interpolation of ephemeris states.
//!
//! This module holds the numeric half of the crate:
//!
//! - [`scalar`] — The [`EphemerisScalar`](crate::chebyshev::scalar::EphemerisScalar)
//!   capability the evaluator is written against, implemented for plain `f64`
//!   and for the forward-mode [`Dual`](crate::chebyshev::scalar::Dual) number.
//!
//! - [`segment`] — One time-bounded polynomial piece
//!   ([`ChebyshevSegment`](crate::chebyshev::segment::ChebyshevSegment)) with
//!   position/velocity/acceleration evaluation over a half-open span.
//!
//! - [`segment_set`] — The per-series ordered collection
//!   ([`SegmentSet`](crate::chebyshev::segment_set::SegmentSet)) with the
//!   order-independent multi-file merge and containing-date lookup.
//!
//! - [`state`] — The [`StateVector`](crate::chebyshev::state::StateVector)
//!   result container with unit conversions.

pub mod scalar;
pub mod segment;
pub mod segment_set;
pub mod state;
