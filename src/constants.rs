//! # Constants and type definitions for Ephemerist
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `ephemerist` library.
//!
//! ## Overview
//!
//! - Astronomical constants and unit conversions (days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - Plausibility bounds used by the archive byte-order detection
//!
//! These definitions are used by the archive decoder, the Chebyshev evaluator,
//! and the body registry.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012), fallback when an archive defines none
pub const AU_KM: f64 = 149_597_870.7;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const JD2000: f64 = 2_451_545.0;

// -------------------------------------------------------------------------------------------------
// Byte-order detection bounds
// -------------------------------------------------------------------------------------------------

/// Earliest Julian Date accepted for an archive start epoch (~ year -3000)
pub const JD_SANE_MIN: f64 = 0.5e6;

/// Latest Julian Date accepted for an archive start epoch (~ year 6200)
pub const JD_SANE_MAX: f64 = 4.0e6;

/// Largest constant-table size accepted when cross-checking a byte order
pub const NCON_SANE_MAX: i32 = 10_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian Date in the TDB time scale (days)
pub type JulianDate = f64;

/// Distance in kilometers
pub type Kilometer = f64;

/// Velocity in kilometers per day
pub type KilometerPerDay = f64;
