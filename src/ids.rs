//! Identifiers for the bodies and coefficient series served by this crate.
//!
//! Two levels of naming coexist:
//!
//! * [`EphemerisSeries`] — the raw coefficient series stored in a DE-family
//!   archive, one per IPT row. The Moon series is **geocentric**, everything
//!   else is referred to the solar-system barycenter.
//! * [`SolarSystemBody`] — the public body names resolvable through the
//!   [`BodyRegistry`](crate::bodies::BodyRegistry). Earth and the
//!   barycentric Moon do not exist as stored series; their states are derived
//!   from the Earth-Moon barycenter and the geocentric Moon series through
//!   the Earth/Moon mass ratio.

use std::fmt;

/// One coefficient series of a DE-family archive, in IPT row order.
///
/// Rows 0 to 10 are barycentric position series (three axes). Row 11 holds
/// the nutation angles (two axes) and is decoded only to validate the record
/// layout. The libration row is addressed by the LPT header field and carries
/// three Euler angles.
///
/// Conversions
/// -----------
/// * Use [`EphemerisSeries::from_ipt_row`] to map a raw row index back to a
///   series. Out-of-range values return `None`.
/// * Use [`EphemerisSeries::ipt_row`] to recover the row index for layout
///   arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EphemerisSeries {
    Mercury = 0,
    Venus = 1,
    EarthMoonBarycenter = 2,
    Mars = 3,
    Jupiter = 4,
    Saturn = 5,
    Uranus = 6,
    Neptune = 7,
    Pluto = 8,
    /// Geocentric Moon.
    Moon = 9,
    Sun = 10,
    Nutation = 11,
    Libration = 12,
}

impl EphemerisSeries {
    /// All series, in IPT row order (libration last, addressed by LPT).
    pub const ALL: [EphemerisSeries; 13] = [
        EphemerisSeries::Mercury,
        EphemerisSeries::Venus,
        EphemerisSeries::EarthMoonBarycenter,
        EphemerisSeries::Mars,
        EphemerisSeries::Jupiter,
        EphemerisSeries::Saturn,
        EphemerisSeries::Uranus,
        EphemerisSeries::Neptune,
        EphemerisSeries::Pluto,
        EphemerisSeries::Moon,
        EphemerisSeries::Sun,
        EphemerisSeries::Nutation,
        EphemerisSeries::Libration,
    ];

    /// IPT row index of this series (the libration row is the LPT field).
    pub fn ipt_row(self) -> usize {
        self as usize
    }

    /// Map a raw IPT row index to a series.
    pub fn from_ipt_row(row: usize) -> Option<Self> {
        Self::ALL.get(row).copied()
    }

    /// Number of interpolated axes stored per sub-interval.
    pub fn axes(self) -> usize {
        match self {
            EphemerisSeries::Nutation => 2,
            _ => 3,
        }
    }

    /// Whether the series is served to callers as a three-axis state.
    ///
    /// The two-axis nutation series participates in record-layout validation
    /// but is not queryable.
    pub fn is_served(self) -> bool {
        self.axes() == 3
    }
}

impl fmt::Display for EphemerisSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A celestial body resolvable by name through the body registry.
///
/// `EarthMoonBarycenter`, the planets and the Sun map one-to-one onto stored
/// series. `Earth` and `Moon` (barycentric) are derived states, split out of
/// the Earth-Moon barycenter using the geocentric Moon series and the EMRAT
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarSystemBody {
    Sun,
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl SolarSystemBody {
    /// Every body the registry pre-populates a default loader chain for.
    pub const ALL: [SolarSystemBody; 12] = [
        SolarSystemBody::Sun,
        SolarSystemBody::Mercury,
        SolarSystemBody::Venus,
        SolarSystemBody::EarthMoonBarycenter,
        SolarSystemBody::Earth,
        SolarSystemBody::Moon,
        SolarSystemBody::Mars,
        SolarSystemBody::Jupiter,
        SolarSystemBody::Saturn,
        SolarSystemBody::Uranus,
        SolarSystemBody::Neptune,
        SolarSystemBody::Pluto,
    ];

    /// Canonical registry name of this body (e.g. `"EARTH-MOON BARYCENTER"`).
    pub fn name(self) -> &'static str {
        match self {
            SolarSystemBody::Sun => "SUN",
            SolarSystemBody::Mercury => "MERCURY",
            SolarSystemBody::Venus => "VENUS",
            SolarSystemBody::EarthMoonBarycenter => "EARTH-MOON BARYCENTER",
            SolarSystemBody::Earth => "EARTH",
            SolarSystemBody::Moon => "MOON",
            SolarSystemBody::Mars => "MARS",
            SolarSystemBody::Jupiter => "JUPITER",
            SolarSystemBody::Saturn => "SATURN",
            SolarSystemBody::Uranus => "URANUS",
            SolarSystemBody::Neptune => "NEPTUNE",
            SolarSystemBody::Pluto => "PLUTO",
        }
    }

    /// Resolve a registry name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|body| body.name() == upper)
    }

    /// The stored series this body reads directly, when it has one.
    ///
    /// `Earth` and `Moon` return `None`: their states are assembled from the
    /// `EarthMoonBarycenter` and geocentric `Moon` series.
    pub fn direct_series(self) -> Option<EphemerisSeries> {
        match self {
            SolarSystemBody::Sun => Some(EphemerisSeries::Sun),
            SolarSystemBody::Mercury => Some(EphemerisSeries::Mercury),
            SolarSystemBody::Venus => Some(EphemerisSeries::Venus),
            SolarSystemBody::EarthMoonBarycenter => Some(EphemerisSeries::EarthMoonBarycenter),
            SolarSystemBody::Mars => Some(EphemerisSeries::Mars),
            SolarSystemBody::Jupiter => Some(EphemerisSeries::Jupiter),
            SolarSystemBody::Saturn => Some(EphemerisSeries::Saturn),
            SolarSystemBody::Uranus => Some(EphemerisSeries::Uranus),
            SolarSystemBody::Neptune => Some(EphemerisSeries::Neptune),
            SolarSystemBody::Pluto => Some(EphemerisSeries::Pluto),
            SolarSystemBody::Earth | SolarSystemBody::Moon => None,
        }
    }
}

impl fmt::Display for SolarSystemBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
