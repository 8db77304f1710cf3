//! DE-family binary ephemeris archives.
//!
//! This module turns raw archive bytes into physical constants and per-series
//! segment collections:
//!
//! - [`header`] — Header-record parsing and byte-order auto-detection.
//! - [`layout`] — The per-archive record layout derived from the IPT table.
//! - [`records`] — Data-record decoding into [`ChebyshevSegment`]s.
//! - [`DeArchive`] — The public decoder: scans a directory for files matching
//!   a name pattern, decodes and merges every match, and answers constant,
//!   GM and state queries.
//!
//! One logical archive is often spread over several physical files covering
//! successive (sometimes overlapping) date ranges. [`DeArchive::open`] merges
//! them into a single duplicate-free segment sequence per series, with a
//! result independent of the directory listing order.
//!
//! [`ChebyshevSegment`]: crate::chebyshev::segment::ChebyshevSegment

use std::collections::HashMap;
use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use regex::Regex;

use crate::chebyshev::scalar::EphemerisScalar;
use crate::chebyshev::segment_set::SegmentSet;
use crate::chebyshev::state::StateVector;
use crate::constants::{JulianDate, SECONDS_PER_DAY};
use crate::errors::EphemeridesError;
use crate::ids::{EphemerisSeries, SolarSystemBody};

pub mod header;
pub mod layout;
pub mod records;

use header::ArchiveHeader;

/// A fully decoded, immutable ephemeris archive.
///
/// Construction happens once in [`DeArchive::open`]; afterwards the archive
/// is safe to share read-only across threads. Rebuilding means opening a new
/// archive and swapping it into the body registry.
#[derive(Debug, Clone)]
pub struct DeArchive {
    header: ArchiveHeader,
    segments: HashMap<EphemerisSeries, SegmentSet>,
    sources: Vec<Utf8PathBuf>,
}

impl DeArchive {
    /// Open every archive file under `dir` whose name matches `pattern`.
    ///
    /// The pattern is a regular expression applied to bare file names. All
    /// matches are decoded; the constant table and layout reference come from
    /// the lexicographically first match, and the per-series segments of
    /// every file are merged order-independently.
    ///
    /// Arguments
    /// -----------------
    /// * `dir`: directory holding the candidate files.
    /// * `pattern`: regular expression selecting file names.
    ///
    /// Return
    /// ----------
    /// * The decoded archive, [`EphemeridesError::NoMatchingSource`] when
    ///   nothing matches, or [`EphemeridesError::MalformedRecord`] when any
    ///   matched file is structurally broken.
    pub fn open(dir: &Utf8Path, pattern: &str) -> Result<Self, EphemeridesError> {
        let matcher = Regex::new(pattern).map_err(|source| EphemeridesError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matched: Vec<Utf8PathBuf> = Vec::new();
        if dir.is_dir() {
            for entry in dir.read_dir_utf8()? {
                let entry = entry?;
                if entry.file_type()?.is_file() && matcher.is_match(entry.file_name()) {
                    matched.push(entry.path().to_path_buf());
                }
            }
        }
        if matched.is_empty() {
            return Err(EphemeridesError::NoMatchingSource {
                dir: dir.to_path_buf(),
                pattern: pattern.to_string(),
            });
        }
        matched.sort();
        info!("opening ephemeris archive from {} file(s) matching `{pattern}`", matched.len());

        let mut reference: Option<ArchiveHeader> = None;
        let mut raw_segments: HashMap<EphemerisSeries, Vec<_>> = HashMap::new();
        for path in &matched {
            let data = fs::read(path)?;
            let header = ArchiveHeader::parse(&data, path)?;
            debug!(
                "{path}: DE{} covering [{}, {}] JD",
                header.version, header.start_epoch, header.final_epoch
            );

            if let Some(reference) = &reference {
                if reference.version != header.version {
                    warn!(
                        "mixing archive versions DE{} and DE{}; constants come from {}",
                        reference.version, header.version, matched[0]
                    );
                }
            }

            for (series, segments) in records::decode_records(&data, &header, path)? {
                raw_segments.entry(series).or_default().extend(segments);
            }
            reference.get_or_insert(header);
        }

        let header = reference.ok_or_else(|| EphemeridesError::NoMatchingSource {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        })?;
        let origin = dir.to_path_buf();
        let mut segments = HashMap::new();
        for (series, raw) in raw_segments {
            let set = SegmentSet::from_segments(raw, &origin)?;
            debug!("{series}: {} merged segment(s)", set.len());
            segments.insert(series, set);
        }

        Ok(DeArchive {
            header,
            segments,
            sources: matched,
        })
    }

    /// The files that were actually decoded, in lexicographic order.
    pub fn sources(&self) -> &[Utf8PathBuf] {
        &self.sources
    }

    /// Named constant from the archive header, or `None` when this archive
    /// variant does not define it.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.header.constant(name)
    }

    /// Astronomical unit in km, as stated by the archive.
    pub fn au(&self) -> f64 {
        self.header.au
    }

    /// Earth/Moon mass ratio.
    pub fn emrat(&self) -> f64 {
        self.header.emrat
    }

    /// Archive version number (e.g. 440).
    pub fn version(&self) -> i32 {
        self.header.version
    }

    /// Nominal `[first, last]` covered epochs (JD TDB) stated by the header.
    pub fn time_span(&self) -> (JulianDate, JulianDate) {
        (self.header.start_epoch, self.header.final_epoch)
    }

    /// The merged segment collection of one served series.
    pub fn segments_for(&self, series: EphemerisSeries) -> Option<&SegmentSet> {
        self.segments.get(&series)
    }

    /// Absolute gravitational parameter of `body`, in km³/s².
    ///
    /// Archives of this family state GM values in AU³/day², either directly
    /// (`GM1`…`GM9`, `GMB`, `GMS`) or as the Sun GM divided by an inverse
    /// mass ratio (`IM1`…`IM9`). Earth and Moon are split out of the
    /// Earth-Moon barycenter value with EMRAT. The result is normalized here
    /// so callers always get an absolute GM.
    ///
    /// Return
    /// ----------
    /// * GM in km³/s², or [`EphemeridesError::GmNotFound`] when the archive
    ///   defines neither form.
    pub fn gm(&self, body: SolarSystemBody) -> Result<f64, EphemeridesError> {
        let au_cubed = self.au().powi(3);
        let to_km3_s2 = au_cubed / (SECONDS_PER_DAY * SECONDS_PER_DAY);
        let not_found = || EphemeridesError::GmNotFound(body);

        let barycenter_gm = || -> Result<f64, EphemeridesError> {
            self.constant("GMB").ok_or_else(not_found)
        };
        let raw = match body {
            SolarSystemBody::Earth => {
                let emrat = self.emrat();
                barycenter_gm()? * emrat / (1.0 + emrat)
            }
            SolarSystemBody::Moon => barycenter_gm()? / (1.0 + self.emrat()),
            SolarSystemBody::EarthMoonBarycenter => barycenter_gm()?,
            SolarSystemBody::Sun => self.constant("GMS").ok_or_else(not_found)?,
            SolarSystemBody::Mercury => self.planet_gm(body, 1)?,
            SolarSystemBody::Venus => self.planet_gm(body, 2)?,
            SolarSystemBody::Mars => self.planet_gm(body, 4)?,
            SolarSystemBody::Jupiter => self.planet_gm(body, 5)?,
            SolarSystemBody::Saturn => self.planet_gm(body, 6)?,
            SolarSystemBody::Uranus => self.planet_gm(body, 7)?,
            SolarSystemBody::Neptune => self.planet_gm(body, 8)?,
            SolarSystemBody::Pluto => self.planet_gm(body, 9)?,
        };
        Ok(raw * to_km3_s2)
    }

    /// Direct `GM<i>` constant, else `GMS / IM<i>` (inverse mass ratio).
    fn planet_gm(&self, body: SolarSystemBody, index: usize) -> Result<f64, EphemeridesError> {
        if let Some(gm) = self.constant(&format!("GM{index}")) {
            return Ok(gm);
        }
        match (self.constant("GMS"), self.constant(&format!("IM{index}"))) {
            (Some(sun_gm), Some(ratio)) if ratio > 0.0 => Ok(sun_gm / ratio),
            _ => Err(EphemeridesError::GmNotFound(body)),
        }
    }

    /// Position, velocity and acceleration of `body` at `jd`, generic over
    /// the evaluation scalar.
    ///
    /// Planets, the Sun and the Earth-Moon barycenter read their stored
    /// series directly (solar-system-barycentric). Earth and the barycentric
    /// Moon are assembled from the Earth-Moon barycenter and the geocentric
    /// Moon series through EMRAT.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: the queried body.
    /// * `jd`: evaluation date (JD TDB), plain or differentiable.
    ///
    /// Return
    /// ----------
    /// * [`StateVector`] in km, km/day, km/day², or
    ///   [`EphemeridesError::DateNotCovered`] when `jd` falls in a gap.
    pub fn state<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        body: SolarSystemBody,
        jd: T,
    ) -> Result<StateVector<T>, EphemeridesError> {
        match body.direct_series() {
            Some(series) => self.series_state(series, jd),
            None => {
                let barycenter = self.series_state(EphemerisSeries::EarthMoonBarycenter, jd)?;
                let geocentric_moon = self.series_state(EphemerisSeries::Moon, jd)?;
                let emrat = self.emrat();
                Ok(match body {
                    SolarSystemBody::Earth => {
                        barycenter - geocentric_moon.scaled(1.0 / (1.0 + emrat))
                    }
                    _ => barycenter + geocentric_moon.scaled(emrat / (1.0 + emrat)),
                })
            }
        }
    }

    /// Position of `body` at `jd`, in km.
    pub fn position<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        body: SolarSystemBody,
        jd: T,
    ) -> Result<nalgebra::Vector3<T>, EphemeridesError> {
        Ok(self.state(body, jd)?.position)
    }

    /// Lunar libration Euler angles and their rates at `jd`.
    pub fn libration_state<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        jd: T,
    ) -> Result<StateVector<T>, EphemeridesError> {
        self.series_state(EphemerisSeries::Libration, jd)
    }

    fn series_state<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        series: EphemerisSeries,
        jd: T,
    ) -> Result<StateVector<T>, EphemeridesError> {
        let set = self
            .segments_for(series)
            .ok_or(EphemeridesError::DateNotCovered { jd: jd.real() })?;
        let segment = set.segment_containing(jd.real())?;
        Ok(segment.position_velocity_acceleration(jd))
    }
}

impl fmt::Display for DeArchive {
    /// Human-readable archive summary: version, coverage, sources, series.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{:-^78}+", " Ephemeris Archive ")?;
        writeln!(f, "| {:<76} |", format!("Version: DE{}", self.header.version))?;
        writeln!(
            f,
            "| {:<76} |",
            format!(
                "Coverage: [{:.2}, {:.2}] JD TDB, {:.2}-day records",
                self.header.start_epoch, self.header.final_epoch, self.header.record_span
            )
        )?;
        writeln!(
            f,
            "| {:<76} |",
            format!("Constants: {} (AU = {} km)", self.header.constants.len(), self.au())
        )?;
        for source in &self.sources {
            writeln!(f, "| {:<76} |", format!("Source: {source}"))?;
        }
        let mut series: Vec<_> = self.segments.iter().collect();
        series.sort_by_key(|(kind, _)| kind.ipt_row());
        for (kind, set) in series {
            writeln!(
                f,
                "| {:<76} |",
                format!("{kind}: {} segment(s)", set.len())
            )?;
        }
        write!(f, "+{:-^78}+", "")
    }
}
