use camino::Utf8PathBuf;
use thiserror::Error;

use crate::ids::SolarSystemBody;

/// Crate-level error type.
///
/// Every reported failure names the specific condition; there is no generic
/// catch-all variant. Constant lookup is deliberately **not** represented
/// here: a constant absent from an archive is an expected case across vendor
/// variants and is returned as `Option::None` instead.
#[derive(Error, Debug)]
pub enum EphemeridesError {
    /// The loader pattern matched zero files under the data directory.
    /// Recoverable: callers may try an alternate pattern or report
    /// "ephemeris not configured".
    #[error("no ephemeris file matching `{pattern}` under {dir}")]
    NoMatchingSource { dir: Utf8PathBuf, pattern: String },

    /// Structural defect in an archive: wrong record size, inconsistent
    /// coefficient counts, undetectable byte order, or conflicting overlap
    /// between files. Fatal for the whole `open` call.
    #[error("malformed ephemeris record in {file}: {reason}")]
    MalformedRecord { file: Utf8PathBuf, reason: String },

    /// The query date falls in a gap between segments or outside the
    /// archive's overall span. Valid-but-incomplete data, per-call failure.
    #[error("date {jd} JD (TDB) is not covered by the loaded ephemeris")]
    DateNotCovered { jd: f64 },

    /// Every candidate loader for a body name failed.
    #[error("celestial body `{0}` unavailable: every loader candidate failed")]
    BodyUnavailable(String),

    /// The requested name does not map to any body this crate serves.
    #[error("unsupported celestial body name `{0}`")]
    UnsupportedBody(String),

    /// The archive defines neither a direct GM constant nor an inverse mass
    /// ratio for the body.
    #[error("no gravitational parameter for {0} in the loaded archive")]
    GmNotFound(SolarSystemBody),

    /// Segment construction rejected its inputs (empty or unequal
    /// coefficient arrays, non-positive duration).
    #[error("invalid chebyshev segment: {0}")]
    InvalidSegment(String),

    /// A loader candidate pattern is not a valid regular expression.
    #[error("invalid loader pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),
}
