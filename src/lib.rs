//! # Ephemerist
//!
//! Time-indexed position/velocity data for solar-system bodies, decoded from
//! binary DE-family ephemeris archives and served to many concurrent readers.
//!
//! The crate is built from three tightly coupled pieces:
//!
//! 1. **Archive decoding** ([`archive`]) — [`DeArchive`](crate::archive::DeArchive)
//!    reads one or more binary files matching a name pattern (big or little
//!    endian, overlapping date ranges across files), validates the header and
//!    record layout, and merges everything into time-ordered, duplicate-free
//!    segment collections plus a physical-constant table.
//! 2. **Chebyshev evaluation** ([`chebyshev`]) — each
//!    [`ChebyshevSegment`](crate::chebyshev::segment::ChebyshevSegment) turns
//!    a query date into position, velocity and acceleration, generically over
//!    any numeric type implementing
//!    [`EphemerisScalar`](crate::chebyshev::scalar::EphemerisScalar): plain
//!    `f64` or the forward-mode [`Dual`](crate::chebyshev::scalar::Dual)
//!    number carrying derivatives.
//! 3. **Body caching** ([`bodies`]) — a
//!    [`BodyRegistry`](crate::bodies::BodyRegistry) lazily builds and
//!    memoizes one [`CelestialBody`](crate::bodies::CelestialBody) handle per
//!    name under pluggable loader chains, safe under concurrent access and
//!    explicit invalidation.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use ephemerist::bodies::BodyRegistry;
//! use hifitime::Epoch;
//!
//! let registry = BodyRegistry::new("/data/ephemerides");
//! let mars = registry.get("MARS")?;
//!
//! let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 4, 10);
//! let state = mars.state(epoch)?;
//! println!("{} km from the SSB, GM = {} km³/s²", state.position.norm(), mars.gm());
//! # Ok::<(), ephemerist::errors::EphemeridesError>(())
//! ```

pub mod archive;
pub mod bodies;
pub mod chebyshev;
pub mod constants;
pub mod errors;
pub mod ids;

pub use archive::DeArchive;
pub use bodies::{BodyRegistry, CelestialBody};
pub use chebyshev::segment::ChebyshevSegment;
pub use chebyshev::state::StateVector;
pub use errors::EphemeridesError;
pub use ids::{EphemerisSeries, SolarSystemBody};
