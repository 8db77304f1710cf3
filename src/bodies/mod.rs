//! Celestial bodies: resolved handles and the process-wide registry.
//!
//! - [`CelestialBody`] — The cached, resolved representation of one named
//!   body: its decoded archive, an absolute GM and a lazily-bound frame name.
//! - [`registry`] — The [`BodyRegistry`](crate::bodies::registry::BodyRegistry)
//!   mapping names to handles under pluggable, ordered loader chains.
//! - [`loaders`] — Candidate descriptors and the built-in default chain.

use std::sync::Arc;

use camino::Utf8PathBuf;
use hifitime::Epoch;
use nalgebra::Vector3;
use once_cell::sync::OnceCell;

use crate::archive::DeArchive;
use crate::chebyshev::scalar::EphemerisScalar;
use crate::chebyshev::state::StateVector;
use crate::errors::EphemeridesError;
use crate::ids::SolarSystemBody;

pub mod loaders;
pub mod registry;

pub use registry::BodyRegistry;

/// The cached, resolved representation of one named celestial body.
///
/// Handles are created by the registry on first successful load of a name
/// and are immutable afterwards: a handle stays frozen to the archive
/// snapshot it was built from, even when the registry is cleared underneath
/// it. Callers must not assume identity stability across a clear.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    name: String,
    body: SolarSystemBody,
    /// Absolute gravitational parameter, km³/s².
    gm: f64,
    archive: Arc<DeArchive>,
    frame_name: OnceCell<String>,
}

impl CelestialBody {
    /// Bind a body to a decoded archive, normalizing its GM on the way.
    pub(crate) fn new(
        body: SolarSystemBody,
        archive: Arc<DeArchive>,
    ) -> Result<Self, EphemeridesError> {
        let gm = archive.gm(body)?;
        Ok(CelestialBody {
            name: body.name().to_string(),
            body,
            gm,
            archive,
            frame_name: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> SolarSystemBody {
        self.body
    }

    /// Absolute gravitational parameter, km³/s².
    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// The archive snapshot backing this handle.
    pub fn archive(&self) -> &Arc<DeArchive> {
        &self.archive
    }

    /// The files that satisfied this body's loader, for diagnostics.
    pub fn sources(&self) -> &[Utf8PathBuf] {
        self.archive.sources()
    }

    /// Named physical constant from the backing archive, `None` when this
    /// archive variant does not define it.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.archive.constant(name)
    }

    /// Name of the body-centered inertial frame, bound on first use.
    ///
    /// Frames themselves are an external collaborator; the identifier is
    /// opaque to this crate.
    pub fn inertial_frame_name(&self) -> &str {
        self.frame_name
            .get_or_init(|| format!("{} ICRF", self.name))
    }

    /// Position, velocity and acceleration at `epoch`, in km, km/day and
    /// km/day².
    ///
    /// Return
    /// ----------
    /// * The state, or [`EphemeridesError::DateNotCovered`] when the epoch
    ///   falls outside the archive coverage.
    pub fn state(&self, epoch: Epoch) -> Result<StateVector, EphemeridesError> {
        self.archive.state(self.body, epoch.to_jde_et_days())
    }

    /// Position at `epoch`, in km.
    pub fn position(&self, epoch: Epoch) -> Result<Vector3<f64>, EphemeridesError> {
        Ok(self.state(epoch)?.position)
    }

    /// State at a raw TDB Julian date, generic over the evaluation scalar.
    ///
    /// This is the entry point for differentiable dates: pass a
    /// [`Dual`](crate::chebyshev::scalar::Dual) carrying a derivative and the
    /// returned state components carry the propagated derivatives.
    pub fn state_at_jd<T: EphemerisScalar + nalgebra::Scalar>(
        &self,
        jd: T,
    ) -> Result<StateVector<T>, EphemeridesError> {
        self.archive.state(self.body, jd)
    }
}
