//! Process-wide registry of lazily constructed celestial bodies.
//!
//! The registry is the single point of lazy construction and memoization of
//! [`CelestialBody`] handles, shared across the whole process by wrapping one
//! instance in an [`Arc`]. It owns two pieces of mutable state, each behind
//! its own [`RwLock`]:
//!
//! * the **loader chains**: an ordered list of [`LoaderCandidate`]s per body
//!   name, pre-populated with the built-in default chain;
//! * the **handle map**: the names already resolved to a handle.
//!
//! Archive decoding runs outside both locks, so concurrent `get` calls never
//! serialize on file I/O and never deadlock against `clear_*` calls. Two
//! threads racing on an unresolved name may both decode; the first insert
//! wins and the loser's handle is dropped. Each operation is individually
//! atomic; compound sequences ("clear then get") are not, and callers must
//! not rely on no other thread intervening between them.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};

use crate::archive::DeArchive;
use crate::bodies::loaders::{default_chain, LoaderCandidate};
use crate::bodies::CelestialBody;
use crate::errors::EphemeridesError;
use crate::ids::SolarSystemBody;

/// Registry mapping body names to lazily built handles.
///
/// Construct one per process (or per data directory) and share it via
/// [`Arc`]; this crate deliberately exposes no hidden global instance.
#[derive(Debug)]
pub struct BodyRegistry {
    data_dir: Utf8PathBuf,
    loaders: RwLock<HashMap<String, Vec<LoaderCandidate>>>,
    handles: RwLock<HashMap<String, Arc<CelestialBody>>>,
}

impl BodyRegistry {
    /// Create a registry over a data directory, with the default loader
    /// chain pre-populated for every well-known body name.
    pub fn new(data_dir: impl Into<Utf8PathBuf>) -> Self {
        let mut loaders = HashMap::new();
        for body in SolarSystemBody::ALL {
            loaders.insert(body.name().to_string(), default_chain());
        }
        BodyRegistry {
            data_dir: data_dir.into(),
            loaders: RwLock::new(loaders),
            handles: RwLock::new(HashMap::new()),
        }
    }

    /// The directory scanned by candidates without a directory override.
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Resolve a body name to its handle, building it on first use.
    ///
    /// The ordered loader chain for the name is walked until one candidate's
    /// pattern resolves to a decodable archive; the resulting handle is
    /// memoized. When two threads race on the same unresolved name, both may
    /// build, but every caller observes a fully constructed handle from
    /// exactly one successful open.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: body name, case-insensitive (e.g. `"Mars"`).
    ///
    /// Return
    /// ----------
    /// * The memoized or freshly built handle,
    ///   [`EphemeridesError::UnsupportedBody`] for unknown names, or
    ///   [`EphemeridesError::BodyUnavailable`] when every candidate fails.
    pub fn get(&self, name: &str) -> Result<Arc<CelestialBody>, EphemeridesError> {
        let body = SolarSystemBody::from_name(name)
            .ok_or_else(|| EphemeridesError::UnsupportedBody(name.to_string()))?;
        let key = body.name().to_string();

        if let Some(handle) = self.read_handles().get(&key) {
            trace!("registry hit for {key}");
            return Ok(handle.clone());
        }

        // Decode outside every lock: loads block on file I/O and must not
        // stall readers of other names or clear operations.
        let chain = self
            .read_loaders()
            .get(&key)
            .cloned()
            .unwrap_or_else(default_chain);
        let handle = Arc::new(self.build(body, &chain)?);

        let mut handles = self
            .handles
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let winner = handles.entry(key).or_insert(handle);
        Ok(winner.clone())
    }

    /// Walk a chain in order; the first candidate that opens wins.
    fn build(
        &self,
        body: SolarSystemBody,
        chain: &[LoaderCandidate],
    ) -> Result<CelestialBody, EphemeridesError> {
        for candidate in chain {
            let dir = candidate.dir.as_deref().unwrap_or(&self.data_dir);
            match DeArchive::open(dir, &candidate.pattern) {
                Ok(archive) => {
                    debug!(
                        "resolved {} from {} file(s) matching `{}`",
                        body.name(),
                        archive.sources().len(),
                        candidate.pattern
                    );
                    return CelestialBody::new(body, Arc::new(archive));
                }
                Err(err) => {
                    debug!("candidate `{}` failed for {}: {err}", candidate.pattern, body.name());
                }
            }
        }
        Err(EphemeridesError::BodyUnavailable(body.name().to_string()))
    }

    /// Append a loader candidate to the chain for `name`.
    ///
    /// The chain is created from the built-in default first when `name` has
    /// none yet, so an added candidate never silently replaces the defaults.
    pub fn add_loader(&self, name: &str, candidate: LoaderCandidate) {
        let key = canonical(name);
        self.loaders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(default_chain)
            .push(candidate);
    }

    /// Reset the loader chain for one name (or all names, with `None`) to
    /// the built-in default.
    ///
    /// Memoized handles are untouched; combine with [`Self::clear_handles`]
    /// for a full reset.
    pub fn clear_loaders(&self, name: Option<&str>) {
        let mut loaders = self
            .loaders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match name {
            Some(name) => {
                loaders.insert(canonical(name), default_chain());
            }
            None => {
                loaders.clear();
                for body in SolarSystemBody::ALL {
                    loaders.insert(body.name().to_string(), default_chain());
                }
            }
        }
    }

    /// Drop every memoized handle.
    ///
    /// Loader chains are untouched. Subsequent `get` calls rebuild from
    /// scratch and return handles that are not reference-identical to any
    /// handle returned before the clear; handles already held by callers
    /// stay valid, frozen to their archive snapshot.
    pub fn clear_handles(&self) {
        self.handles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The files backing the currently memoized handle for `name`, if any.
    ///
    /// Diagnostics only: reports which sources actually satisfied the name.
    pub fn sources_for(&self, name: &str) -> Option<Vec<Utf8PathBuf>> {
        let key = canonical(name);
        self.read_handles()
            .get(&key)
            .map(|handle| handle.sources().to_vec())
    }

    /// The current loader chain for `name`.
    pub fn loaders_for(&self, name: &str) -> Vec<LoaderCandidate> {
        self.read_loaders()
            .get(&canonical(name))
            .cloned()
            .unwrap_or_else(default_chain)
    }

    fn read_handles(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<CelestialBody>>> {
        self.handles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_loaders(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<LoaderCandidate>>> {
        self.loaders.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn canonical(name: &str) -> String {
    SolarSystemBody::from_name(name)
        .map(|body| body.name().to_string())
        .unwrap_or_else(|| name.trim().to_ascii_uppercase())
}

#[cfg(test)]
mod test_registry {
    use super::*;

    #[test]
    fn test_unknown_name_is_unsupported() {
        let registry = BodyRegistry::new("/nonexistent");
        assert!(matches!(
            registry.get("VULCAN"),
            Err(EphemeridesError::UnsupportedBody(_))
        ));
    }

    #[test]
    fn test_missing_data_dir_makes_bodies_unavailable() {
        let registry = BodyRegistry::new("/nonexistent");
        assert!(matches!(
            registry.get("MARS"),
            Err(EphemeridesError::BodyUnavailable(_))
        ));
    }

    #[test]
    fn test_default_chain_is_restored_after_clear() {
        let registry = BodyRegistry::new("/nonexistent");
        registry.add_loader("MARS", LoaderCandidate::new(r"^custom\.bin$"));
        assert_eq!(registry.loaders_for("MARS").len(), default_chain().len() + 1);

        registry.clear_loaders(Some("MARS"));
        assert_eq!(registry.loaders_for("MARS"), default_chain());
    }

    #[test]
    fn test_clear_all_loaders_resets_every_name() {
        let registry = BodyRegistry::new("/nonexistent");
        registry.add_loader("VENUS", LoaderCandidate::new(r"^a$"));
        registry.add_loader("MOON", LoaderCandidate::new(r"^b$"));
        registry.clear_loaders(None);
        assert_eq!(registry.loaders_for("VENUS"), default_chain());
        assert_eq!(registry.loaders_for("MOON"), default_chain());
    }

    #[test]
    fn test_case_insensitive_names_share_one_chain() {
        let registry = BodyRegistry::new("/nonexistent");
        registry.add_loader("mars", LoaderCandidate::new(r"^custom\.bin$"));
        assert_eq!(registry.loaders_for("MARS").len(), default_chain().len() + 1);
    }
}
