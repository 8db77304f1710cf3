//! Loader candidates: where and how to look for archive files.
//!
//! A [`LoaderCandidate`] pairs a file-name pattern with an optional directory
//! override. The registry walks an ordered chain of candidates per body name
//! and keeps the first one whose pattern resolves to a decodable archive.

use camino::Utf8PathBuf;

/// Classic unix naming of DE archive files (e.g. `lnxp1600p2200.440`).
pub const DEFAULT_DE_SUPPORTED_NAMES: &str = r"^[lu]nx[mp](\d\d\d\d)\.(?:4\d\d)$";

/// IMCCE INPOP archive files (e.g. `inpop21a_TDB_m100_p100_tt.dat`).
pub const DEFAULT_INPOP_SUPPORTED_NAMES: &str = r"^inpop.*\.dat$";

/// One candidate source for a body name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderCandidate {
    /// Regular expression applied to bare file names.
    pub pattern: String,
    /// Directory to scan; `None` falls back to the registry data directory.
    pub dir: Option<Utf8PathBuf>,
}

impl LoaderCandidate {
    /// Candidate scanning the registry data directory.
    pub fn new(pattern: impl Into<String>) -> Self {
        LoaderCandidate {
            pattern: pattern.into(),
            dir: None,
        }
    }

    /// Candidate scanning an explicit directory.
    pub fn in_dir(pattern: impl Into<String>, dir: impl Into<Utf8PathBuf>) -> Self {
        LoaderCandidate {
            pattern: pattern.into(),
            dir: Some(dir.into()),
        }
    }
}

/// The built-in chain tried for every well-known body name: classic DE
/// naming first, INPOP naming second.
pub fn default_chain() -> Vec<LoaderCandidate> {
    vec![
        LoaderCandidate::new(DEFAULT_DE_SUPPORTED_NAMES),
        LoaderCandidate::new(DEFAULT_INPOP_SUPPORTED_NAMES),
    ]
}

#[cfg(test)]
mod test_loaders {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_default_de_pattern_matches_stock_names() {
        let re = Regex::new(DEFAULT_DE_SUPPORTED_NAMES).unwrap();
        assert!(re.is_match("lnxp1600.440"));
        assert!(re.is_match("unxm0100.406"));
        assert!(!re.is_match("lnxp1600.440.bak"));
        assert!(!re.is_match("de440.bsp"));
    }

    #[test]
    fn test_default_inpop_pattern() {
        let re = Regex::new(DEFAULT_INPOP_SUPPORTED_NAMES).unwrap();
        assert!(re.is_match("inpop21a_TDB_m100_p100_tt.dat"));
        assert!(!re.is_match("inpop21a.bin"));
    }
}
