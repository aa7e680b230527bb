//! Process-wide tunables, loaded once at startup and held immutable during
//! propagation — mirrors the teacher's `particle::config` pattern (hardcoded
//! `Default`, best-effort `.toml` override).

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Tunables that gate or adjust element matrix synthesis but are not part of
/// any one element's own configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Gates higher-order thin-lens multipole slices in the RF cavity's
    /// transverse assembler (`EDipole`/`HDipole` at `>= 1`, `EQuad`/`HMono`/
    /// `HQuad` at `>= 2`).
    pub mpole_level: u8,

    /// Root directory engineering-data paths (`Eng_Data_Dir`) are resolved
    /// relative to, if set.
    pub eng_data_root: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mpole_level: config::DEFAULT_MPOLE_LEVEL,
            eng_data_root: None,
        }
    }
}

impl RuntimeConfig {
    /// Tries a fixed list of candidate relative paths for a `runtime.toml`
    /// override, falling back to `Default::default()` on any miss or parse
    /// failure.
    pub fn load() -> Self {
        for candidate in ["./runtime.toml", "../runtime.toml", "../../runtime.toml"] {
            if let Some(cfg) = Self::try_load(candidate) {
                return cfg;
            }
        }
        Self::default()
    }

    fn try_load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("warning: failed to parse {}: {e}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_matches_config_crate_constant() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.mpole_level, config::DEFAULT_MPOLE_LEVEL);
        assert!(cfg.eng_data_root.is_none());
    }

    #[test]
    fn parses_partial_overrides() {
        let cfg: RuntimeConfig = toml::from_str("mpole_level = 1\n").unwrap();
        assert_eq!(cfg.mpole_level, 1);
    }
}
