//! Directory layout and tunables for the draft workflow.
//!
//! ```text
//! <base_dir>/
//!   owned.dek
//!   drafts/<draft_name>/
//!     Session_<draft_name>_Deck*.txt    copied from downloads
//!     rentals.txt
//!     rented.dek
//!     <list>_trade_binder.dek
//! ```
//!
//! Every path is derived from a [`DraftConfig`] value.

use crate::error::{DraftError, Result};
use crate::names::CardAliases;
use crate::rentals::DEFAULT_RENTAL_CAP;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RENTALS_FILE: &str = "rentals.txt";
pub const RENTED_DEK_FILE: &str = "rented.dek";
pub const TRADE_BINDER_SUFFIX: &str = "_trade_binder";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub base_dir: PathBuf,
    /// Parent of all draft directories; `<base_dir>/drafts` when unset
    pub drafts_dir: Option<PathBuf>,
    /// Owned collection; `<base_dir>/owned.dek` when unset
    pub owned_path: Option<PathBuf>,
    /// Where exported draft lists and rented .dek files are downloaded to
    pub downloads_dir: PathBuf,
    pub rental_cap: usize,
    /// Draft exports are named `<export_prefix><draft_name>_Deck*.txt`
    pub export_prefix: String,
    pub aliases: CardAliases,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self::for_base_dir(PathBuf::from("."))
    }
}

impl DraftConfig {
    /// Defaults rooted at `base_dir`
    pub fn for_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            drafts_dir: None,
            owned_path: None,
            downloads_dir: default_downloads_dir(),
            rental_cap: DEFAULT_RENTAL_CAP,
            export_prefix: "Session_".to_string(),
            aliases: CardAliases::default(),
        }
    }

    /// Load a JSON config file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DraftError::io(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|source| DraftError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the user config file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                log::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config_dir>/draft_binders/config.json`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("draft_binders").join("config.json"))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DraftError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| DraftError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|e| DraftError::io(path, e))
    }

    pub fn drafts_dir(&self) -> PathBuf {
        match &self.drafts_dir {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.join("drafts"),
        }
    }

    pub fn owned_path(&self) -> PathBuf {
        match &self.owned_path {
            Some(path) => self.base_dir.join(path),
            None => self.base_dir.join("owned.dek"),
        }
    }

    pub fn draft_dir(&self, draft_name: &str) -> PathBuf {
        self.drafts_dir().join(draft_name)
    }

    pub fn rentals_path(&self, draft_name: &str) -> PathBuf {
        self.draft_dir(draft_name).join(RENTALS_FILE)
    }

    pub fn rented_dek_path(&self, draft_name: &str) -> PathBuf {
        self.draft_dir(draft_name).join(RENTED_DEK_FILE)
    }

    /// `<draft_dir>/<list_stem>_trade_binder.dek`
    pub fn trade_binder_path(&self, draft_name: &str, list_stem: &str) -> PathBuf {
        self.draft_dir(draft_name)
            .join(format!("{list_stem}{TRADE_BINDER_SUFFIX}.dek"))
    }

    /// File name prefix of this draft's exports, e.g. `Session_cube_Deck`
    pub fn export_pattern_prefix(&self, draft_name: &str) -> String {
        format!("{}{}_Deck", self.export_prefix, draft_name)
    }
}

fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_is_rooted_at_base_dir() {
        let config = DraftConfig::for_base_dir("/data/mtgo");

        assert_eq!(config.owned_path(), PathBuf::from("/data/mtgo/owned.dek"));
        assert_eq!(config.draft_dir("cube"), PathBuf::from("/data/mtgo/drafts/cube"));
        assert_eq!(
            config.rentals_path("cube"),
            PathBuf::from("/data/mtgo/drafts/cube/rentals.txt")
        );
        assert_eq!(
            config.rented_dek_path("cube"),
            PathBuf::from("/data/mtgo/drafts/cube/rented.dek")
        );
        assert_eq!(
            config.trade_binder_path("cube", "Session_cube_Deck_1"),
            PathBuf::from("/data/mtgo/drafts/cube/Session_cube_Deck_1_trade_binder.dek")
        );
        assert_eq!(config.export_pattern_prefix("cube"), "Session_cube_Deck");
    }

    #[test]
    fn defaults() {
        let config = DraftConfig::default();
        assert_eq!(config.rental_cap, 100);
        assert_eq!(config.aliases.resolve("Fire"), "Fire // Ice");
    }

    #[test]
    fn relative_overrides_resolve_against_base_dir() {
        let mut config = DraftConfig::for_base_dir("/data/mtgo");
        config.drafts_dir = Some(PathBuf::from("sessions"));
        config.owned_path = Some(PathBuf::from("/elsewhere/collection.dek"));

        assert_eq!(config.draft_dir("cube"), PathBuf::from("/data/mtgo/sessions/cube"));
        assert_eq!(config.owned_path(), PathBuf::from("/elsewhere/collection.dek"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"base_dir": "/data/mtgo", "rental_cap": 80, "aliases": {"Wear": "Wear // Tear"}}"#,
        )
        .unwrap();

        let config = DraftConfig::load(&path).unwrap();

        assert_eq!(config.rental_cap, 80);
        assert_eq!(config.owned_path(), PathBuf::from("/data/mtgo/owned.dek"));
        assert_eq!(config.aliases.resolve("Wear"), "Wear // Tear");
        // An explicit alias table replaces the built-in one.
        assert_eq!(config.aliases.resolve("Fire"), "Fire");
        assert_eq!(config.export_prefix, "Session_");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = DraftConfig::for_base_dir(dir.path());
        config.rental_cap = 42;

        config.save(&path).unwrap();

        assert_eq!(DraftConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            DraftConfig::load(&path),
            Err(DraftError::Config { .. })
        ));
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/this/config/does/not/exist.json");
        assert!(matches!(
            DraftConfig::load_or_default(Some(missing)),
            Err(DraftError::Io { .. })
        ));
    }
}
