//! User settings (`~/.config/boxset/config.toml`) and path resolution.
//!
//! Every value has the same priority chain: command line, then environment,
//! then the config file, then the built-in default.

use std::path::{Path, PathBuf};

use boxset_core::mask_secret;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Environment variable naming the library root.
pub const LIBRARY_ENV: &str = "BOXSET_LIBRARY";
/// Environment variable naming the output directory.
pub const OUTPUT_ENV: &str = "BOXSET_OUTPUT";

/// Canonical path to the settings file: `~/.config/boxset/config.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("boxset").join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub output: OutputSettings,
    pub tmdb: TmdbSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub root: Option<PathBuf>,
    /// Library root as seen by the media server.
    pub media_root: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub image_locale: Option<String>,
    pub request_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Load the settings file. A missing file yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pretty-printed TOML for display, with the API key masked.
    pub fn to_display_string(&self) -> Result<String, SettingsError> {
        let mut shown = self.clone();
        if let Some(key) = shown.tmdb.api_key.as_mut() {
            *key = mask_secret(key);
        }
        Ok(toml::to_string_pretty(&shown)?)
    }

    /// Library root: CLI, then `$BOXSET_LIBRARY`, then the config file.
    pub fn resolve_library(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        resolve_path(cli, env_path(LIBRARY_ENV), self.library.root.clone())
    }

    /// Output directory: CLI, then `$BOXSET_OUTPUT`, then the config file.
    pub fn resolve_output(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        resolve_path(cli, env_path(OUTPUT_ENV), self.library.output_dir.clone())
    }

    pub fn resolve_media_root(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        resolve_path(cli, None, self.library.media_root.clone())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

fn resolve_path(
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Option<PathBuf> {
    [cli, env, config]
        .into_iter()
        .flatten()
        .find(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let settings: Settings = toml::from_str(
            r#"
            [library]
            root = "/media/NAS/Movies"
            media_root = "/srv/Movies"
            output_dir = "/home/me/Collections"

            [output]
            overwrite = true

            [tmdb]
            api_key = "abcdef123456"
            image_locale = "de"
            request_interval_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(settings.library.root, Some(PathBuf::from("/media/NAS/Movies")));
        assert!(settings.output.overwrite);
        assert_eq!(settings.tmdb.image_locale.as_deref(), Some("de"));
        assert_eq!(settings.tmdb.request_interval_ms, Some(500));
        assert_eq!(settings.tmdb.timeout_secs, None);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let settings: Settings = toml::from_str("[output]\noverwrite = true\n").unwrap();
        assert_eq!(settings.library, LibrarySettings::default());
        assert_eq!(settings.tmdb, TmdbSettings::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[library\nroot = 3").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn path_priority() {
        let cli = Some(PathBuf::from("/cli"));
        let env = Some(PathBuf::from("/env"));
        let config = Some(PathBuf::from("/config"));
        assert_eq!(
            resolve_path(cli, env.clone(), config.clone()),
            Some(PathBuf::from("/cli"))
        );
        assert_eq!(
            resolve_path(None, env, config.clone()),
            Some(PathBuf::from("/env"))
        );
        assert_eq!(
            resolve_path(Some(PathBuf::new()), None, config),
            Some(PathBuf::from("/config"))
        );
        assert_eq!(resolve_path(None, None, None), None);
    }

    #[test]
    fn display_masks_api_key() {
        let mut settings = Settings::default();
        settings.tmdb.api_key = Some("abcdef123456".to_string());
        let shown = settings.to_display_string().unwrap();
        assert!(shown.contains("********3456"));
        assert!(!shown.contains("abcdef"));
    }

    #[test]
    fn display_hides_short_api_key() {
        let mut settings = Settings::default();
        settings.tmdb.api_key = Some("abc".to_string());
        let shown = settings.to_display_string().unwrap();
        assert!(shown.contains("\"***\""));
        assert!(!shown.contains("abc"));
    }
}
