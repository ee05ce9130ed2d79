//! Application settings.
//!
//! Values come from a priority chain, highest first:
//!
//! 1. explicit overrides (CLI flags)
//! 2. environment variables (`SHELF_*`)
//! 3. `~/.config/shelf/settings.toml`
//! 4. built-in defaults
//!
//! The resolved [`Settings`] are passed to the fetcher and the catalog writer
//! at construction; nothing reads the environment after that.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use shelf_core::Status;
use shelf_steam::{DEFAULT_API_BASE, DEFAULT_TIMEOUT, SteamConfig};

use crate::error::SettingsError;

/// Catalog file used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_CATALOG: &str = "games.csv";

const ENV_CATALOG: &str = "SHELF_CATALOG";
const ENV_DEFAULT_STATUS: &str = "SHELF_DEFAULT_STATUS";
const ENV_API_BASE: &str = "SHELF_STEAM_API_BASE";
const ENV_TIMEOUT: &str = "SHELF_STEAM_TIMEOUT";
const ENV_LANGUAGE: &str = "SHELF_STEAM_LANGUAGE";
const ENV_COUNTRY: &str = "SHELF_STEAM_COUNTRY";

/// On-disk TOML layout. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub steam: SteamSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<Status>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Explicit values that beat every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub catalog_path: Option<PathBuf>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    Cli,
    EnvVar(&'static str),
    SettingsFile,
    Default,
    /// Optional value not set anywhere.
    Unset,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
            Self::Unset => write!(f, "not set"),
        }
    }
}

/// Provenance of each resolved field.
#[derive(Debug, Clone)]
pub struct SettingSources {
    pub catalog_path: SettingSource,
    pub default_status: SettingSource,
    pub api_base: SettingSource,
    pub timeout: SettingSource,
    pub language: SettingSource,
    pub country: SettingSource,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    /// Status given to every newly added record.
    pub default_status: Status,
    pub steam: SteamConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            default_status: Status::default(),
            steam: SteamConfig::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from overrides, the process environment and the
    /// settings file at [`settings_path`].
    pub fn load(overrides: &Overrides) -> Result<(Self, SettingSources), SettingsError> {
        let file = load_settings_file(&settings_path())?;
        Self::resolve(overrides, file.as_ref(), |var| std::env::var(var).ok())
    }

    /// Resolve settings from explicit inputs. `env` looks up an environment
    /// variable by name.
    pub fn resolve<E>(
        overrides: &Overrides,
        file: Option<&SettingsFile>,
        env: E,
    ) -> Result<(Self, SettingSources), SettingsError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let catalog = file.map(|f| &f.catalog);
        let steam = file.map(|f| &f.steam);

        let (catalog_path, catalog_src) = pick(
            overrides.catalog_path.clone(),
            ENV_CATALOG,
            &env,
            |s| Ok(PathBuf::from(s)),
            catalog.and_then(|c| c.path.clone()),
        )?
        .unwrap_or_else(|| (PathBuf::from(DEFAULT_CATALOG), SettingSource::Default));

        let (default_status, status_src) = pick(
            None,
            ENV_DEFAULT_STATUS,
            &env,
            |s| s.parse::<Status>().map_err(|e| e.to_string()),
            catalog.and_then(|c| c.default_status),
        )?
        .unwrap_or_else(|| (Status::default(), SettingSource::Default));

        let (api_base, api_src) = pick(
            None,
            ENV_API_BASE,
            &env,
            |s| Ok(s.to_string()),
            steam.and_then(|s| s.api_base.clone()),
        )?
        .unwrap_or_else(|| (DEFAULT_API_BASE.to_string(), SettingSource::Default));

        let (timeout, timeout_src) = pick(
            None,
            ENV_TIMEOUT,
            &env,
            parse_timeout,
            steam.and_then(|s| s.timeout_secs).map(Duration::from_secs),
        )?
        .unwrap_or_else(|| (DEFAULT_TIMEOUT, SettingSource::Default));

        let (language, language_src) = optional(pick(
            None,
            ENV_LANGUAGE,
            &env,
            |s| Ok(s.to_string()),
            steam.and_then(|s| s.language.clone()),
        )?);

        let (country, country_src) = optional(pick(
            None,
            ENV_COUNTRY,
            &env,
            |s| Ok(s.to_string()),
            steam.and_then(|s| s.country.clone()),
        )?);

        if timeout.is_zero() {
            return Err(SettingsError::invalid_value(
                "steam.timeout_secs",
                "timeout must be at least one second",
            ));
        }

        let settings = Self {
            catalog_path,
            default_status,
            steam: SteamConfig {
                api_base,
                timeout,
                language,
                country,
            },
        };
        let sources = SettingSources {
            catalog_path: catalog_src,
            default_status: status_src,
            api_base: api_src,
            timeout: timeout_src,
            language: language_src,
            country: country_src,
        };
        Ok((settings, sources))
    }

    /// The file representation of these settings, for `config init`.
    pub fn to_file(&self) -> SettingsFile {
        SettingsFile {
            catalog: CatalogSection {
                path: Some(self.catalog_path.clone()),
                default_status: Some(self.default_status),
            },
            steam: SteamSection {
                api_base: Some(self.steam.api_base.clone()),
                timeout_secs: Some(self.steam.timeout.as_secs()),
                language: self.steam.language.clone(),
                country: self.steam.country.clone(),
            },
        }
    }
}

/// Take the first value present in override > env > file. Empty env values
/// count as unset.
fn pick<T, E, P>(
    cli: Option<T>,
    var: &'static str,
    env: &E,
    parse: P,
    file: Option<T>,
) -> Result<Option<(T, SettingSource)>, SettingsError>
where
    E: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    if let Some(value) = cli {
        return Ok(Some((value, SettingSource::Cli)));
    }
    if let Some(raw) = env(var).filter(|v| !v.trim().is_empty()) {
        let value = parse(raw.trim()).map_err(|msg| SettingsError::invalid_value(var, msg))?;
        return Ok(Some((value, SettingSource::EnvVar(var))));
    }
    Ok(file.map(|value| (value, SettingSource::SettingsFile)))
}

fn optional<T>(picked: Option<(T, SettingSource)>) -> (Option<T>, SettingSource) {
    match picked {
        Some((value, source)) => (Some(value), source),
        None => (None, SettingSource::Unset),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| format!("'{raw}' is not a whole number of seconds"))
}

/// Canonical path to the settings file: `~/.config/shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("shelf").join("settings.toml")
}

/// Read a settings file. A missing file is `Ok(None)`; a file that exists
/// but does not parse is an error.
pub fn load_settings_file(path: &Path) -> Result<Option<SettingsFile>, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let file = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(file))
}

/// Write a settings file atomically, creating parent directories as needed.
pub fn save_settings(path: &Path, file: &SettingsFile) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(file)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let (settings, sources) = Settings::resolve(&Overrides::default(), None, no_env).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(sources.catalog_path, SettingSource::Default);
        assert_eq!(sources.language, SettingSource::Unset);
        assert_eq!(settings.steam.timeout, Duration::from_secs(10));
    }

    #[test]
    fn file_values_are_used() {
        let file: SettingsFile = toml::from_str(
            r#"
[catalog]
path = "/data/backlog.csv"
default_status = "playing"

[steam]
timeout_secs = 5
language = "english"
"#,
        )
        .unwrap();
        let (settings, sources) =
            Settings::resolve(&Overrides::default(), Some(&file), no_env).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("/data/backlog.csv"));
        assert_eq!(settings.default_status, Status::Playing);
        assert_eq!(settings.steam.timeout, Duration::from_secs(5));
        assert_eq!(settings.steam.language.as_deref(), Some("english"));
        assert_eq!(settings.steam.api_base, DEFAULT_API_BASE);
        assert_eq!(sources.catalog_path, SettingSource::SettingsFile);
        assert_eq!(sources.api_base, SettingSource::Default);
    }

    #[test]
    fn env_beats_file_and_cli_beats_env() {
        let file = SettingsFile {
            catalog: CatalogSection {
                path: Some(PathBuf::from("file.csv")),
                default_status: None,
            },
            ..Default::default()
        };
        let env = env_of(&[(ENV_CATALOG, "env.csv"), (ENV_COUNTRY, "de")]);

        let (settings, sources) =
            Settings::resolve(&Overrides::default(), Some(&file), &env).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("env.csv"));
        assert_eq!(sources.catalog_path, SettingSource::EnvVar(ENV_CATALOG));
        assert_eq!(settings.steam.country.as_deref(), Some("de"));

        let overrides = Overrides {
            catalog_path: Some(PathBuf::from("cli.csv")),
        };
        let (settings, sources) = Settings::resolve(&overrides, Some(&file), &env).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("cli.csv"));
        assert_eq!(sources.catalog_path, SettingSource::Cli);
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let env = env_of(&[(ENV_CATALOG, "  ")]);
        let (settings, _) = Settings::resolve(&Overrides::default(), None, env).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from(DEFAULT_CATALOG));
    }

    #[test]
    fn bad_env_values_are_errors() {
        let env = env_of(&[(ENV_TIMEOUT, "soon")]);
        let err = Settings::resolve(&Overrides::default(), None, env).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { var, .. } if var == ENV_TIMEOUT));

        let env = env_of(&[(ENV_DEFAULT_STATUS, "wishlist")]);
        assert!(Settings::resolve(&Overrides::default(), None, env).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let env = env_of(&[(ENV_TIMEOUT, "0")]);
        assert!(Settings::resolve(&Overrides::default(), None, env).is_err());
    }

    #[test]
    fn to_file_round_trips_through_resolve() {
        let mut original = Settings::default();
        original.default_status = Status::Dropped;
        original.steam.language = Some("german".to_string());

        let file = original.to_file();
        let (resolved, _) = Settings::resolve(&Overrides::default(), Some(&file), no_env).unwrap();
        assert_eq!(resolved, original);
    }
}
