use std::{
    fs, io,
    path::{Path, PathBuf},
};

use cqmaze::{
    amplify::DEFAULT_MAX_QUBITS,
    selectors::{amplified::DEFAULT_SHOTS, Params},
};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helpers::constants::paths::settings_path;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Error reading settings file ({path:?}), {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub shots: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_qubits: Option<usize>,
    #[serde(default)]
    pub max_paths: Option<usize>,
    #[serde(default)]
    pub cutoff: Option<usize>,
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub selector_params: Option<Params>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selector(mut self, value: impl Into<String>) -> Self {
        self.selector = Some(value.into());
        self
    }

    /// Selector name, `None` means the default one of the registry.
    pub fn get_selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn set_shots(mut self, value: usize) -> Self {
        self.shots = Some(value);
        self
    }

    pub fn get_shots(&self) -> usize {
        self.shots.unwrap_or(DEFAULT_SHOTS)
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_max_qubits(mut self, value: usize) -> Self {
        self.max_qubits = Some(value);
        self
    }

    pub fn get_max_qubits(&self) -> usize {
        self.max_qubits.unwrap_or(DEFAULT_MAX_QUBITS)
    }

    pub fn set_max_paths(mut self, value: usize) -> Self {
        self.max_paths = Some(value);
        self
    }

    pub fn get_max_paths(&self) -> Option<usize> {
        self.max_paths
    }

    pub fn set_cutoff(mut self, value: usize) -> Self {
        self.cutoff = Some(value);
        self
    }

    pub fn get_cutoff(&self) -> Option<usize> {
        self.cutoff
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn set_selector_params(mut self, value: Params) -> Self {
        self.selector_params = Some(value);
        self
    }

    pub fn get_selector_params(&self) -> Params {
        self.selector_params.clone().unwrap_or_default()
    }

    /// Parameters handed to the selector, the dedicated settings win over `selector_params`.
    pub fn params(&self) -> Params {
        let mut params = self.get_selector_params();
        params.set("shots", self.get_shots());
        params.set("max_qubits", self.get_max_qubits());
        if let Some(seed) = self.get_seed() {
            params.set("seed", seed);
        }

        params
    }

    pub fn default_path() -> PathBuf {
        settings_path()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        Self::options().from_str(text)
    }

    /// Loads settings from `path`, writing the default file there first if it's missing.
    pub fn load(path: PathBuf) -> Result<Self, SettingsError> {
        log::debug!("Loading settings from {:?}", path);

        let settings_string = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Self::write_default(&path)?;
                DEFAULT_SETTINGS.to_string()
            }
            Err(err) => return Err(err.into()),
        };

        Self::parse(&settings_string).map_err(|source| SettingsError::Parse { path, source })
    }

    /// Like [`Settings::load`], but falls back to the defaults and logs the error.
    pub fn load_or_default(path: PathBuf) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{}, using default settings", err);
                Self::parse(DEFAULT_SETTINGS).unwrap_or_default()
            }
        }
    }

    pub fn reset_config(path: PathBuf) -> Result<(), SettingsError> {
        Self::write_default(&path)
    }

    fn write_default(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("qmaze-settings-{}-{}", name, std::process::id()))
            .join("settings.ron")
    }

    #[test]
    fn default_file_parses() {
        let settings = Settings::parse(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings.get_selector(), Some("amplified"));
        assert_eq!(settings.get_shots(), 1000);
        assert_eq!(settings.get_max_qubits(), 20);
        assert_eq!(settings.get_seed(), None);
        assert!(settings.get_color());
    }

    #[test]
    fn implicit_some_and_missing_fields() {
        let settings = Settings::parse("(seed: 7, color: false)").unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.get_color());
        assert_eq!(settings.get_selector(), None);
        assert_eq!(settings.get_shots(), DEFAULT_SHOTS);
    }

    #[test]
    fn params_prefer_dedicated_settings() {
        let settings = Settings::new()
            .set_selector_params(Params::new().with("shots", 5).with("iterations", 2))
            .set_shots(64)
            .set_seed(9);
        let params = settings.params();

        assert_eq!(params.get("shots"), Some("64"));
        assert_eq!(params.get("seed"), Some("9"));
        assert_eq!(params.get("iterations"), Some("2"));
        assert_eq!(params.get("max_qubits"), Some("20"));
    }

    #[test]
    fn load_writes_default_file() {
        let path = temp_path("load");
        let _ = fs::remove_file(&path);

        let settings = Settings::load(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(settings, Settings::parse(DEFAULT_SETTINGS).unwrap());

        fs::write(&path, "(shots: 3)").unwrap();
        assert_eq!(Settings::load(path.clone()).unwrap().get_shots(), 3);

        Settings::reset_config(path.clone()).unwrap();
        assert_eq!(Settings::load(path.clone()).unwrap().get_shots(), 1000);

        fs::write(&path, "(shots: \"many\")").unwrap();
        assert!(matches!(
            Settings::load(path.clone()),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(Settings::load_or_default(path.clone()).get_shots(), 1000);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
