use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use updater_engine::UpdaterConfig;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PedalUpdaterConfig {
    /// where unattended downloads are saved when no `--out` is given
    pub download_dir: PathBuf,
    pub log_dir: PathBuf,
    pub updater: UpdaterConfig,
}

impl Default for PedalUpdaterConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            log_dir: PathBuf::from("./.dev/logs"),
            updater: UpdaterConfig::default(),
        }
    }
}

impl PedalUpdaterConfig {
    /// Reads the TOML file at `config_path`, writing the defaults there first
    /// if it does not exist yet.
    pub fn load_config(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_config(config_path)?;
            return Ok(default_config);
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let config: PedalUpdaterConfig = toml::from_str(&config_str)
            .with_context(|| format!("Invalid config {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save_config(&self, config_path: &Path) -> Result<()> {
        let toml_string = toml::to_string(self)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(config_path)
            .with_context(|| format!("Failed to create config {}", config_path.display()))?;
        file.write_all(toml_string.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_created_with_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("pedal-updater.toml");

        let config = PedalUpdaterConfig::load_config(&path)?;
        assert_eq!(config, PedalUpdaterConfig::default());
        assert!(path.exists());

        let reloaded = PedalUpdaterConfig::load_config(&path)?;
        assert_eq!(reloaded, config);
        Ok(())
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pedal-updater.toml");
        fs::write(
            &path,
            "download_dir = \"/tmp\"\n\n[updater]\nfirmware_url = \"http://pedal.local/fw\"\n",
        )?;

        let config = PedalUpdaterConfig::load_config(&path)?;
        assert_eq!(config.download_dir, PathBuf::from("/tmp"));
        assert_eq!(config.updater.firmware_url, "http://pedal.local/fw");
        assert_eq!(config.updater.effects_url, UpdaterConfig::default().effects_url);
        assert_eq!(config.updater.chunk_size, 65536);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pedal-updater.toml");
        fs::write(&path, "updater = 3")?;

        assert!(PedalUpdaterConfig::load_config(&path).is_err());
        Ok(())
    }
}
