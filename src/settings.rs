use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub life: LifeSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct LifeSettings {
    pub delay: Option<f32>,      // Seconds between frames
    pub live_char: Option<char>, // Marker for live cells
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring malformed settings");
                Self::default()
            }),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let settings: Self = toml::from_str(content)?;
        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termplay")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_life_section() {
        let settings = Settings::parse("[life]\ndelay = 0.1\nlive_char = \"#\"\n").unwrap();
        assert_eq!(settings.life.delay, Some(0.1));
        assert_eq!(settings.life.live_char, Some('#'));
    }

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::parse("").unwrap();
        assert!(settings.life.delay.is_none());
        assert!(settings.life.live_char.is_none());
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(Settings::parse("[life]\ndelay = \"slow\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/termplay/config.toml"));
        assert!(settings.life.delay.is_none());
    }

    #[test]
    fn config_path_is_namespaced() {
        assert!(Settings::config_path().ends_with("termplay/config.toml"));
    }
}
