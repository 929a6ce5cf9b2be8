use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ViewfinderConfig {
    pub prompt: PromptConfig,
    pub zoom: ZoomConfig,
    pub layout: LayoutConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptConfig {
    /// Application name embedded in permission and error prompts
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Delay before audio permission prompts are cleared
    #[serde(default = "default_auto_clear_seconds")]
    pub auto_clear_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ZoomConfig {
    /// Zoom ceiling used until the camera reports its own
    #[serde(default = "default_max_zoom_scale")]
    pub max_zoom_scale: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LayoutConfig {
    /// Distance of the shutter center from the trailing or bottom edge
    #[serde(default = "default_shutter_inset")]
    pub shutter_inset: f64,

    /// Distance of the switch and torch centers from their corners
    #[serde(default = "default_corner_inset")]
    pub corner_inset: f64,

    /// Horizontal distance of the cancel center from the leading edge
    #[serde(default = "default_cancel_inset_x")]
    pub cancel_inset_x: f64,

    /// Vertical distance of the cancel center from the bottom edge
    #[serde(default = "default_cancel_inset_y")]
    pub cancel_inset_y: f64,

    /// Distance of the text prompt center from the top edge
    #[serde(default = "default_prompt_inset")]
    pub prompt_inset: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Event bus capacity
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl PromptConfig {
    pub fn auto_clear_delay(&self) -> Duration {
        Duration::from_secs(self.auto_clear_seconds)
    }
}

impl ViewfinderConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("viewfinder.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("prompt.app_name", default_app_name())?
            .set_default("prompt.auto_clear_seconds", default_auto_clear_seconds())?
            .set_default("zoom.max_zoom_scale", default_max_zoom_scale() as f64)?
            .set_default("layout.shutter_inset", default_shutter_inset())?
            .set_default("layout.corner_inset", default_corner_inset())?
            .set_default("layout.cancel_inset_x", default_cancel_inset_x())?
            .set_default("layout.cancel_inset_y", default_cancel_inset_y())?
            .set_default("layout.prompt_inset", default_prompt_inset())?
            .set_default(
                "system.event_bus_capacity",
                default_event_bus_capacity() as i64,
            )?
            .add_source(File::with_name(&path_str).required(false))
            // e.g. VIEWFINDER_PROMPT__APP_NAME; `__` keeps field names with underscores intact
            .add_source(
                Environment::with_prefix("VIEWFINDER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ViewfinderConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.app_name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Prompt app_name must not be empty".to_string(),
            ));
        }

        if self.prompt.auto_clear_seconds == 0 {
            return Err(ConfigError::Message(
                "Prompt auto_clear_seconds must be greater than 0".to_string(),
            ));
        }

        if !(self.zoom.max_zoom_scale >= 1.0) {
            return Err(ConfigError::Message(
                "Zoom max_zoom_scale must be at least 1.0".to_string(),
            ));
        }

        let insets = [
            ("shutter_inset", self.layout.shutter_inset),
            ("corner_inset", self.layout.corner_inset),
            ("cancel_inset_x", self.layout.cancel_inset_x),
            ("cancel_inset_y", self.layout.cancel_inset_y),
            ("prompt_inset", self.layout.prompt_inset),
        ];
        for (name, value) in insets {
            if !(value >= 0.0) {
                return Err(ConfigError::Message(format!(
                    "Layout {} must not be negative",
                    name
                )));
            }
        }

        if self.system.event_bus_capacity == 0 {
            return Err(ConfigError::Message(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Render this configuration as TOML
    pub fn to_toml(&self) -> crate::error::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ViewfinderConfig {
    fn default() -> Self {
        Self {
            prompt: PromptConfig {
                app_name: default_app_name(),
                auto_clear_seconds: default_auto_clear_seconds(),
            },
            zoom: ZoomConfig {
                max_zoom_scale: default_max_zoom_scale(),
            },
            layout: LayoutConfig::default(),
            system: SystemConfig {
                event_bus_capacity: default_event_bus_capacity(),
            },
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shutter_inset: default_shutter_inset(),
            corner_inset: default_corner_inset(),
            cancel_inset_x: default_cancel_inset_x(),
            cancel_inset_y: default_cancel_inset_y(),
            prompt_inset: default_prompt_inset(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "Viewfinder".to_string()
}
fn default_auto_clear_seconds() -> u64 {
    2
}
fn default_max_zoom_scale() -> f32 {
    5.0
}
fn default_shutter_inset() -> f64 {
    45.0
}
fn default_corner_inset() -> f64 {
    25.0
}
fn default_cancel_inset_x() -> f64 {
    55.0
}
fn default_cancel_inset_y() -> f64 {
    45.0
}
fn default_prompt_inset() -> f64 {
    45.0
}
fn default_event_bus_capacity() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ViewfinderConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.prompt.auto_clear_delay(), Duration::from_secs(2));
        assert_eq!(config.zoom.max_zoom_scale, 5.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[prompt]\napp_name = \"Lens\"\n\n[zoom]\nmax_zoom_scale = 3.0\n"
        )
        .unwrap();

        let config = ViewfinderConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.prompt.app_name, "Lens");
        assert_eq!(config.prompt.auto_clear_seconds, 2);
        assert_eq!(config.zoom.max_zoom_scale, 3.0);
        assert_eq!(config.layout.corner_inset, 25.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewfinderConfig::load_from_file(dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.prompt.app_name, "Viewfinder");
        assert_eq!(config.system.event_bus_capacity, 100);
    }

    #[test]
    fn test_env_override_uses_double_underscore_between_section_and_field() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("VIEWFINDER_LAYOUT__PROMPT_INSET", "60");

        let config = ViewfinderConfig::load_from_file(dir.path().join("absent.toml"));
        std::env::remove_var("VIEWFINDER_LAYOUT__PROMPT_INSET");

        let config = config.unwrap();
        assert_eq!(config.layout.prompt_inset, 60.0);
        assert_eq!(config.layout.corner_inset, 25.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ViewfinderConfig::default();

        config.zoom.max_zoom_scale = 0.5;
        assert!(config.validate().is_err());
        config.zoom.max_zoom_scale = 1.0;
        assert!(config.validate().is_ok());

        config.prompt.auto_clear_seconds = 0;
        assert!(config.validate().is_err());
        config.prompt.auto_clear_seconds = 2;

        config.layout.shutter_inset = -1.0;
        assert!(config.validate().is_err());
        config.layout.shutter_inset = 45.0;

        config.prompt.app_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_sections() {
        let rendered = ViewfinderConfig::default().to_toml().unwrap();

        assert!(rendered.contains("[prompt]"));
        assert!(rendered.contains("[layout]"));
        let parsed: ViewfinderConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.layout.cancel_inset_x, 55.0);
    }
}
