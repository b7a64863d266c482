use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit::WheelSettings;
use orbit::skill::{IconName, SkillName};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Where the wheel centre goes when it is shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[strum(serialize = "cursor", serialize = "pointer", serialize = "mouse")]
    Cursor,
    #[default]
    #[strum(serialize = "center", serialize = "centre", serialize = "c")]
    Center,
    #[strum(serialize = "top-left", serialize = "topleft", serialize = "tl")]
    TopLeft,
    #[strum(serialize = "top-right", serialize = "topright", serialize = "tr")]
    TopRight,
    #[strum(serialize = "bottom-left", serialize = "bottomleft", serialize = "bl")]
    BottomLeft,
    #[strum(serialize = "bottom-right", serialize = "bottomright", serialize = "br")]
    BottomRight,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillConfig {
    pub name: SkillName,
    /// Icon theme name or absolute path. Falls back to the name as text.
    pub icon: Option<IconName>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub skills: Vec<SkillConfig>,
    #[serde(default)]
    pub anchor: Anchor,
    /// Distance of the centre from the screen edges for corner anchors.
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default)]
    pub wheel: WheelSettings,
}

fn default_margin() -> f64 {
    220.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            anchor: Anchor::default(),
            margin: default_margin(),
            wheel: WheelSettings::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// The bundled default config.
    pub fn builtin() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!("Bundled config is invalid: {}", e);
            Self::default()
        })
    }

    /// Borrows the bundled skills when none are configured. Other settings are kept.
    pub fn with_fallback_skills(mut self) -> Self {
        if self.skills.is_empty() {
            log::warn!("Config lists no skills; using bundled skills");
            self.skills = Self::builtin().skills;
        }
        self
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "skillwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("SKILLWHEEL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Writes the default config on first run, then loads whatever is on disk.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Failed to write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c.with_fallback_skills(),
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            Config::builtin()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit::WheelState;

    #[test]
    fn test_anchor_deserialization() {
        let cases = vec![
            ("\"cursor\"", Anchor::Cursor),
            ("\"Mouse\"", Anchor::Cursor),
            ("\"centre\"", Anchor::Center),
            ("\"BR\"", Anchor::BottomRight),
            ("\"top-left\"", Anchor::TopLeft),
            ("\"TopRight\"", Anchor::TopRight),
        ];

        for (json, expected) in cases {
            let deserialized: Anchor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_builtin_config_parses() {
        let config = Config::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert!(!config.skills.is_empty());
        assert_eq!(config.anchor, Anchor::Center);
    }

    #[test]
    fn test_empty_skill_list_uses_bundled_skills() {
        let config = Config::from_toml_str(
            r#"
            anchor = "cursor"
            skills = []

            [wheel]
            duration_ms = 100
            "#,
        )
        .unwrap()
        .with_fallback_skills();

        assert_eq!(config.skills.len(), Config::builtin().skills.len());
        assert!(!config.skills.is_empty());
        assert_eq!(config.anchor, Anchor::Cursor);
        assert_eq!(config.wheel.duration_ms, 100);

        let own = Config {
            skills: vec![SkillConfig {
                name: SkillName::new("Blink"),
                icon: None,
            }],
            ..Default::default()
        }
        .with_fallback_skills();
        assert_eq!(own.skills.len(), 1);
    }

    #[test]
    fn test_wheel_section_overrides() {
        let config = Config::from_toml_str(
            r#"
            anchor = "bottom-right"

            [[skills]]
            name = "Fireball"
            icon = "weather-clear"

            [[skills]]
            name = "Blink"

            [wheel]
            duration_ms = 400
            highlight_angle = 135.0
            initial_state = "expanded"
            toggle_mode = "ccw"

            [wheel.expanded]
            radius = 180.0
            angles = [135.0, 180.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.anchor, Anchor::BottomRight);
        assert_eq!(config.margin, 220.0);
        assert_eq!(config.skills.len(), 2);
        assert_eq!(config.skills[1].icon, None);
        assert_eq!(config.wheel.duration_ms, 400);
        assert_eq!(config.wheel.initial_state, WheelState::Expanded);
        assert_eq!(config.wheel.toggle_mode, orbit::RotationMode::ForceCounterClockwise);
        assert_eq!(config.wheel.expanded.radius, Some(180.0));
        assert_eq!(config.wheel.expanded.angles, Some(vec![135.0, 180.0]));
        assert_eq!(config.wheel.contracted.radius, None);
    }
}
