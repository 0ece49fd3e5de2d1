use brain_train::Difficulty;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "brain-train";
const CONFIG_FILE: &str = "userconfig.cfg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub last_difficulty: Option<Difficulty>,
    pub window_width: f32,
    pub window_height: f32,
    pub dark_mode: bool,
    pub log_level: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            last_difficulty: None,
            window_width: 1366.0,
            window_height: 768.0,
            dark_mode: true,
            log_level: "info".to_string(),
        }
    }
}

impl UserConfig {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn load() -> Self {
        let config_path = Self::path();
        match fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Self::default(),
        }
    }

    fn from_json(contents: &str) -> Self {
        serde_json::from_str(contents).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config: {}", e);
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn remember_difficulty(&mut self, difficulty: Difficulty) {
        self.last_difficulty = Some(difficulty);
        if let Err(e) = self.save() {
            log::warn!("Could not save config: {}", e);
        }
    }
}
