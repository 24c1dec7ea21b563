//! Configuration file management.
//!
//! Handles loading and saving user preferences to `~/.showreel.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_TRACK: &str = "assets/background.mp3";
const DEFAULT_VOLUME: f32 = 0.5;
const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.4;
const DEFAULT_SCROLL_SPEED: f32 = 48.0;

const CONFIG_TEMPLATE: &str = r#"# showreel configuration file

# Background music track, looped forever (default: assets/background.mp3)
# track = "assets/background.mp3"

# Volume the track unlocks to on the first interaction (default: 0.5)
# volume = 0.5

# Fraction of a showcase card that must be on screen before its clip
# plays (default: 0.4)
# visibility_threshold = 0.4

# Pixels scrolled per mouse-wheel line (default: 48)
# scroll_speed = 48.0
"#;

#[derive(Serialize, Deserialize, Default)]
pub struct Config {
    pub track: Option<String>,
    pub volume: Option<f32>,
    pub visibility_threshold: Option<f32>,
    pub scroll_speed: Option<f32>,
}

impl Config {
    fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".showreel.toml"))
    }

    pub fn load() -> Self {
        let path = match Self::path() {
            Some(p) => p,
            None => return Self::default(),
        };

        // Create template file if it doesn't exist
        if !path.exists() {
            let _ = fs::write(&path, CONFIG_TEMPLATE);
            println!("Created config template at {:?}", path);
        }

        fs::read_to_string(&path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn track_path(&self) -> PathBuf {
        PathBuf::from(self.track.as_deref().unwrap_or(DEFAULT_TRACK))
    }

    pub fn volume(&self) -> f32 {
        self.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0)
    }

    pub fn visibility_threshold(&self) -> f32 {
        self.visibility_threshold
            .unwrap_or(DEFAULT_VISIBILITY_THRESHOLD)
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed.unwrap_or(DEFAULT_SCROLL_SPEED)
    }
}
