//! Engine configuration.

use std::env;

use crate::input::ControlScheme;
use crate::types::{ConfigError, Viewport, FRAME_RATE_HZ};

/// Settings fixed for the lifetime of an engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Window size in tiles.
    pub viewport: Viewport,
    pub controls: ControlScheme,
    /// Strip every style token from composed frames and text.
    pub monochrome: bool,
    /// Append inventory labels to the right of the map.
    pub show_inventory: bool,
    pub frame_rate_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            controls: ControlScheme::default(),
            monochrome: false,
            show_inventory: true,
            frame_rate_hz: FRAME_RATE_HZ,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TILES_CONTROLS` - five keys: forward, left, backward, right, interact (default: `wasde`)
    /// - `TILES_QUIT_KEY` - quit key (default: `q`)
    /// - `TILES_HELP_KEY` - help key (default: `h`)
    /// - `TILES_VIEWPORT` - `WIDTHxHEIGHT` in tiles (default: `21x13`)
    /// - `TILES_MONOCHROME` - `true`/`false` (default: `false`)
    /// - `TILES_INVENTORY` - show the inventory overlay (default: `true`)
    /// - `TILES_FPS` - frame cap in Hz (default: 15)
    ///
    /// Unset variables keep their defaults; malformed ones are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let controls = lookup("TILES_CONTROLS");
        let quit = read_key(&lookup, "TILES_QUIT_KEY")?;
        let help = read_key(&lookup, "TILES_HELP_KEY")?;
        if controls.is_some() || quit.is_some() || help.is_some() {
            let defaults = config.controls;
            let keys: String = defaults.keys().iter().collect();
            config.controls = ControlScheme::new(
                controls.as_deref().unwrap_or(&keys),
                quit.unwrap_or(defaults.quit_key()),
                help.unwrap_or(defaults.help_key()),
            )?;
        }

        if let Some(raw) = lookup("TILES_VIEWPORT") {
            config.viewport = Viewport::parse(&raw)
                .ok_or(ConfigError::InvalidEnv {
                    key: "TILES_VIEWPORT",
                    value: raw.clone(),
                })?
                .validate()?;
        }

        if let Some(flag) = read_flag(&lookup, "TILES_MONOCHROME")? {
            config.monochrome = flag;
        }
        if let Some(flag) = read_flag(&lookup, "TILES_INVENTORY")? {
            config.show_inventory = flag;
        }

        if let Some(raw) = lookup("TILES_FPS") {
            let hz: u32 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "TILES_FPS",
                value: raw.clone(),
            })?;
            if hz == 0 {
                return Err(ConfigError::ZeroFrameRate);
            }
            config.frame_rate_hz = hz;
        }

        Ok(config)
    }
}

fn read_key<F>(lookup: &F, key: &'static str) -> Result<Option<char>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(ConfigError::InvalidEnv { key, value: raw }),
    }
}

fn read_flag<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidEnv { key, value: raw }),
    }
}
