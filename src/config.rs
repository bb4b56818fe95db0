use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_USE_SPECIAL_ATTACK: bool = true;
pub const DEFAULT_MIN_HEALTH_TO_EAT: i32 = 31;
pub const DEFAULT_MAX_COMBAT_LEVEL: i32 = 97;
pub const DEFAULT_MIN_COMBAT_LEVEL: i32 = 67;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("combat level range {min}-{max} is empty")]
    EmptyLevelRange { min: i32, max: i32 },
    #[error("health threshold {0} is outside 0-100")]
    HealthOutOfRange(i32),
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session tunables. Read once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub use_special_attack: bool,
    /// Eat when health drops below this percentage.
    pub min_health_to_eat: i32,
    pub min_combat_level: i32,
    pub max_combat_level: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_special_attack: DEFAULT_USE_SPECIAL_ATTACK,
            min_health_to_eat: DEFAULT_MIN_HEALTH_TO_EAT,
            min_combat_level: DEFAULT_MIN_COMBAT_LEVEL,
            max_combat_level: DEFAULT_MAX_COMBAT_LEVEL,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Parses `key=value` pairs separated by commas. An empty string yields
    /// the defaults; unknown keys are skipped.
    pub fn from_args(args: &str) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        for pair in args.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key.to_ascii_lowercase().as_str() {
                "usespecial" | "special" => {
                    builder = builder.use_special_attack(parse_value(key, value)?);
                }
                "minhealth" | "health" => {
                    builder = builder.min_health_to_eat(parse_value(key, value)?);
                }
                "maxlevel" | "maxcombat" => {
                    builder = builder.max_combat_level(parse_value(key, value)?);
                }
                "minlevel" | "mincombat" => {
                    builder = builder.min_combat_level(parse_value(key, value)?);
                }
                _ => {}
            }
        }

        builder.build()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.min_combat_level > self.max_combat_level {
            return Err(ConfigError::EmptyLevelRange {
                min: self.min_combat_level,
                max: self.max_combat_level,
            });
        }
        if !(0..=100).contains(&self.min_health_to_eat) {
            return Err(ConfigError::HealthOutOfRange(self.min_health_to_eat));
        }
        info!(
            "Config initialized: health={}, combat range={}-{}, special={}",
            self.min_health_to_eat, self.min_combat_level, self.max_combat_level, self.use_special_attack
        );
        Ok(self)
    }

    pub fn accepts_combat_level(&self, level: i32) -> bool {
        (self.min_combat_level..=self.max_combat_level).contains(&level)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn use_special_attack(mut self, enabled: bool) -> Self {
        self.config.use_special_attack = enabled;
        self
    }

    pub fn min_health_to_eat(mut self, health: i32) -> Self {
        self.config.min_health_to_eat = health;
        self
    }

    pub fn min_combat_level(mut self, level: i32) -> Self {
        self.config.min_combat_level = level;
        self
    }

    pub fn max_combat_level(mut self, level: i32) -> Self {
        self.config.max_combat_level = level;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()
    }
}
