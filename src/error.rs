/*
 * Error Module
 *
 * The engine has no runtime failure modes. Everything here is a
 * configuration problem caught before a simulation starts: bad extents or
 * radius, out-of-range tunables, or a scene file that can't be read.
 */

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    NonPositiveExtent { axis: &'static str, value: f32 },
    NonPositivePerceptionRadius(f32),
    // Tunable outside its allowed range (see FlockParams::validate)
    InvalidParam { name: &'static str, value: f32 },
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveExtent { axis, value } => {
                write!(f, "Boundary {} must be finite and positive, got {}", axis, value)
            }
            ConfigError::NonPositivePerceptionRadius(value) => {
                write!(f, "Perception radius must be finite and positive, got {}", value)
            }
            ConfigError::InvalidParam { name, value } => {
                write!(f, "Flock parameter {} is out of range, got {}", name, value)
            }
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
