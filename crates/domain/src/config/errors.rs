#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read cache configuration '{path}': {reason}")]
    FileRead { path: String, reason: String },

    #[error("Cannot write cache configuration '{path}': {reason}")]
    FileWrite { path: String, reason: String },

    #[error("Invalid TOML in cache configuration: {0}")]
    Parse(String),

    #[error("Cannot serialize cache configuration: {0}")]
    Serialize(String),

    /// `setting` is the dotted key as written in the TOML file.
    #[error("Invalid setting `{setting}`: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// The offending setting, for validation failures.
    pub fn setting(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidSetting { setting, .. } => Some(*setting),
            _ => None,
        }
    }
}
