use thiserror::Error;

/// Why a Pressroom configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `PRESS_*` variable did not fit the config shape.
    #[error("failed to load press config: {0}")]
    Load(#[from] figment::Error),

    /// A section needed by the requested command has no credentials.
    #[error("[{section}] has no credentials; set {env_key} or add them to .press/config.toml")]
    NotConfigured {
        section: &'static str,
        env_key: &'static str,
    },

    #[error("{field} {reason}")]
    InvalidValue { field: &'static str, reason: &'static str },
}
