mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    API_TOKEN_ENV, API_URL_ENV, DISABLE_UPDATE_CHECKER_ENV, apply_env_overrides, load_config,
    load_file, redacted, validate,
};
pub use types::ClientConfig;
