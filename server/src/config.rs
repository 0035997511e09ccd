//! Server configuration parsed from environment variables.
//!
//! Called once at startup after `.env` has been loaded. The backend URL and
//! anon key are public values: they are rendered into the SSR shell for the
//! browser client and never used by the server itself.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::net::supabase::SupabaseConfig;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: SupabaseConfig,
    /// Overrides the Leptos site root (where `/pkg` assets are built).
    pub site_root: Option<String>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_ROOT`: default from `[package.metadata.leptos]`
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] for an unset or blank required variable,
    /// [`ConfigError::Invalid`] for a non-numeric `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match non_blank("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let url = non_blank("SUPABASE_URL").ok_or(ConfigError::Missing { var: "SUPABASE_URL" })?;
        let anon_key = non_blank("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing { var: "SUPABASE_ANON_KEY" })?;

        Ok(Self { port, backend: SupabaseConfig::new(url, anon_key), site_root: non_blank("SITE_ROOT") })
    }
}

fn non_blank(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
