use std::str::FromStr;

use anyhow::{Context, anyhow};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/userdb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so parsing does not
    /// depend on the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = parse_or(&lookup, "PORT", 3000)?;

        let store = lookup("USER_STORE").unwrap_or_else(|| "postgres".into());
        let storage = match store.trim().to_ascii_lowercase().as_str() {
            "postgres" => StorageConfig::Postgres {
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(anyhow!(
                    "invalid USER_STORE {other:?}: expected \"postgres\" or \"memory\""
                ));
            }
        };

        Ok(Self {
            host,
            port,
            storage,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}
