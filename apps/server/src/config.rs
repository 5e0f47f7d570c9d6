use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Context};
use axum::http::HeaderValue;
use eventbite_core::access::MasterCredentials;
use rand::{rngs::OsRng, RngCore};

use crate::auth::decode_secret_key;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/eventbite.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_TOKEN_TTL_SECS: u64 = 43_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// 32-byte key used to sign admin tokens
    pub secret_key: Vec<u8>,
    pub token_ttl: Duration,
    pub master: Option<MasterCredentials>,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads the configuration from the process environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = var("EB_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid EB_LISTEN_ADDR")?;

        let db_path = var("EB_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());

        let cors_allow: Vec<String> = var("EB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_allow.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin)
                .map_err(|_| anyhow!("Invalid origin in EB_CORS_ALLOW_ORIGINS: {origin}"))?;
        }

        let timeout_ms = parse_u64(var("EB_REQUEST_TIMEOUT_MS"), "EB_REQUEST_TIMEOUT_MS")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        let secret_key = match var("EB_SECRET_KEY") {
            Some(raw) => decode_secret_key(&raw).context("Invalid EB_SECRET_KEY")?,
            None => {
                // Tokens then only survive until the process restarts.
                let mut bytes = vec![0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };

        let ttl_secs = parse_u64(var("EB_ADMIN_TOKEN_TTL_SECS"), "EB_ADMIN_TOKEN_TTL_SECS")?
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if ttl_secs == 0 {
            bail!("EB_ADMIN_TOKEN_TTL_SECS must be greater than zero");
        }

        let master = match (var("EB_MASTER_USERNAME"), var("EB_MASTER_PASSWORD_HASH")) {
            (Some(username), Some(password_hash)) => Some(MasterCredentials {
                username: username.trim().to_string(),
                password_hash: password_hash.trim().to_string(),
            }),
            (None, None) => None,
            _ => bail!("EB_MASTER_USERNAME and EB_MASTER_PASSWORD_HASH must be set together"),
        };

        let log_format = match var("EB_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) => bail!("Invalid EB_LOG_FORMAT '{raw}', expected 'text' or 'json'"),
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key,
            token_ttl: Duration::from_secs(ttl_secs),
            master,
            log_format,
        })
    }
}

fn parse_u64(raw: Option<String>, key: &str) -> anyhow::Result<Option<u64>> {
    raw.map(|v| {
        v.trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid {key}: '{v}'"))
    })
    .transpose()
}
