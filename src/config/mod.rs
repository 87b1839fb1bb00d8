use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Required unless the server runs against the in-memory store
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity provider domain, e.g. `tenant.us.auth0.com`
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    /// Overrides `<issuer>.well-known/jwks.json`
    pub jwks_url: Option<String>,
    pub jwks_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Auth overrides
        if let Some(v) = lookup("AUTH0_DOMAIN") {
            self.auth.domain = v;
        }
        if let Some(v) = lookup("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Some(v) = lookup("AUTH_ALGORITHMS") {
            self.auth.algorithms = parse_algorithms(&v)?;
        }
        if let Some(v) = lookup("AUTH_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Some(v) = lookup("AUTH_JWKS_TTL_SECS") {
            self.auth.jwks_ttl_secs = v.parse().unwrap_or(self.auth.jwks_ttl_secs);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            auth: AuthConfig {
                domain: "localhost".to_string(),
                audience: "triptych".to_string(),
                algorithms: vec![Algorithm::RS256],
                jwks_url: None,
                jwks_ttl_secs: 300,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            auth: AuthConfig {
                domain: "staging.example.com".to_string(),
                audience: "triptych".to_string(),
                algorithms: vec![Algorithm::RS256],
                jwks_url: None,
                jwks_ttl_secs: 600,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            auth: AuthConfig {
                domain: "app.example.com".to_string(),
                audience: "triptych".to_string(),
                algorithms: vec![Algorithm::RS256],
                jwks_url: None,
                jwks_ttl_secs: 3600,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl AuthConfig {
    /// Expected `iss` claim: `https://<domain>/`. A domain that already
    /// carries a scheme is used as given.
    pub fn issuer(&self) -> String {
        let base = if self.domain.contains("://") {
            self.domain.clone()
        } else {
            format!("https://{}", self.domain)
        };
        if base.ends_with('/') {
            base
        } else {
            format!("{}/", base)
        }
    }

    pub fn jwks_url(&self) -> Result<Url, ConfigError> {
        match &self.jwks_url {
            Some(raw) => Url::parse(raw).map_err(|_| ConfigError::InvalidUrl("AUTH_JWKS_URL")),
            None => Url::parse(&self.issuer())
                .and_then(|issuer| issuer.join(".well-known/jwks.json"))
                .map_err(|_| ConfigError::InvalidUrl("AUTH0_DOMAIN")),
        }
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            Algorithm::from_str(name).map_err(|_| ConfigError::InvalidValue {
                key: "AUTH_ALGORITHMS",
                value: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if algorithms.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "AUTH_ALGORITHMS",
            value: raw.to_string(),
        });
    }
    Ok(algorithms)
}

/// Lookup over a fixed map, for tests and tools
pub fn map_lookup(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |key| vars.get(key).cloned()
}
