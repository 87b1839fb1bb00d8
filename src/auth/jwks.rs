//! Signing-key lookup by `kid`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::AuthError;

/// Unknown kids do not trigger a refetch more often than this
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Resolves the key that verifies tokens carrying `kid`
#[async_trait]
pub trait KeySource: Send + Sync {
    /// `Ok(None)` when no key with that id is published
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError>;
}

/// Usable keys of a published set, by kid. Entries without a kid or with
/// unsupported parameters are skipped.
pub fn keys_from_set(set: &JwkSet) -> HashMap<String, DecodingKey> {
    set.keys
        .iter()
        .filter_map(|jwk| {
            let kid = jwk.common.key_id.clone()?;
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => Some((kid, key)),
                Err(e) => {
                    debug!(kid = %kid, error = %e, "Skipping unusable JWK");
                    None
                }
            }
        })
        .collect()
}

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Fetches the identity provider's JWKS document and caches it for `ttl`.
pub struct JwksKeySource {
    client: reqwest::Client,
    url: Url,
    ttl: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl JwksKeySource {
    pub fn new(url: Url, ttl: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), url, ttl)
    }

    pub fn with_client(client: reqwest::Client, url: Url, ttl: Duration) -> Self {
        Self {
            client,
            url,
            ttl,
            cache: RwLock::new(None),
        }
    }

    async fn fetch(&self) -> Result<HashMap<String, DecodingKey>, AuthError> {
        let unavailable = |e: reqwest::Error| {
            warn!(url = %self.url, error = %e, "JWKS fetch failed");
            AuthError::KeysUnavailable(e.to_string())
        };
        let set: JwkSet = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        let keys = keys_from_set(&set);
        info!(url = %self.url, keys = keys.len(), "Fetched signing keys");
        Ok(keys)
    }
}

#[async_trait]
impl KeySource for JwksKeySource {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                let age = cached.fetched_at.elapsed();
                if age < self.ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(Some(key.clone()));
                    }
                    if age < MIN_REFRESH_INTERVAL {
                        return Ok(None);
                    }
                }
            }
        }

        let mut cache = self.cache.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < MIN_REFRESH_INTERVAL {
                return Ok(cached.keys.get(kid).cloned());
            }
        }
        let keys = self.fetch().await?;
        let key = keys.get(kid).cloned();
        *cache = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });
        Ok(key)
    }
}

/// Fixed HMAC keys by kid, for tests and local development
#[derive(Clone, Default)]
pub struct StaticKeySource {
    keys: HashMap<String, DecodingKey>,
}

impl StaticKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, kid: impl Into<String>, secret: &[u8]) -> Self {
        self.keys.insert(kid.into(), DecodingKey::from_secret(secret));
        self
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        Ok(self.keys.get(kid).cloned())
    }
}
