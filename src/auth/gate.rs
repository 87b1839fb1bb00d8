use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::jwks::KeySource;
use super::{AuthError, Claims};
use crate::config::AuthConfig;

/// Verifies bearer tokens against the identity provider's keys and checks
/// the route's permission.
pub struct AuthGate {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
}

impl AuthGate {
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        algorithms: Vec<Algorithm>,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms,
        }
    }

    pub fn from_config(config: &AuthConfig, keys: Arc<dyn KeySource>) -> Self {
        Self::new(keys, config.issuer(), config.audience.clone(), config.algorithms.clone())
    }

    /// Token part of an `Authorization: Bearer <token>` header
    pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
        let raw = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
        let value = raw
            .to_str()
            .map_err(|_| AuthError::InvalidHeader("Authorization header is not valid text.".into()))?;

        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
            (Some(scheme), None, None) if scheme.eq_ignore_ascii_case("bearer") => {
                Err(AuthError::InvalidHeader("Token not found.".into()))
            }
            (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
                AuthError::InvalidHeader("Authorization header must start with \"Bearer\".".into()),
            ),
            _ => Err(AuthError::InvalidHeader(
                "Authorization header must be bearer token.".into(),
            )),
        }
    }

    /// Check signature, expiry, issuer and audience
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::InvalidHeader("Unable to parse authentication token.".into()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidHeader("Authorization malformed.".into()))?;
        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::InvalidHeader(format!(
                "Algorithm {:?} is not accepted.",
                header.alg
            )));
        }

        let key = self
            .keys
            .decoding_key(&kid)
            .await?
            .ok_or(AuthError::UnknownKey(kid))?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::InvalidHeader("Unable to parse authentication token.".into()),
        })?;
        Ok(data.claims)
    }

    /// Full gate: header, token, then permission
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = Self::bearer_token(headers)?;
        let claims = self.verify(token).await?;
        if !claims.has_permission(permission) {
            return Err(AuthError::PermissionDenied(permission.to_string()));
        }
        Ok(claims)
    }
}
