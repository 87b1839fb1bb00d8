//! Bearer-token authorization: claim types, failure codes, signing-key
//! sources and the gate that ties them together.

pub mod gate;
pub mod jwks;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gate::AuthGate;
pub use jwks::{JwksKeySource, KeySource, StaticKeySource};

/// `aud` may be a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Verified contents of an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Absent claim is an empty permission set
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("{0}")]
    InvalidHeader(String),

    #[error("Unable to find the appropriate key.")]
    UnknownKey(String),

    #[error("Unable to fetch signing keys: {0}")]
    KeysUnavailable(String),

    #[error("Token signature is invalid.")]
    InvalidSignature,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Permission not found.")]
    PermissionDenied(String),
}

impl AuthError {
    /// Machine-readable code rendered in the error body
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::InvalidHeader(_) | AuthError::UnknownKey(_) => "invalid_header",
            AuthError::KeysUnavailable(_) => "jwks_unavailable",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::PermissionDenied(_) => "unauthorized",
        }
    }

    /// 403 rather than 401
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::PermissionDenied(_))
    }
}
