//! JWT issuing and verification
//!
//! Access tokens name a user. Refresh tokens name a user and a device
//! session; their `iat` is the issue time stored on that session, which is
//! how a replayed refresh token is told apart from the current one.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Value of the `typ` claim; keeps one kind of token from passing as the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims of a bearer access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenKind,
}

impl AccessClaims {
    #[inline]
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Claims of a refresh token bound to one device session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub device_id: Uuid,
    /// Whole seconds, compared against the session's recorded issue time
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenKind,
}

impl RefreshClaims {
    #[inline]
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Tokens handed out at login and on every refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Signs and verifies HS256 tokens with one shared secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    /// Lifetimes are in seconds
    #[must_use]
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Lifetime of refresh tokens and therefore of device sessions
    #[must_use]
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_ttl_secs)
    }

    /// Issue a fresh access token and a refresh token for the session
    /// lineage that starts at `issued_at`
    pub fn generate_token_pair(
        &self,
        user_id: Uuid,
        device_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        let now = Utc::now().timestamp();
        let access = AccessClaims {
            sub: user_id,
            iat: now,
            exp: now + self.access_ttl_secs,
            typ: TokenKind::Access,
        };

        let iat = issued_at.timestamp();
        let refresh = RefreshClaims {
            sub: user_id,
            device_id,
            iat,
            exp: iat + self.refresh_ttl_secs,
            typ: TokenKind::Refresh,
        };

        Ok(TokenPair {
            access_token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
            refresh_expires_in: self.refresh_ttl_secs,
        })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims: AccessClaims = self.verify(token)?;
        if claims.typ != TokenKind::Access {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let claims: RefreshClaims = self.verify(token)?;
        if claims.typ != TokenKind::Refresh {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to sign JWT: {e}")))
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<C>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}
