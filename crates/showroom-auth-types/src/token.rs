//! JWT access-token issue and validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use showroom_domain::user::UserRole;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub session_id: i64,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// Errors returned while issuing or validating tokens.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token encoding failed")]
    Encoding,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id (decimal string) |
/// | `username` | custom | login name at issue time |
/// | `email` | custom | email at issue time |
/// | `role` | custom | [`UserRole`] wire name |
/// | `sid` | custom | session row id |
/// | `iat` | `iat` | issued at, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub sid: i64,
    pub iat: u64,
    pub exp: u64,
}

impl JwtClaims {
    fn into_info(self) -> Result<TokenInfo, AuthError> {
        let user_id = self.sub.parse::<i64>().map_err(|_| AuthError::Malformed)?;
        Ok(TokenInfo {
            user_id,
            username: self.username,
            email: self.email,
            role: self.role,
            session_id: self.sid,
            issued_at: self.iat,
            expires_at: self.exp,
        })
    }
}

fn decode_jwt(token: &str, secret: &str, check_exp: bool) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = check_exp;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access token (signature and expiry) and return the identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    decode_jwt(token, secret, true)?.into_info()
}

// ── Issuer only ──────────────────────────────────────────────────────────────

/// Everything the issuer stamps into a new token.
#[cfg(any(feature = "ISSUER", test))]
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    pub user_id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub role: UserRole,
    pub session_id: i64,
}

/// Sign a token valid for `ttl_secs` from `now`. Returns the token and its
/// expiry.
#[cfg(any(feature = "ISSUER", test))]
pub fn issue_token(
    subject: &TokenSubject<'_>,
    secret: &str,
    now: u64,
    ttl_secs: u64,
) -> Result<(String, u64), AuthError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = now + ttl_secs;
    let claims = JwtClaims {
        sub: subject.user_id.to_string(),
        username: subject.username.to_owned(),
        email: subject.email.to_owned(),
        role: subject.role,
        sid: subject.session_id,
        iat: now,
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Encoding)?;
    Ok((token, exp))
}

/// Validate the signature only. The refresh flow accepts expired tokens and
/// re-checks the session instead.
#[cfg(any(feature = "ISSUER", test))]
pub fn decode_ignoring_expiry(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    decode_jwt(token, secret, false)?.into_info()
}
