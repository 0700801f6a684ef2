//! JWT access tokens for the back-office endpoints.
//!
//! Tokens are HS256-signed, carry a [`Claims`] payload and must name
//! [`TOKEN_ISSUER`] as their issuer. This service only verifies them;
//! [`generate_access_token`] exists for operators minting a token out of band
//! and for tests.

use contact_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `iss` claim required on every accepted token.
pub const TOKEN_ISSUER: &str = "contact-api";

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Staff member id in the identity provider.
    pub sub: DbId,
    /// `"admin"`, `"staff"`, or any role the identity provider issues.
    pub role: String,
    pub iss: String,
    /// Expiry, Unix seconds.
    pub exp: i64,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Token id, logged when a request is rejected.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with whoever mints tokens.
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the expiry is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be an integer"),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation
    }
}

/// Mint a signed token for `staff_id` with the given role.
pub fn generate_access_token(
    staff_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: staff_id,
        role: role.to_owned(),
        iss: TOKEN_ISSUER.to_owned(),
        exp: issued_at + config.access_token_expiry_mins * 60,
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry, and issuer, and return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_at(offset_secs: i64, issuer: &str) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: 1,
            role: "staff".into(),
            iss: issuer.into(),
            exp: now + offset_secs,
            iat: now + offset_secs - 900,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn minted_token_validates() {
        let config = config("contact-test-secret");
        let token = generate_access_token(7, "staff", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Beyond the default 60 s leeway.
        let token = sign(&claims_at(-300, TOKEN_ISSUER), "s3cret");
        assert!(validate_token(&token, &config("s3cret")).is_err());
    }

    #[test]
    fn token_from_another_issuer_is_rejected() {
        let token = sign(&claims_at(600, "someone-else"), "s3cret");
        assert!(validate_token(&token, &config("s3cret")).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = generate_access_token(1, "admin", &config("secret-alpha")).unwrap();
        assert!(validate_token(&token, &config("secret-bravo")).is_err());
    }
}
