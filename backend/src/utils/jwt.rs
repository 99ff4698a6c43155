//! JWT token utilities for authentication and authorization.
//!
//! Issues the signed session credential at login/registration and verifies it
//! on every later request. Verification is pure CPU work: a signature check
//! plus a timestamp comparison, with no I/O.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::Role;
use crate::errors::{AuthError, ServiceError};

/// JWT Claims structure carried by the session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Display name
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Token issued at timestamp (seconds since epoch)
    pub iat: i64,
    /// Token expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// Verified identity and role extracted from a credential.
///
/// Only [`JwtUtils::verify`] constructs one from a token, and only after the
/// signature and expiry checks pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: String,
    pub role: Role,
}

/// Identity of an authenticated user, as embedded in a new credential.
#[derive(Debug, Clone, Copy)]
pub struct Identity<'a> {
    pub subject_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from a signing secret and token lifetime.
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced by `verify` with a strict `now < exp` comparison.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_seconds.min(u32::MAX as u64) as i64),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expires_in_seconds)
    }

    /// Mint a credential for `identity` valid from `issued_at` for the configured lifetime.
    pub fn issue(
        &self,
        identity: Identity<'_>,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let exp = issued_at + self.ttl;

        let claims = Claims {
            sub: identity.subject_id.to_string(),
            name: identity.name.to_string(),
            email: identity.email.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Generate a new JWT token issued now.
    pub fn generate_token(&self, identity: Identity<'_>, role: Role) -> Result<String, ServiceError> {
        self.issue(identity, role, Utc::now())
    }

    /// Verify a credential as of `now`.
    ///
    /// Bad signature, malformed payload and expiry all yield
    /// `AuthError::InvalidCredential`. A credential presented at exactly its
    /// expiry second is expired.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AuthError::InvalidCredential
            })?;

        if now.timestamp() >= claims.exp {
            tracing::debug!("Token expired at {}", claims.exp);
            return Err(AuthError::InvalidCredential);
        }

        Ok(Principal {
            subject_id: claims.sub,
            role: claims.role,
        })
    }

    /// Validate and decode a JWT token against the current clock.
    pub fn validate_token(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify(token, Utc::now())
    }
}

impl Principal {
    pub fn user_id(&self) -> &str {
        &self.subject_id
    }

    /// Check if user has specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn identity() -> Identity<'static> {
        Identity {
            subject_id: "0190c6f1-7b2a-7c3e-9a41-3f7a0c1d2e3f",
            name: "Ada Student",
            email: "ada@example.com",
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let jwt = JwtUtils::new(SECRET, 86400);

        for role in [Role::Student, Role::Teacher] {
            let token = jwt.generate_token(identity(), role).unwrap();
            let principal = jwt.validate_token(&token).unwrap();

            assert_eq!(
                principal,
                Principal {
                    subject_id: identity().subject_id.to_string(),
                    role,
                }
            );
        }
    }

    #[test]
    fn test_claims_embed_identity_and_window() {
        let jwt = JwtUtils::new(SECRET, 3600);
        let issued_at = Utc::now();
        let token = jwt.issue(identity(), Role::Student, issued_at).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(SECRET), &validation)
            .unwrap()
            .claims;

        assert_eq!(claims.name, "Ada Student");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtUtils::new(b"secret-A", 86400);
        let verifier = JwtUtils::new(b"secret-B", 86400);

        let token = issuer.generate_token(identity(), Role::Teacher).unwrap();
        assert_eq!(
            verifier.validate_token(&token),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtUtils::new(SECRET, 86400);
        let issued_at = Utc::now() - Duration::days(2);

        let token = jwt.issue(identity(), Role::Student, issued_at).unwrap();
        assert_eq!(jwt.validate_token(&token), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_expiry_instant_is_exclusive() {
        let jwt = JwtUtils::new(SECRET, 60);
        let issued_at = Utc::now();
        let token = jwt.issue(identity(), Role::Student, issued_at).unwrap();

        assert!(jwt.verify(&token, issued_at + Duration::seconds(59)).is_ok());
        assert_eq!(
            jwt.verify(&token, issued_at + Duration::seconds(60)),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let jwt = JwtUtils::new(SECRET, 86400);

        assert_eq!(jwt.validate_token(""), Err(AuthError::InvalidCredential));
        assert_eq!(
            jwt.validate_token("not.a.token"),
            Err(AuthError::InvalidCredential)
        );

        // Correctly signed, but the role is not one we know.
        #[derive(Serialize)]
        struct Foreign<'a> {
            sub: &'a str,
            name: &'a str,
            email: &'a str,
            role: &'a str,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &Foreign {
                sub: "u1",
                name: "Eve",
                email: "eve@example.com",
                role: "admin",
                iat: now,
                exp: now + 600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(jwt.validate_token(&token), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_token_without_expiry_rejected() {
        #[derive(Serialize)]
        struct NoExp<'a> {
            sub: &'a str,
            role: &'a str,
        }
        let jwt = JwtUtils::new(SECRET, 86400);
        let token = encode(
            &Header::default(),
            &NoExp {
                sub: "u1",
                role: "student",
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(jwt.validate_token(&token), Err(AuthError::InvalidCredential));
    }
}
