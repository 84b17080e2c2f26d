//! Stateless JWT signing and verification.

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::config::JwtConfig;

/// JWT claims structure.
///
/// Tokens carry only the username and an optional role. They do not
/// expire: sessions end when the client discards the token or the
/// signing secret rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Stateless HS256 token signer/verifier.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Sign a token for the given user.
    pub fn sign(&self, username: &str, role: Option<String>) -> jsonwebtoken::errors::Result<String> {
        let claims = Claims {
            username: username.to_string(),
            role,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify a token's signature and decode its claims.
    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        // Tokens carry no `exp` claim, so expiry validation must be off
        // or every token would be rejected as missing it.
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }
}
