//! JWT Token Handler
//! Mission: Generate and validate session claims securely

use crate::auth::models::{Claims, User};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    validity_days: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with the process-wide signing secret.
    /// There is no fallback secret here: the caller must refuse to start
    /// without one.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            validity_days: 30, // 30-day tokens, then re-authenticate
        }
    }

    /// Generate a signed claim for a user. Embeds the subject id and the
    /// role at issuance time; there is no refresh or rotation mechanism.
    pub fn generate_token(&self, user: &User) -> Result<(String, usize)> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::days(self.validity_days))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let expires_in = (self.validity_days * 86_400) as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp: expiration,
        };

        debug!(
            "Generating JWT for {} ({}), expires in {}d",
            user.email, user.id, self.validity_days
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")?;

        Ok((token, expires_in))
    }

    /// Validate a JWT token and extract claims. Rejects bad signatures and
    /// expired tokens alike.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for subject {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
