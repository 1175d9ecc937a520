//! Authentication and authorization
//!
//! Tokens carry the user id and a single platform role. The role string
//! maps directly onto [`domain_party::UserRole`]; handlers turn the token
//! into an [`Actor`] before calling into the engine.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_claims::Actor;
use domain_party::UserRole;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Platform role
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unknown role '{0}'")]
    UnknownRole(String),
    #[error("Malformed subject '{0}'")]
    MalformedSubject(String),
}

/// Creates a new JWT token for a user
pub fn create_token(
    user_id: &str,
    role: UserRole,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Resolves the token into the acting user
pub fn actor_from_claims(claims: &TokenClaims) -> Result<Actor, AuthError> {
    let user_id = claims
        .sub
        .parse()
        .map_err(|_| AuthError::MalformedSubject(claims.sub.clone()))?;
    let role = UserRole::parse(&claims.role)
        .map_err(|_| AuthError::UnknownRole(claims.role.clone()))?;
    Ok(Actor::new(user_id, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::UserId;

    #[test]
    fn test_round_trip_token() {
        let user_id = UserId::new_v7();
        let token =
            create_token(&user_id.to_string(), UserRole::Adjuster, "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.role, "adjuster");
        let actor = actor_from_claims(&claims).unwrap();
        assert_eq!(actor.user_id, user_id);
        assert_eq!(actor.role, UserRole::Adjuster);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("USR-0", UserRole::Claimant, "secret", 60);
        // Malformed subject still signs; validation against another key fails.
        let token = token.unwrap();
        assert!(matches!(
            validate_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let claims = TokenClaims {
            sub: UserId::new_v7().to_string(),
            role: "superuser".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            actor_from_claims(&claims),
            Err(AuthError::UnknownRole(_))
        ));
    }
}
