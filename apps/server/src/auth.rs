use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use eventbite_core::access::AccessToken;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

const MASTER_SCOPE: &str = "master";
const EVENT_SCOPE_PREFIX: &str = "event:";

/// What a bearer token entitles its holder to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenScope {
    Event(String),
    Master,
}

impl TokenScope {
    pub fn as_claim(&self) -> String {
        match self {
            TokenScope::Event(id) => format!("{EVENT_SCOPE_PREFIX}{id}"),
            TokenScope::Master => MASTER_SCOPE.to_string(),
        }
    }

    pub fn from_claim(raw: &str) -> Option<Self> {
        if raw == MASTER_SCOPE {
            return Some(TokenScope::Master);
        }
        raw.strip_prefix(EVENT_SCOPE_PREFIX)
            .filter(|id| !id.is_empty())
            .map(|id| TokenScope::Event(id.to_string()))
    }

    /// Master tokens cover every event.
    pub fn covers_event(&self, event_id: &str) -> bool {
        match self {
            TokenScope::Master => true,
            TokenScope::Event(id) => id == event_id,
        }
    }
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
        }
    }

    pub fn issue_token(&self, scope: TokenScope) -> Result<AccessToken, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: scope.as_claim(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;
        Ok(AccessToken {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl.as_secs(),
            scope: claims.sub,
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenScope, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_)
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            },
        )?;
        TokenScope::from_claim(&data.claims.sub).ok_or(AuthError::Unauthorized)
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Scope of the bearer token on the request, if one was sent.
///
/// A missing header is anonymous; a present but invalid token is rejected.
pub struct Bearer(pub Option<TokenScope>);

impl FromRequestParts<Arc<AppState>> for Bearer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Bearer(None));
        };
        let header = header.to_str().map_err(|_| AuthError::Unauthorized)?;

        let mut split = header.splitn(2, ' ');
        let (Some(scheme), Some(token)) = (split.next(), split.next()) else {
            return Err(AuthError::Unauthorized.into());
        };
        if !scheme.eq_ignore_ascii_case("Bearer") {
            return Err(AuthError::Unauthorized.into());
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Unauthorized.into());
        }

        let scope = state.auth.validate_token(token)?;
        Ok(Bearer(Some(scope)))
    }
}

impl Bearer {
    /// Directory-wide operations. Open when no master credential is configured.
    pub fn require_master(&self, state: &AppState) -> Result<(), ApiError> {
        if !state.access_gate.has_master_credentials() {
            return Ok(());
        }
        match &self.0 {
            Some(TokenScope::Master) => Ok(()),
            _ => Err(ApiError::Unauthorized(
                "Master credential required".to_string(),
            )),
        }
    }

    pub fn require_event_admin(&self, event_id: &str) -> Result<(), ApiError> {
        match &self.0 {
            Some(scope) if scope.covers_event(event_id) => Ok(()),
            _ => Err(ApiError::Unauthorized(format!(
                "Admin access to event {event_id} required"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new(&[7u8; 32], Duration::from_secs(60))
    }

    #[test]
    fn event_token_round_trips_its_scope() {
        let auth = manager();
        let token = auth.issue_token(TokenScope::Event("abc".into())).unwrap();
        assert_eq!(token.scope, "event:abc");
        assert_eq!(token.expires_in, 60);
        assert_eq!(
            auth.validate_token(&token.access_token).unwrap(),
            TokenScope::Event("abc".into())
        );
    }

    #[test]
    fn tokens_from_other_keys_are_rejected() {
        let token = AuthManager::new(&[1u8; 32], Duration::from_secs(60))
            .issue_token(TokenScope::Master)
            .unwrap();
        assert!(matches!(
            manager().validate_token(&token.access_token),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            manager().validate_token("not-a-jwt"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn scopes_cover_their_events() {
        assert!(TokenScope::Master.covers_event("any"));
        assert!(TokenScope::Event("a".into()).covers_event("a"));
        assert!(!TokenScope::Event("a".into()).covers_event("b"));
        assert_eq!(TokenScope::from_claim("event:"), None);
        assert_eq!(TokenScope::from_claim("master"), Some(TokenScope::Master));
    }

    #[test]
    fn secret_key_accepts_base64_or_ascii() {
        let b64 = BASE64.encode([9u8; 32]);
        assert_eq!(decode_secret_key(&b64).unwrap(), vec![9u8; 32]);
        assert_eq!(
            decode_secret_key("correct-horse-battery-staple-123").unwrap().len(),
            32
        );
        assert!(decode_secret_key("").is_err());
        assert!(decode_secret_key("short").is_err());
    }
}
