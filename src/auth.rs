use anyhow::Result;
use axum::{
    RequestPartsExt,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pilots::Pilot;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // pilot UUID
    pub pilot_id: String,
    pub rank: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(pilot: &Pilot) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(30); // ACARS sessions are long-lived

        Self {
            sub: pilot.id.to_string(),
            pilot_id: pilot.pilot_id.clone(),
            rank: pilot.rank.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_token(&self, pilot: &Pilot) -> Result<String> {
        let claims = Claims::new(pilot);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| anyhow::anyhow!("Failed to verify token: {}", e))
    }
}

/// Session secret from `VATRACK_JWT_SECRET`. Falls back to a development
/// secret with a warning so a bare checkout still runs.
pub fn get_jwt_secret() -> String {
    std::env::var("VATRACK_JWT_SECRET").unwrap_or_else(|_| {
        warn!("VATRACK_JWT_SECRET not set, using development secret");
        "vatrack-dev-secret".to_string()
    })
}

/// Extractor for routes that require a pilot session (bid creation).
/// The ACARS action endpoint itself authenticates by payload, not bearer.
#[derive(Debug)]
pub struct AuthPilot(pub Pilot);

impl axum::extract::FromRequestParts<crate::web::AppState> for AuthPilot {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::web::AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let claims = state
            .jwt
            .verify_token(bearer.token())
            .map_err(|_| AuthError::InvalidToken)?;

        let pilot = state
            .pilots
            .get_by_pilot_id(&claims.pilot_id)
            .ok_or(AuthError::UnknownPilot)?;

        Ok(AuthPilot(pilot))
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    UnknownPilot,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidToken => "Invalid or expired session token",
            AuthError::UnknownPilot => "Session pilot no longer exists",
        };
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(serde_json::json!({"error": message})),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pilot() -> Pilot {
        Pilot::new(
            "VA1001".to_string(),
            "Test Pilot".to_string(),
            "not-a-hash".to_string(),
            "Cadet".to_string(),
        )
    }

    #[test]
    fn round_trip_token() {
        let jwt = JwtService::new("test-secret");
        let pilot = test_pilot();

        let token = jwt.generate_token(&pilot).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.pilot_id, "VA1001");
        assert_eq!(claims.sub, pilot.id.to_string());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let jwt = JwtService::new("test-secret");
        let other = JwtService::new("other-secret");

        let token = jwt.generate_token(&test_pilot()).unwrap();
        assert!(other.verify_token(&token).is_err());
    }
}
