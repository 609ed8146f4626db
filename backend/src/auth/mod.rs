use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{axum_http::error_responses::AppError, config::config_model::Auth};

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub role: String,
    pub email: Option<String>,
    pub exp: usize,
}

/// Caller identity placed in request extensions once both gates pass.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    pub role: String,
}

impl From<AccessClaims> for AuthUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

pub fn validate_access_token(token: &str, secret: &str) -> anyhow::Result<AccessClaims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<AccessClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

/// Authenticates the bearer token, then requires the configured privileged
/// role. Either failure short-circuits before the handler runs.
pub async fn require_privileged_role(
    State(auth): State<Arc<Auth>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "auth: missing or malformed bearer token"
        );
        return Err(AppError::Unauthorized);
    };

    let claims = validate_access_token(bearer.token(), &auth.jwt_secret).map_err(|err| {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            error = %err,
            "auth: token rejected"
        );
        AppError::Unauthorized
    })?;

    let auth_user = AuthUser::from(claims);

    if auth_user.role != auth.privileged_role {
        warn!(
            user_id = %auth_user.user_id,
            role = %auth_user.role,
            path = %request.uri().path(),
            "auth: role not permitted"
        );
        return Err(AppError::Forbidden);
    }

    debug!(user_id = %auth_user.user_id, "auth: access granted");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
