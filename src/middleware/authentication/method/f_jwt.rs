use crate::configuration::Settings;
use crate::middleware::authentication::get_header;
use crate::middleware::authentication::jwt::{extract_bearer_token, user_from_claims, verify};
use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage};
use std::sync::Arc;

#[tracing::instrument(name = "Authenticate with JWT", skip(req))]
pub async fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let Some(authorization) = get_header::<String>(req, "authorization")? else {
        return Ok(false);
    };

    // other schemes fall through to anonymous access
    let Ok(token) = extract_bearer_token(&authorization) else {
        return Ok(false);
    };

    let settings = req.app_data::<web::Data<Settings>>().ok_or_else(|| {
        tracing::error!("settings are not registered as app data");
        "authentication is not configured".to_string()
    })?;

    let claims = verify(token, settings.auth.jwt_secret.as_bytes()).map_err(|err| {
        tracing::warn!("JWT validation failed: {}", err);
        "Invalid or expired token".to_string()
    })?;
    let user = user_from_claims(&claims)?;

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    tracing::info!("JWT authentication successful for role: {}", claims.role);
    Ok(true)
}
