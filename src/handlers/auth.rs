// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::parent::{LoginRequest, NewParent, RegisterRequest},
    state::DynStore,
    utils::{
        jwt::sign_jwt,
        password::{hash_password, verify_password},
    },
};

/// Registers a new parent account.
///
/// Emails are trimmed and lowercased before validation. The password is
/// hashed with Argon2 before it reaches the store.
/// Returns 201 Created and the parent (without password).
pub async fn register(
    State(store): State<DynStore>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.normalize();
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let parent = store
        .create_parent(NewParent {
            email: payload.email,
            password_hash: hashed_password,
            display_name: payload.display_name,
            role: "parent".to_string(),
        })
        .await?;

    tracing::info!("Registered parent {}", parent.id);
    Ok((StatusCode::CREATED, Json(parent)))
}

/// Authenticates a parent and returns a JWT token.
pub async fn login(
    State(store): State<DynStore>,
    State(config): State<Config>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.normalize();
    payload.validate()?;

    let parent = store
        .find_parent_by_email(&payload.email)
        .await?
        .ok_or(AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(&payload.password, &parent.password)? {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = sign_jwt(
        parent.id,
        &parent.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "display_name": parent.display_name
    })))
}
