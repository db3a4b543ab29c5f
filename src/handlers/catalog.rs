// src/handlers/catalog.rs

use axum::{Json, extract::Query, response::IntoResponse};
use serde::Deserialize;

use crate::{
    dna::{
        ChildDnaType, ChildTypeDetails, Modifier, ModifierDetails, ModifierSet, ParentDnaType,
        ParentTypeDetails, get_compatibility_insights,
    },
    error::AppError,
};

pub async fn list_parent_types() -> impl IntoResponse {
    let types: Vec<&'static ParentTypeDetails> =
        ParentDnaType::ALL.into_iter().map(|t| t.details()).collect();
    Json(types)
}

pub async fn list_child_types() -> impl IntoResponse {
    let types: Vec<&'static ChildTypeDetails> =
        ChildDnaType::ALL.into_iter().map(|t| t.details()).collect();
    Json(types)
}

pub async fn list_modifiers() -> impl IntoResponse {
    let modifiers: Vec<&'static ModifierDetails> =
        Modifier::ALL.into_iter().map(|m| m.details()).collect();
    Json(modifiers)
}

#[derive(Debug, Deserialize)]
pub struct CompatibilityQuery {
    pub parent: String,
    pub child: String,
    /// Modifier letters, e.g. `SF`.
    pub modifiers: Option<String>,
}

/// Previews the resolver for any pairing without touching stored data.
pub async fn preview_compatibility(
    Query(params): Query<CompatibilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let parent: ParentDnaType = params
        .parent
        .parse()
        .map_err(|e| AppError::BadRequest(format!("parent: {}", e)))?;
    let child: ChildDnaType = params
        .child
        .parse()
        .map_err(|e| AppError::BadRequest(format!("child: {}", e)))?;
    let modifiers = params
        .modifiers
        .as_deref()
        .map(ModifierSet::parse_codes)
        .unwrap_or_default();

    Ok(Json(get_compatibility_insights(parent, child, &modifiers)))
}
