// src/handlers/family.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use validator::Validate;

use crate::{
    config::Config,
    dna::{
        CompatibilityRecord, RecommendationCategory, calculate_family_compatibility,
        generate_family_recommendations,
    },
    error::AppError,
    loader::load_family,
    models::{
        parent::{ParentDnaResponse, ParentProfile, StrategyMark, StrategyMarkRequest},
        student::{ChildSummary, LinkStudentRequest, UnlockRequest},
    },
    state::DynStore,
    utils::jwt::Claims,
};

/// The family dashboard.
#[derive(Debug, Serialize)]
pub struct FamilyOverview {
    pub profile: ParentProfile,
    pub parent_dna: Option<ParentDnaResponse>,
    pub children: Vec<ChildSummary>,
    /// Empty until the parent has an assessment result.
    pub compatibility: Vec<CompatibilityRecord>,
    pub recommendations: Vec<RecommendationCategory>,
}

/// Loads the parent's profile and children and derives compatibility and
/// recommendations on the fly. Nothing derived here is stored.
pub async fn get_overview(
    State(store): State<DynStore>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = claims.parent_id()?;
    let family = load_family(&*store, parent_id, config.family_load_timeout()).await?;

    let (compatibility, recommendations) = match &family.profile.lux_dna {
        Some(parent_dna) => {
            let records = calculate_family_compatibility(parent_dna, &family.children);
            let recommendations = generate_family_recommendations(parent_dna, &records);
            (records, recommendations)
        }
        None => (Vec::new(), Vec::new()),
    };

    let parent_dna = family.profile.lux_dna.clone().map(ParentDnaResponse::from);

    Ok(Json(FamilyOverview {
        profile: family.profile,
        parent_dna,
        children: family.children.into_iter().map(ChildSummary::from).collect(),
        compatibility,
        recommendations,
    }))
}

/// Links a child to the current parent. The first name must match the record.
pub async fn link_student(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<LinkStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let parent_id = claims.parent_id()?;

    let student = store
        .link_student(parent_id, payload.student_id, payload.first_name.trim())
        .await?;

    tracing::info!("Parent {} linked student {}", parent_id, student.id);
    Ok((StatusCode::CREATED, Json(ChildSummary::from(student))))
}

/// Allows or blocks a linked child from taking their reading assessment.
/// Responds with the value as persisted.
pub async fn set_unlock(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(student_id): Path<i64>,
    Json(payload): Json<UnlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = claims.parent_id()?;

    let profile = store
        .find_parent_profile(parent_id)
        .await?
        .ok_or(AppError::ProfileNotFound(parent_id))?;

    if !profile.linked_students.contains(&student_id) {
        return Err(AppError::NotFound(
            "Student is not linked to this parent".to_string(),
        ));
    }

    let student = store.set_dna_unlocked(student_id, payload.unlocked).await?;

    tracing::info!(
        "Parent {} set dna_unlocked={} for student {}",
        parent_id,
        student.dna_unlocked,
        student.id
    );
    Ok(Json(ChildSummary::from(student)))
}

/// Toggles a strategy in the starred, tried or dismissed list.
/// Responds with the progress as persisted.
pub async fn toggle_strategy(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(mark): Path<StrategyMark>,
    Json(mut payload): Json<StrategyMarkRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.normalize();
    payload.validate()?;
    let parent_id = claims.parent_id()?;

    let toggled = store
        .toggle_strategy(parent_id, mark, &payload.strategy)
        .await?;

    Ok(Json(toggled))
}
