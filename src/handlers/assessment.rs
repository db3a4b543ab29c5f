// src/handlers/assessment.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    config::Config,
    dna::{calculate_parent_dna_type, questions::QUESTIONS},
    error::AppError,
    models::{assessment::SubmitAssessmentRequest, parent::ParentDnaResponse},
    state::DynStore,
    utils::jwt::Claims,
};

/// Lists the parent quiz. Trait tags are never serialized.
pub async fn list_questions() -> impl IntoResponse {
    Json(&QUESTIONS[..])
}

/// Scores a completed quiz and stores the result on the parent.
///
/// Refuses to finalize (400) when too few answers were recognised or no
/// answer counted towards any type. Retaking replaces the previous result.
pub async fn submit_assessment(
    State(store): State<DynStore>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let parent_id = claims.parent_id()?;

    let mut result = calculate_parent_dna_type(&payload.answers);

    if result.answered_questions < config.min_assessment_answers {
        return Err(AppError::BadRequest(format!(
            "At least {} questions must be answered, got {}",
            config.min_assessment_answers, result.answered_questions
        )));
    }
    if result.is_degenerate() {
        return Err(AppError::BadRequest(
            "Answers did not match any parenting style".to_string(),
        ));
    }

    result.completed_at = Some(chrono::Utc::now());
    let saved = store.save_parent_dna(parent_id, &result).await?;

    tracing::info!(
        "Parent {} assessed as {} ({} answers)",
        parent_id,
        saved.parent_type,
        saved.answered_questions
    );

    Ok(Json(ParentDnaResponse::from(saved)))
}
