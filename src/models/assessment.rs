// src/models/assessment.rs

use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

/// DTO for submitting the parent quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    /// Key: question id. Value: chosen option id.
    #[validate(custom(function = validate_answers))]
    pub answers: HashMap<String, String>,
}

/// Bounds the answer map so a client cannot post arbitrarily large payloads.
fn validate_answers(answers: &HashMap<String, String>) -> Result<(), validator::ValidationError> {
    if answers.is_empty() {
        return Err(validator::ValidationError::new("answers_cannot_be_empty"));
    }
    if answers.len() > 50 {
        return Err(validator::ValidationError::new("too_many_answers"));
    }
    for (question, option) in answers {
        if question.len() > 64 || option.len() > 64 {
            return Err(validator::ValidationError::new("answer_id_too_long"));
        }
    }
    Ok(())
}
