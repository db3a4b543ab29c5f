// src/models/parent.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::dna::{ParentDnaResult, ParentTypeDetails};

/// Represents the 'parents' table: the login identity.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,

    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub display_name: String,

    /// 'parent' or 'admin'.
    pub role: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Everything the family dashboard needs about a parent.
#[derive(Debug, Clone, Serialize)]
pub struct ParentProfile {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    /// Latest assessment result; `None` until the quiz has been taken.
    pub lux_dna: Option<ParentDnaResult>,
    /// Linked student ids in the order they were linked.
    pub linked_students: Vec<i64>,
    pub strategy_progress: StrategyProgress,
}

/// Row shape for profile queries. JSON columns are decoded leniently.
#[derive(Debug, FromRow)]
pub struct ParentProfileRow {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub lux_dna: Option<Json<serde_json::Value>>,
    pub strategy_progress: Json<serde_json::Value>,
}

impl ParentProfileRow {
    pub fn into_profile(self, linked_students: Vec<i64>) -> ParentProfile {
        let id = self.id;
        let strategy_progress = decode_strategy_progress(id, self.strategy_progress.0);

        ParentProfile {
            id,
            email: self.email,
            display_name: self.display_name,
            lux_dna: self.lux_dna.and_then(|Json(v)| decode_lux_dna(id, v)),
            linked_students,
            strategy_progress,
        }
    }
}

/// A stored result that no longer decodes (for example a retired type key)
/// counts as "not taken" so the parent is asked to retake the quiz.
pub fn decode_lux_dna(parent_id: i64, value: serde_json::Value) -> Option<ParentDnaResult> {
    match serde_json::from_value(value) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("Ignoring unreadable parent DNA for parent {}: {}", parent_id, e);
            None
        }
    }
}

/// Unreadable progress is reset rather than failing the whole profile.
pub fn decode_strategy_progress(parent_id: i64, value: serde_json::Value) -> StrategyProgress {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!("Resetting unreadable strategy progress for parent {}: {}", parent_id, e);
        StrategyProgress::default()
    })
}

/// Assessment result as returned to clients, with the static details attached.
#[derive(Debug, Serialize)]
pub struct ParentDnaResponse {
    #[serde(flatten)]
    pub result: ParentDnaResult,
    pub details: &'static ParentTypeDetails,
}

impl From<ParentDnaResult> for ParentDnaResponse {
    fn from(result: ParentDnaResult) -> Self {
        let details = result.details();
        Self { result, details }
    }
}

/// Which list a strategy is being marked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMark {
    Starred,
    Tried,
    Dismissed,
}

/// Per-parent strategy bookkeeping shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyProgress {
    #[serde(default)]
    pub starred: BTreeSet<String>,
    #[serde(default)]
    pub tried: BTreeSet<String>,
    #[serde(default)]
    pub dismissed: BTreeSet<String>,
}

impl StrategyProgress {
    fn set_mut(&mut self, mark: StrategyMark) -> &mut BTreeSet<String> {
        match mark {
            StrategyMark::Starred => &mut self.starred,
            StrategyMark::Tried => &mut self.tried,
            StrategyMark::Dismissed => &mut self.dismissed,
        }
    }

    /// Flips `strategy` in the `mark` list and returns whether it is now set.
    /// Dismissing a strategy also unstars it.
    pub fn toggle(&mut self, mark: StrategyMark, strategy: &str) -> bool {
        let set = self.set_mut(mark);
        let active = if set.remove(strategy) {
            false
        } else {
            set.insert(strategy.to_string());
            true
        };

        if mark == StrategyMark::Dismissed && active {
            self.starred.remove(strategy);
        }
        active
    }
}

/// Outcome of one toggle: whether the strategy is now set, and the
/// progress as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyToggle {
    pub active: bool,
    pub progress: StrategyProgress,
}

/// DTO for marking a strategy.
#[derive(Debug, Deserialize, Validate)]
pub struct StrategyMarkRequest {
    #[validate(length(min = 1, max = 300))]
    pub strategy: String,
}

impl StrategyMarkRequest {
    /// Trims the strategy text. Call before `validate` so blank input is rejected.
    pub fn normalize(&mut self) {
        self.strategy = self.strategy.trim().to_string();
    }
}

/// DTO for creating a new parent account (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Display name length must be between 1 and 50 characters."
    ))]
    pub display_name: String,
}

impl RegisterRequest {
    /// Trims the email and display name and lowercases the email.
    /// Call before `validate`.
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        self.display_name = self.display_name.trim().to_string();
    }
}

/// DTO for parent login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
    }
}

/// Values needed to insert a parent.
#[derive(Debug, Clone)]
pub struct NewParent {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
}
