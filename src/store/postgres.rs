// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::FamilyStore;
use crate::{
    dna::ParentDnaResult,
    error::AppError,
    models::{
        parent::{
            NewParent, Parent, ParentProfile, ParentProfileRow, StrategyMark, StrategyToggle,
            decode_strategy_progress,
        },
        student::{Student, StudentRow},
    },
};

const STUDENT_COLUMNS: &str =
    "id, school_id, first_name, grade, reading_dna_type, reading_dna_modifiers, dna_unlocked";

/// Postgres-backed store. Students are looked up by primary key and through
/// the `parent_students` link table, never by walking organizations and schools.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    // Postgres error code for unique violation is 23505
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

#[async_trait]
impl FamilyStore for PgStore {
    async fn create_parent(&self, new_parent: NewParent) -> Result<Parent, AppError> {
        sqlx::query_as::<_, Parent>(
            r#"
            INSERT INTO parents (email, password, display_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, display_name, role, created_at
            "#,
        )
        .bind(&new_parent.email)
        .bind(&new_parent.password_hash)
        .bind(&new_parent.display_name)
        .bind(&new_parent.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Email '{}' is already registered", new_parent.email))
            } else {
                tracing::error!("Failed to create parent: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_parent_by_email(&self, email: &str) -> Result<Option<Parent>, AppError> {
        let parent = sqlx::query_as::<_, Parent>(
            r#"
            SELECT id, email, password, display_name, role, created_at
            FROM parents
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parent)
    }

    async fn find_parent_profile(&self, parent_id: i64) -> Result<Option<ParentProfile>, AppError> {
        let Some(row) = sqlx::query_as::<_, ParentProfileRow>(
            r#"
            SELECT id, email, display_name, lux_dna, strategy_progress
            FROM parents
            WHERE id = $1
            "#,
        )
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let linked: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT student_id
            FROM parent_students
            WHERE parent_id = $1
            ORDER BY linked_at, student_id
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_profile(linked)))
    }

    async fn save_parent_dna(
        &self,
        parent_id: i64,
        result: &ParentDnaResult,
    ) -> Result<ParentDnaResult, AppError> {
        let saved: Option<Json<ParentDnaResult>> = sqlx::query_scalar(
            r#"
            UPDATE parents SET lux_dna = $1
            WHERE id = $2
            RETURNING lux_dna
            "#,
        )
        .bind(Json(result))
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save parent DNA: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        saved
            .map(|Json(result)| result)
            .ok_or(AppError::ProfileNotFound(parent_id))
    }

    async fn find_students(&self, ids: &[i64]) -> Result<Vec<Student>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {} FROM students WHERE id = ANY($1)",
            STUDENT_COLUMNS
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        let mut by_id: HashMap<i64, Student> = rows
            .into_iter()
            .map(|row| (row.id, Student::from(row)))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn link_student(
        &self,
        parent_id: i64,
        student_id: i64,
        first_name: &str,
    ) -> Result<Student, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {} FROM students WHERE id = $1 AND LOWER(first_name) = LOWER($2)",
            STUDENT_COLUMNS
        ))
        .bind(student_id)
        .bind(first_name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound(
            "No student matches that id and name".to_string(),
        ))?;

        sqlx::query(
            r#"
            INSERT INTO parent_students (parent_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (parent_id, student_id) DO NOTHING
            "#,
        )
        .bind(parent_id)
        .bind(student_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Student::from(row))
    }

    async fn set_dna_unlocked(&self, student_id: i64, unlocked: bool) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "UPDATE students SET dna_unlocked = $1 WHERE id = $2 RETURNING {}",
            STUDENT_COLUMNS
        ))
        .bind(unlocked)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update dna_unlocked: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

        Ok(Student::from(row))
    }

    async fn toggle_strategy(
        &self,
        parent_id: i64,
        mark: StrategyMark,
        strategy: &str,
    ) -> Result<StrategyToggle, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent toggles for the same parent.
        let Json(stored): Json<serde_json::Value> = sqlx::query_scalar(
            "SELECT strategy_progress FROM parents WHERE id = $1 FOR UPDATE",
        )
        .bind(parent_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::ProfileNotFound(parent_id))?;

        let mut progress = decode_strategy_progress(parent_id, stored);
        let active = progress.toggle(mark, strategy);

        sqlx::query("UPDATE parents SET strategy_progress = $1 WHERE id = $2")
            .bind(Json(&progress))
            .bind(parent_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(StrategyToggle { active, progress })
    }
}
