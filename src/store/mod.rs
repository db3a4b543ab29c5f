// src/store/mod.rs

//! Persistence for parents, their linked children and assessment results.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    dna::ParentDnaResult,
    error::AppError,
    models::{
        parent::{NewParent, Parent, ParentProfile, StrategyMark, StrategyToggle},
        student::Student,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait FamilyStore: Send + Sync {
    /// Inserts a parent. `Conflict` if the email is taken.
    async fn create_parent(&self, new_parent: NewParent) -> Result<Parent, AppError>;

    async fn find_parent_by_email(&self, email: &str) -> Result<Option<Parent>, AppError>;

    async fn find_parent_profile(&self, parent_id: i64) -> Result<Option<ParentProfile>, AppError>;

    /// Replaces the parent's stored result and returns what was persisted.
    async fn save_parent_dna(
        &self,
        parent_id: i64,
        result: &ParentDnaResult,
    ) -> Result<ParentDnaResult, AppError>;

    /// Students by primary key, in the order of `ids`. Unknown ids are skipped.
    async fn find_students(&self, ids: &[i64]) -> Result<Vec<Student>, AppError>;

    /// Links a student whose first name matches (case-insensitive).
    /// `NotFound` when no such student exists. Linking twice is a no-op.
    async fn link_student(
        &self,
        parent_id: i64,
        student_id: i64,
        first_name: &str,
    ) -> Result<Student, AppError>;

    /// Writes `dna_unlocked` and returns the student as persisted.
    async fn set_dna_unlocked(&self, student_id: i64, unlocked: bool) -> Result<Student, AppError>;

    /// Flips `strategy` in the `mark` list as one atomic read-modify-write.
    /// Concurrent toggles for the same parent never lose each other's changes.
    async fn toggle_strategy(
        &self,
        parent_id: i64,
        mark: StrategyMark,
        strategy: &str,
    ) -> Result<StrategyToggle, AppError>;
}
