// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::dna::{FamilyMember, ReadingDna, format_dna_code};

/// A child's record, owned by the student side of the app.
/// This service only reads it and toggles `dna_unlocked`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub school_id: i64,
    pub first_name: String,
    pub grade: String,

    /// Present once the child has taken their own reading assessment.
    pub reading_dna: Option<ReadingDna>,

    /// Whether the child is allowed to take their reading assessment.
    pub dna_unlocked: bool,
}

impl Student {
    pub fn dna_code(&self) -> String {
        format_dna_code(self.reading_dna.as_ref())
    }
}

impl FamilyMember for Student {
    fn member_id(&self) -> i64 {
        self.id
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn grade(&self) -> &str {
        &self.grade
    }

    fn reading_dna(&self) -> Option<&ReadingDna> {
        self.reading_dna.as_ref()
    }
}

/// Row shape of the 'students' table.
#[derive(Debug, FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub school_id: i64,
    pub first_name: String,
    pub grade: String,
    pub reading_dna_type: Option<String>,
    pub reading_dna_modifiers: Option<String>,
    pub dna_unlocked: bool,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        let reading_dna = match (&row.reading_dna_type, &row.reading_dna_modifiers) {
            (None, None) => None,
            (type_key, codes) => Some(ReadingDna::from_stored(
                type_key.as_deref(),
                codes.as_deref(),
            )),
        };

        Self {
            id: row.id,
            school_id: row.school_id,
            first_name: row.first_name,
            grade: row.grade,
            reading_dna,
            dna_unlocked: row.dna_unlocked,
        }
    }
}

/// Child as shown on the family dashboard.
#[derive(Debug, Serialize)]
pub struct ChildSummary {
    #[serde(flatten)]
    pub student: Student,
    pub dna_code: String,
}

impl From<Student> for ChildSummary {
    fn from(student: Student) -> Self {
        let dna_code = student.dna_code();
        Self { student, dna_code }
    }
}

/// DTO for linking a child to the current parent.
/// The first name must match the student record.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkStudentRequest {
    #[validate(range(min = 1))]
    pub student_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
}

/// DTO for toggling a child's assessment access.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub unlocked: bool,
}
