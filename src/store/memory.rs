// src/store/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::FamilyStore;
use crate::{
    dna::ParentDnaResult,
    error::AppError,
    models::{
        parent::{NewParent, Parent, ParentProfile, StrategyMark, StrategyProgress, StrategyToggle},
        student::Student,
    },
};

struct StoredParent {
    parent: Parent,
    lux_dna: Option<ParentDnaResult>,
    strategy_progress: StrategyProgress,
}

#[derive(Default)]
struct Inner {
    next_parent_id: i64,
    parents: BTreeMap<i64, StoredParent>,
    students: BTreeMap<i64, Student>,
    /// (parent_id, student_id) in link order.
    links: Vec<(i64, i64)>,
}

/// In-process store for tests and database-less local runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a student record, as the student side of the app would.
    pub async fn put_student(&self, student: Student) {
        self.inner.write().await.students.insert(student.id, student);
    }
}

#[async_trait]
impl FamilyStore for MemoryStore {
    async fn create_parent(&self, new_parent: NewParent) -> Result<Parent, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .parents
            .values()
            .any(|p| p.parent.email.eq_ignore_ascii_case(&new_parent.email))
        {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                new_parent.email
            )));
        }

        inner.next_parent_id += 1;
        let parent = Parent {
            id: inner.next_parent_id,
            email: new_parent.email,
            password: new_parent.password_hash,
            display_name: new_parent.display_name,
            role: new_parent.role,
            created_at: Some(chrono::Utc::now()),
        };
        inner.parents.insert(
            parent.id,
            StoredParent {
                parent: parent.clone(),
                lux_dna: None,
                strategy_progress: StrategyProgress::default(),
            },
        );

        Ok(parent)
    }

    async fn find_parent_by_email(&self, email: &str) -> Result<Option<Parent>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .parents
            .values()
            .find(|p| p.parent.email == email)
            .map(|p| p.parent.clone()))
    }

    async fn find_parent_profile(&self, parent_id: i64) -> Result<Option<ParentProfile>, AppError> {
        let inner = self.inner.read().await;
        let Some(stored) = inner.parents.get(&parent_id) else {
            return Ok(None);
        };

        let linked_students = inner
            .links
            .iter()
            .filter(|(p, _)| *p == parent_id)
            .map(|(_, s)| *s)
            .collect();

        Ok(Some(ParentProfile {
            id: stored.parent.id,
            email: stored.parent.email.clone(),
            display_name: stored.parent.display_name.clone(),
            lux_dna: stored.lux_dna.clone(),
            linked_students,
            strategy_progress: stored.strategy_progress.clone(),
        }))
    }

    async fn save_parent_dna(
        &self,
        parent_id: i64,
        result: &ParentDnaResult,
    ) -> Result<ParentDnaResult, AppError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .parents
            .get_mut(&parent_id)
            .ok_or(AppError::ProfileNotFound(parent_id))?;

        stored.lux_dna = Some(result.clone());
        Ok(result.clone())
    }

    async fn find_students(&self, ids: &[i64]) -> Result<Vec<Student>, AppError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.students.get(id).cloned())
            .collect())
    }

    async fn link_student(
        &self,
        parent_id: i64,
        student_id: i64,
        first_name: &str,
    ) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;

        let student = inner
            .students
            .get(&student_id)
            .filter(|s| s.first_name.eq_ignore_ascii_case(first_name))
            .cloned()
            .ok_or(AppError::NotFound(
                "No student matches that id and name".to_string(),
            ))?;

        if !inner.links.contains(&(parent_id, student_id)) {
            inner.links.push((parent_id, student_id));
        }

        Ok(student)
    }

    async fn set_dna_unlocked(&self, student_id: i64, unlocked: bool) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        let student = inner
            .students
            .get_mut(&student_id)
            .ok_or(AppError::NotFound("Student not found".to_string()))?;

        student.dna_unlocked = unlocked;
        Ok(student.clone())
    }

    async fn toggle_strategy(
        &self,
        parent_id: i64,
        mark: StrategyMark,
        strategy: &str,
    ) -> Result<StrategyToggle, AppError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .parents
            .get_mut(&parent_id)
            .ok_or(AppError::ProfileNotFound(parent_id))?;

        let active = stored.strategy_progress.toggle(mark, strategy);
        Ok(StrategyToggle {
            active,
            progress: stored.strategy_progress.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::{ChildDnaType, ModifierSet, ReadingDna};

    fn new_parent(email: &str) -> NewParent {
        NewParent {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: "Pat".to_string(),
            role: "parent".to_string(),
        }
    }

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            school_id: 10,
            first_name: name.to_string(),
            grade: "2".to_string(),
            reading_dna: Some(ReadingDna::new(ChildDnaType::CreativeExplorer, ModifierSet::new())),
            dna_unlocked: false,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_parent(new_parent("a@example.com")).await.unwrap();
        let err = store
            .create_parent(new_parent("A@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_link_requires_matching_name() {
        let store = MemoryStore::new();
        let parent = store.create_parent(new_parent("b@example.com")).await.unwrap();
        store.put_student(student(5, "Noor")).await;

        let err = store.link_student(parent.id, 5, "Nora").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        store.link_student(parent.id, 5, "noor").await.unwrap();
        store.link_student(parent.id, 5, "Noor").await.unwrap();

        let profile = store.find_parent_profile(parent.id).await.unwrap().unwrap();
        assert_eq!(profile.linked_students, vec![5]);
    }

    #[tokio::test]
    async fn test_find_students_keeps_requested_order() {
        let store = MemoryStore::new();
        store.put_student(student(1, "One")).await;
        store.put_student(student(2, "Two")).await;

        let found = store.find_students(&[2, 99, 1]).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_save_dna_for_missing_parent() {
        let store = MemoryStore::new();
        let result = crate::dna::calculate_parent_dna_type(&Default::default());
        let err = store.save_parent_dna(42, &result).await.unwrap_err();
        assert!(matches!(err, AppError::ProfileNotFound(42)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_are_all_kept() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let parent_id = store.create_parent(new_parent("c@example.com")).await.unwrap().id;

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .toggle_strategy(parent_id, StrategyMark::Starred, &format!("strategy {}", i))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().active);
        }

        let profile = store.find_parent_profile(parent_id).await.unwrap().unwrap();
        assert_eq!(profile.strategy_progress.starred.len(), 64);
    }

    #[tokio::test]
    async fn test_toggle_for_missing_parent() {
        let store = MemoryStore::new();
        let err = store
            .toggle_strategy(7, StrategyMark::Tried, "Read aloud")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProfileNotFound(7)));
    }
}
