// src/loader.rs

use std::time::Duration;

use crate::{
    error::AppError,
    models::{parent::ParentProfile, student::Student},
    store::FamilyStore,
};

/// A parent's profile together with their linked children, in link order.
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub profile: ParentProfile,
    pub children: Vec<Student>,
}

/// Loads the parent's profile and linked children within `timeout`.
///
/// Children are fetched by id in a single indexed lookup. Linked ids that no
/// longer resolve to a student are skipped.
pub async fn load_family(
    store: &dyn FamilyStore,
    parent_id: i64,
    timeout: Duration,
) -> Result<FamilySnapshot, AppError> {
    let load = async {
        let profile = store
            .find_parent_profile(parent_id)
            .await?
            .ok_or(AppError::ProfileNotFound(parent_id))?;

        let children = store.find_students(&profile.linked_students).await?;
        if children.len() != profile.linked_students.len() {
            tracing::warn!(
                "Parent {} has {} linked students but only {} were found",
                parent_id,
                profile.linked_students.len(),
                children.len()
            );
        }

        Ok::<_, AppError>(FamilySnapshot { profile, children })
    };

    tokio::time::timeout(timeout, load).await.map_err(|_| {
        AppError::Timeout(format!(
            "loading family for parent {} exceeded {:?}",
            parent_id, timeout
        ))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dna::ParentDnaResult,
        models::parent::{NewParent, Parent, StrategyMark, StrategyToggle},
        store::MemoryStore,
    };
    use async_trait::async_trait;

    async fn store_with_family() -> (MemoryStore, i64) {
        let store = MemoryStore::new();
        let parent = store
            .create_parent(NewParent {
                email: "fam@example.com".to_string(),
                password_hash: "hash".to_string(),
                display_name: "Fam".to_string(),
                role: "parent".to_string(),
            })
            .await
            .unwrap();

        for (id, name) in [(11, "Ida"), (12, "Jon")] {
            store
                .put_student(Student {
                    id,
                    school_id: 1,
                    first_name: name.to_string(),
                    grade: "5".to_string(),
                    reading_dna: None,
                    dna_unlocked: false,
                })
                .await;
        }
        store.link_student(parent.id, 12, "Jon").await.unwrap();
        store.link_student(parent.id, 11, "Ida").await.unwrap();

        (store, parent.id)
    }

    #[tokio::test]
    async fn test_loads_children_in_link_order() {
        let (store, parent_id) = store_with_family().await;
        let snapshot = load_family(&store, parent_id, Duration::from_secs(1))
            .await
            .unwrap();

        let ids: Vec<i64> = snapshot.children.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![12, 11]);
    }

    #[tokio::test]
    async fn test_missing_profile_is_a_distinct_error() {
        let store = MemoryStore::new();
        let err = load_family(&store, 404, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProfileNotFound(404)));
    }

    /// Delegates to a `MemoryStore` but stalls on student lookups.
    struct SlowStore(MemoryStore);

    #[async_trait]
    impl FamilyStore for SlowStore {
        async fn create_parent(&self, p: NewParent) -> Result<Parent, AppError> {
            self.0.create_parent(p).await
        }
        async fn find_parent_by_email(&self, email: &str) -> Result<Option<Parent>, AppError> {
            self.0.find_parent_by_email(email).await
        }
        async fn find_parent_profile(&self, id: i64) -> Result<Option<ParentProfile>, AppError> {
            self.0.find_parent_profile(id).await
        }
        async fn save_parent_dna(
            &self,
            id: i64,
            r: &ParentDnaResult,
        ) -> Result<ParentDnaResult, AppError> {
            self.0.save_parent_dna(id, r).await
        }
        async fn find_students(&self, ids: &[i64]) -> Result<Vec<Student>, AppError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            self.0.find_students(ids).await
        }
        async fn link_student(&self, p: i64, s: i64, name: &str) -> Result<Student, AppError> {
            self.0.link_student(p, s, name).await
        }
        async fn set_dna_unlocked(&self, id: i64, unlocked: bool) -> Result<Student, AppError> {
            self.0.set_dna_unlocked(id, unlocked).await
        }
        async fn toggle_strategy(
            &self,
            id: i64,
            mark: StrategyMark,
            strategy: &str,
        ) -> Result<StrategyToggle, AppError> {
            self.0.toggle_strategy(id, mark, strategy).await
        }
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let (store, parent_id) = store_with_family().await;
        let slow = SlowStore(store);

        let err = load_family(&slow, parent_id, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }
}
