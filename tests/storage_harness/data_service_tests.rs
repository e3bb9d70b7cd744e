//! Macro-generated test suite for `DataService<TestRecord>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use dealership::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<TestRecord>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`
//! - `test_get_nonexistent`
//! - `test_list_empty` / `test_list_multiple`
//! - `test_update_existing` / `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//!
//! ## Conditional updates
//! - `test_update_if_status_matches`
//! - `test_update_if_status_mismatch_leaves_entity`
//! - `test_update_if_status_nonexistent`
//! - `test_concurrent_conditional_updates_single_winner`
//!
//! ## Edge Cases
//! - `test_concurrent_access`

/// Generate a full `DataService<TestRecord>` conformance test suite.
///
/// `$factory` must evaluate to a `Clone + 'static` service implementing
/// `DataService<TestRecord>`. It is re-evaluated for each test.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use dealership::core::{DataService, Entity};
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let record = create_test_record("Alice", "open", 300);
                let id = record.id;

                let created = service.create(record.clone()).await.unwrap();
                assert_eq!(created, record);

                let retrieved = service.get(&id).await.unwrap();
                assert_eq!(retrieved, Some(record));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all = service.list().await.unwrap();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_list_multiple() {
                let service = $factory;
                for record in sample_batch(5) {
                    service.create(record).await.unwrap();
                }
                assert_count(&service.list().await.unwrap(), 5);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let record = service
                    .create(create_test_record("Bob", "open", 10))
                    .await
                    .unwrap();

                let patch = TestRecordPatch {
                    name: Some("Roberto".to_string()),
                    ..Default::default()
                };
                let updated = service.update(&record.id, patch).await.unwrap().unwrap();
                assert_eq!(updated.name, "Roberto");
                assert_eq!(updated.amount, 10);

                let stored = service.get(&record.id).await.unwrap().unwrap();
                assert_eq!(stored.name, "Roberto");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let result = service
                    .update(&Uuid::new_v4(), TestRecordPatch::default())
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let record = service
                    .create(create_test_record("Carla", "open", 0))
                    .await
                    .unwrap();

                assert!(service.delete(&record.id).await.unwrap());
                assert!(service.get(&record.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert!(!service.delete(&Uuid::new_v4()).await.unwrap());
            }

            // ==================================================================
            // Conditional updates
            // ==================================================================

            #[tokio::test]
            async fn test_update_if_status_matches() {
                let service = $factory;
                let record = service
                    .create(create_test_record("Dario", "open", 0))
                    .await
                    .unwrap();

                let updated = service
                    .update_if_status(&record.id, "open", status_patch("closed"))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(updated.status(), "closed");
            }

            #[tokio::test]
            async fn test_update_if_status_mismatch_leaves_entity() {
                let service = $factory;
                let record = service
                    .create(create_test_record("Elena", "closed", 7))
                    .await
                    .unwrap();

                let result = service
                    .update_if_status(&record.id, "open", status_patch("archived"))
                    .await
                    .unwrap();
                assert!(result.is_none());

                let stored = service.get(&record.id).await.unwrap().unwrap();
                assert_eq!(stored, record);
            }

            #[tokio::test]
            async fn test_update_if_status_nonexistent() {
                let service = $factory;
                let result = service
                    .update_if_status(&Uuid::new_v4(), "open", status_patch("closed"))
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_concurrent_conditional_updates_single_winner() {
                let service = $factory;
                let record = service
                    .create(create_test_record("Fabio", "open", 0))
                    .await
                    .unwrap();

                let mut handles = Vec::new();
                for i in 0..16 {
                    let svc = service.clone();
                    let id = record.id;
                    handles.push(tokio::spawn(async move {
                        svc.update_if_status(&id, "open", status_patch(&format!("taken-{i}")))
                            .await
                            .unwrap()
                    }));
                }

                let mut winners = 0;
                for handle in handles {
                    if handle.await.unwrap().is_some() {
                        winners += 1;
                    }
                }
                assert_eq!(winners, 1);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;
                let mut handles = Vec::new();
                for record in sample_batch(10) {
                    let svc = service.clone();
                    handles.push(tokio::spawn(async move { svc.create(record).await }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }
                assert_count(&service.list().await.unwrap(), 10);
            }
        }
    };
}
