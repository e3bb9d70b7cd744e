//! Shared test harness for storage backend testing
//!
//! Provides `TestRecord`, a small entity with a string status, and helpers
//! for creating test data.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use dealership::core::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub amount: i64,
}

#[derive(Clone, Debug, Default)]
pub struct TestRecordPatch {
    pub name: Option<String>,
    pub status: Option<String>,
    pub amount: Option<i64>,
}

impl Entity for TestRecord {
    type Patch = TestRecordPatch;

    fn resource_name() -> &'static str {
        "test_records"
    }

    fn resource_name_singular() -> &'static str {
        "test_record"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn apply(&mut self, patch: TestRecordPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

pub fn create_test_record(name: &str, status: &str, amount: i64) -> TestRecord {
    TestRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        status: status.to_string(),
        amount,
    }
}

pub fn sample_batch(n: usize) -> Vec<TestRecord> {
    (0..n)
        .map(|i| create_test_record(&format!("record-{i}"), "open", i as i64 * 100))
        .collect()
}

pub fn status_patch(status: &str) -> TestRecordPatch {
    TestRecordPatch {
        status: Some(status.to_string()),
        ..Default::default()
    }
}

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
