//! Property-based tests using proptest.
//!
//! Verify the store's collection invariants under arbitrary operation
//! sequences, and that the wire types tolerate arbitrary JSON without
//! panicking.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::Value;

use todo_store::store::memory::InMemoryTaskStore;
use todo_store::{TaskPatch, TaskRecord};

// ─── Arbitrary Strategies ───────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,24}"
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z_]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-zA-Z_]{1,9}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

// ─── Store Invariants ───────────────────────────────────────────────────────

proptest! {
    /// After N creates and M deletes (M <= N) the list holds exactly N - M
    /// records with no duplicate IDs.
    #[test]
    fn list_count_after_creates_and_deletes(n in 0usize..20, delete_ratio in 0.0f64..=1.0) {
        let m = ((n as f64) * delete_ratio).floor() as usize;
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = InMemoryTaskStore::in_memory();
            let mut ids = Vec::with_capacity(n);
            for i in 0..n {
                ids.push(store.create(&format!("task {i}")).await.unwrap().id);
            }
            for id in ids.iter().take(m) {
                prop_assert!(store.delete_by_id(id).await.unwrap());
            }

            let listed = store.list_all().await.unwrap();
            prop_assert_eq!(listed.len(), n - m);
            let unique: HashSet<&str> = listed.iter().map(|t| t.id.as_str()).collect();
            prop_assert_eq!(unique.len(), listed.len());
            Ok(())
        })?;
    }

    /// Create succeeds exactly when the text has a non-whitespace character,
    /// and successful creates are never completed.
    #[test]
    fn create_accepts_only_non_blank_text(text in arb_text()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = InMemoryTaskStore::in_memory();
            let result = store.create(&text).await;
            if text.trim().is_empty() {
                prop_assert!(result.is_err());
                prop_assert!(store.list_all().await.unwrap().is_empty());
            } else {
                let record = result.unwrap();
                prop_assert!(!record.completed);
                prop_assert_eq!(&record.text, &text);
            }
            Ok(())
        })?;
    }

    /// Setting `completed` never changes any other field.
    #[test]
    fn completion_patch_touches_only_completed(text in "[a-z]{1,12}", flag in any::<bool>()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = InMemoryTaskStore::in_memory();
            let created = store.create(&text).await.unwrap();
            store.update_by_id(&created.id, &TaskPatch::completed(flag)).await.unwrap();

            let stored = store.get(&created.id).await.unwrap();
            prop_assert_eq!(stored.completed, flag);
            prop_assert_eq!(&stored.id, &created.id);
            prop_assert_eq!(&stored.text, &created.text);
            prop_assert_eq!(stored.created_at, created.created_at);
            Ok(())
        })?;
    }
}

// ─── Fuzz-style Deserialization ─────────────────────────────────────────────

proptest! {
    #[test]
    fn patch_deserialization_never_panics(value in arb_json()) {
        let _ = serde_json::from_value::<TaskPatch>(value);
    }

    #[test]
    fn record_deserialization_never_panics(value in arb_json()) {
        let _ = serde_json::from_value::<TaskRecord>(value);
    }
}
