// src/db/memory_store.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    db::receivable_store::{ReceivableFilter, ReceivableStore, StoreError},
    models::receivable::Receivable,
};

#[derive(Debug)]
struct Table {
    next_id: i64,
    // BTreeMap por id = ordem de inserção, igual ao ORDER BY id do Postgres
    rows: BTreeMap<i64, Receivable>,
}

/// Store em memória, usado quando não há `DATABASE_URL` e nos testes.
#[derive(Debug)]
pub struct InMemoryReceivableStore {
    table: RwLock<Table>,
}

impl InMemoryReceivableStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryReceivableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReceivableStore for InMemoryReceivableStore {
    async fn insert(&self, mut receivable: Receivable) -> Result<Receivable, StoreError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        receivable.id = Some(id);
        table.rows.insert(id, receivable.clone());

        Ok(receivable)
    }

    async fn find(&self, id: i64) -> Result<Option<Receivable>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn scan(&self, filter: &ReceivableFilter) -> Result<Vec<Receivable>, StoreError> {
        // Um único read lock durante toda a varredura: snapshot consistente
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .filter(|receivable| filter.matches(receivable))
            .cloned()
            .collect())
    }

    async fn replace(&self, id: i64, receivable: &Receivable) -> Result<(), StoreError> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = Receivable {
                    id: Some(id),
                    ..receivable.clone()
                };
                Ok(())
            }
            None => Err(StoreError::WriteConflict(id)),
        }
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn receivable(reference: &str) -> Receivable {
        let issued = Utc.with_ymd_and_hms(2023, 10, 6, 7, 5, 20).unwrap();
        Receivable {
            id: None,
            reference: reference.to_string(),
            currency_code: "GBP".to_string(),
            issue_date: Some(issued),
            opening_value: Some(dec!(11)),
            paid_value: Some(dec!(1)),
            due_date: Some(issued),
            closed_date: None,
            cancelled: None,
            debtor_name: "debtorName".to_string(),
            debtor_reference: "debtorReference".to_string(),
            debtor_address1: None,
            debtor_address2: None,
            debtor_town: None,
            debtor_state: None,
            debtor_zip: None,
            debtor_country_code: "GB".to_string(),
            debtor_registration_number: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryReceivableStore::new();

        let first = store.insert(receivable("a")).await.unwrap();
        let second = store.insert(receivable("b")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.find(2).await.unwrap().unwrap().reference, "b");
    }

    #[tokio::test]
    async fn insert_ignores_caller_id() {
        let store = InMemoryReceivableStore::new();
        let mut r = receivable("a");
        r.id = Some(99);

        let created = store.insert(r).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert!(!store.exists(99).await.unwrap());
    }

    #[tokio::test]
    async fn replace_missing_row_is_a_write_conflict() {
        let store = InMemoryReceivableStore::new();

        let result = store.replace(7, &receivable("a")).await;

        assert!(matches!(result, Err(StoreError::WriteConflict(7))));
    }

    #[tokio::test]
    async fn replace_keeps_the_id() {
        let store = InMemoryReceivableStore::new();
        let created = store.insert(receivable("a")).await.unwrap();

        let mut changed = receivable("changed");
        changed.id = None;
        store.replace(1, &changed).await.unwrap();

        let stored = store.find(1).await.unwrap().unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.reference, "changed");
    }

    #[tokio::test]
    async fn scan_keeps_insertion_order_and_applies_filter() {
        let store = InMemoryReceivableStore::new();
        store.insert(receivable("a")).await.unwrap();
        let mut cancelled = receivable("b");
        cancelled.cancelled = Some(true);
        store.insert(cancelled).await.unwrap();
        store.insert(receivable("c")).await.unwrap();

        let start = Utc.with_ymd_and_hms(2023, 9, 9, 0, 0, 0).unwrap();
        let rows = store.scan(&ReceivableFilter::issued_after(start)).await.unwrap();

        let references: Vec<_> = rows.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(references, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn remove_reports_whether_something_was_deleted() {
        let store = InMemoryReceivableStore::new();
        store.insert(receivable("a")).await.unwrap();

        assert!(store.remove(1).await.unwrap());
        assert!(!store.remove(1).await.unwrap());
    }
}
